//! Support for JSON message catalogs.
//!
//! A catalog is a single flat object of string values. Output uses two-space
//! indentation, ends with a newline, and leaves `/`, `<`, `>`, `&` and other
//! markup characters unescaped.

use std::io::{BufRead, Write};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{error::Error, formats::CatalogFormat, traits::Parser, types::MessageCatalog};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub messages: MessageCatalog,
}

impl Parser for Format {
    const FORMAT: CatalogFormat = CatalogFormat::Json;

    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let messages: MessageCatalog = serde_json::from_str(&content)?;
        Ok(Format { messages })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let formatter = PrettyFormatter::with_indent(b"  ");
        let mut serializer = Serializer::with_formatter(&mut writer, formatter);
        self.messages.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl From<MessageCatalog> for Format {
    fn from(messages: MessageCatalog) -> Self {
        Format { messages }
    }
}

impl From<Format> for MessageCatalog {
    fn from(format: Format) -> Self {
        format.messages
    }
}
