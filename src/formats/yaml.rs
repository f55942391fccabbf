//! Support for YAML message catalogs: a single mapping of string keys to
//! string values. An empty or null document is an empty catalog.

use std::io::{BufRead, Write};

use crate::{error::Error, formats::CatalogFormat, traits::Parser, types::MessageCatalog};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub messages: MessageCatalog,
}

impl Parser for Format {
    const FORMAT: CatalogFormat = CatalogFormat::Yaml;

    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        if content.trim().is_empty() {
            return Ok(Format::default());
        }
        let messages: Option<MessageCatalog> = serde_yaml::from_str(&content)?;
        Ok(Format {
            messages: messages.unwrap_or_default(),
        })
    }

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_yaml::to_writer(writer, &self.messages)?;
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
