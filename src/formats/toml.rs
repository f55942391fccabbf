//! Support for TOML message catalogs: a top-level table of string values.

use std::io::{BufRead, Write};

use crate::{error::Error, formats::CatalogFormat, traits::Parser, types::MessageCatalog};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub messages: MessageCatalog,
}

impl Parser for Format {
    const FORMAT: CatalogFormat = CatalogFormat::Toml;

    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let messages: MessageCatalog = ::toml::from_str(&content)?;
        Ok(Format { messages })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let content = ::toml::to_string(&self.messages)?;
        writer.write_all(content.as_bytes())?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_table() {
        let content = indoc! {r#"
            hello = "bonjour"
            "hello %s!" = "bonjour %s !"
        "#};
        let format = Format::from_str(content).unwrap();
        assert_eq!(format.messages.len(), 2);
        assert_eq!(format.messages.get("hello %s!"), Some("bonjour %s !"));
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(Format::from_str("").unwrap().messages.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_string_values() {
        assert!(Format::from_str("count = 3\n").is_err());
        assert!(Format::from_str("[section]\nkey = \"v\"\n").is_err());
        assert!(Format::from_str("hello = \n").is_err());
    }

    #[test]
    fn test_write_quotes_keys_as_needed() {
        let format = Format::from(
            [("hello", "bonjour"), ("hello %s!", "bonjour %s !")]
                .into_iter()
                .collect::<MessageCatalog>(),
        );
        let text = String::from_utf8(format.to_bytes().unwrap()).unwrap();
        let round_tripped = Format::from_str(&text).unwrap();
        assert_eq!(round_tripped, format);
        assert!(text.contains("hello = \"bonjour\""));
    }
}
