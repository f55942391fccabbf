//! All supported message catalog file formats for localefmt.
//!
//! This module re-exports the per-format types and provides the
//! [`CatalogFormat`] enum for generic format handling across the crate.

pub mod json;
pub mod toml;
pub mod yaml;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

// Reexporting the formats for easier access
pub use self::json::Format as JsonFormat;
pub use self::toml::Format as TomlFormat;
pub use self::yaml::Format as YamlFormat;

use crate::Error;

/// Represents all supported catalog file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogFormat {
    /// JSON object, written with two-space indentation.
    Json,
    /// YAML mapping.
    Yaml,
    /// TOML table.
    Toml,
}

/// Implements [`std::fmt::Display`] for [`CatalogFormat`].
///
/// # Example
/// ```rust
/// use localefmt::formats::CatalogFormat;
/// assert_eq!(CatalogFormat::Json.to_string(), "json");
/// assert_eq!(CatalogFormat::Yaml.to_string(), "yaml");
/// assert_eq!(CatalogFormat::Toml.to_string(), "toml");
/// ```
impl Display for CatalogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogFormat::Json => write!(f, "json"),
            CatalogFormat::Yaml => write!(f, "yaml"),
            CatalogFormat::Toml => write!(f, "toml"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`CatalogFormat`].
///
/// Accepts `"json"`, `"yaml"`, `"yml"` and `"toml"`, case-insensitively.
/// Returns [`crate::error::Error::UnknownFormat`] for anything else.
///
/// # Example
/// ```rust
/// use localefmt::formats::CatalogFormat;
/// use std::str::FromStr;
/// assert_eq!(CatalogFormat::from_str("YAML").unwrap(), CatalogFormat::Yaml);
/// assert!(CatalogFormat::from_str("xml").is_err());
/// ```
impl FromStr for CatalogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "json" => Ok(CatalogFormat::Json),
            "yaml" | "yml" => Ok(CatalogFormat::Yaml),
            "toml" => Ok(CatalogFormat::Toml),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl CatalogFormat {
    /// Returns the file extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            CatalogFormat::Json => "json",
            CatalogFormat::Yaml => "yaml",
            CatalogFormat::Toml => "toml",
        }
    }

    /// Maps a file extension (without the dot, any case) to its format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(CatalogFormat::Json),
            "yaml" | "yml" => Some(CatalogFormat::Yaml),
            "toml" => Some(CatalogFormat::Toml),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_format_from_str() {
        assert_eq!(CatalogFormat::from_str("json").unwrap(), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_str(" Toml ").unwrap(), CatalogFormat::Toml);
        assert_eq!(CatalogFormat::from_str("yml").unwrap(), CatalogFormat::Yaml);
        assert!(matches!(
            CatalogFormat::from_str("ini"),
            Err(Error::UnknownFormat(s)) if s == "ini"
        ));
    }

    #[test]
    fn test_catalog_format_extension_round_trip() {
        for format in [CatalogFormat::Json, CatalogFormat::Yaml, CatalogFormat::Toml] {
            assert_eq!(CatalogFormat::from_extension(format.extension()), Some(format));
        }
        assert_eq!(CatalogFormat::from_extension("JSON"), Some(CatalogFormat::Json));
        assert_eq!(CatalogFormat::from_extension("xml"), None);
    }
}
