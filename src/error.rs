//! All error types for the localefmt crate.
//!
//! These are returned from all fallible operations (catalog loading and saving,
//! plural rule parsing and evaluation).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("invalid plural expression `{0}`")]
    InvalidPluralExpression(String),

    #[error("plural expression `{0}` has no replacement text")]
    DanglingPluralExpression(String),

    #[error("plural rule position {position} is out of range for {len} argument(s)")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("plural rule position {position} expects an integer, found {found}")]
    TypeMismatch {
        position: usize,
        found: &'static str,
    },

    #[error("invalid language identifier `{0}`")]
    InvalidLanguage(String),
}
