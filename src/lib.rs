#![forbid(unsafe_code)]
//! Session-scoped, locale-aware printf formatting with inline plural selection.
//!
//! Each caller (a request, a job, a user session) registers a session id with a
//! language, formats strings through a [`Localizer`], and removes the session
//! when done. A format call may carry a plural rule set that picks the
//! phrasing from a numeric argument before rendering. Translations come
//! from flat message catalogs stored as JSON, YAML, or TOML.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use localefmt::{Localizer, SessionRegistry, args, plural::plural, registry::new_session_id};
//!
//! let localizer = Localizer::new(Arc::new(SessionRegistry::new()));
//! let session = localizer.registry().scope(new_session_id(), "en".parse().unwrap());
//!
//! let rules = plural(&[
//!     "%[2]d=1", "%s has %d cat.",
//!     "%[2]d>1", "%s has %d cats.",
//! ]);
//! let text = localizer.format(&session, "%s has %d cat.", args!["Lukin", 1].with_plural(rules))?;
//! assert_eq!(text, "Lukin has 1 cat.");
//! # Ok::<(), localefmt::Error>(())
//! ```
//!
//! # Catalogs
//!
//! ```rust,no_run
//! use localefmt::codec;
//!
//! let mut catalog = codec::load("locales/zh-Hans.json")?;
//! catalog.insert("hello world!", "你好，世界！");
//! codec::save_to_file(&catalog, "locales/zh-Hans.json")?;
//! # Ok::<(), localefmt::Error>(())
//! ```

pub mod codec;
pub mod error;
pub mod formats;
pub mod localizer;
pub mod numbers;
pub mod options;
pub mod placeholder;
pub mod plural;
pub mod printer;
pub mod printf;
pub mod registry;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{infer_format_from_extension, load, save, save_as, save_to_file},
    error::Error,
    formats::CatalogFormat,
    localizer::Localizer,
    numbers::LocaleDigits,
    options::{ArgumentArity, MalformedPolicy, PluralOptions},
    plural::{Operator, PluralRule, PluralRules, plural},
    printer::{Formatter, NeutralPrinter, Printer, Translations},
    registry::{SessionGuard, SessionRegistry, new_session_id},
    types::{Args, MessageCatalog, Value},
};
