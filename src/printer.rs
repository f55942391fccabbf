//! Locale-bound formatters.
//!
//! A [`Printer`] is bound to one language and, when the [`Translations`]
//! table has a catalog for it, looks up every format string in that catalog
//! before rendering, and shapes decimal numbers with the language's
//! separators. [`NeutralPrinter`] renders format strings and numbers as given.

use std::{collections::HashMap, io::Write, path::Path, sync::Arc};

use unic_langid::LanguageIdentifier;

use crate::{
    codec,
    error::Error,
    numbers::LocaleDigits,
    printf,
    types::{MessageCatalog, Value},
};

/// A text formatter shared between threads. Formatting never mutates it.
pub trait Formatter: Send + Sync {
    /// The language the formatter is bound to, if any.
    fn language(&self) -> Option<&LanguageIdentifier>;

    /// Resolves the format string actually rendered for `key`.
    fn translate<'a>(&'a self, key: &'a str) -> &'a str;

    /// Decimal symbols for numbers, or `None` for plain ASCII digits.
    fn digits(&self) -> Option<LocaleDigits> {
        None
    }

    /// Renders `format` with `args` into a string.
    fn sprintf(&self, format: &str, args: &[Value]) -> String {
        printf::sprintf_with(self.translate(format), args, self.digits().as_ref())
    }

    /// Renders `format` with `args` into `writer`, returning the bytes written.
    fn fprintf(
        &self,
        writer: &mut dyn Write,
        format: &str,
        args: &[Value],
    ) -> std::io::Result<usize> {
        printf::fprintf_with(writer, self.translate(format), args, self.digits().as_ref())
    }
}

/// Formatter without a language: format strings are rendered untranslated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralPrinter;

impl Formatter for NeutralPrinter {
    fn language(&self) -> Option<&LanguageIdentifier> {
        None
    }

    fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        key
    }
}

/// Formatter bound to a language and its translation catalog.
#[derive(Debug, Clone)]
pub struct Printer {
    language: LanguageIdentifier,
    catalog: Option<Arc<MessageCatalog>>,
}

impl Printer {
    pub fn new(language: LanguageIdentifier, catalog: Option<Arc<MessageCatalog>>) -> Self {
        Printer { language, catalog }
    }

    pub fn catalog(&self) -> Option<&MessageCatalog> {
        self.catalog.as_deref()
    }
}

impl Formatter for Printer {
    fn language(&self) -> Option<&LanguageIdentifier> {
        Some(&self.language)
    }

    fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.get(key))
            .unwrap_or(key)
    }

    fn digits(&self) -> Option<LocaleDigits> {
        LocaleDigits::new(&self.language)
    }
}

/// Translation catalogs by language.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    catalogs: HashMap<String, Arc<MessageCatalog>>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the catalog for `language`.
    pub fn insert(&mut self, language: &LanguageIdentifier, catalog: MessageCatalog) {
        self.catalogs.insert(language.to_string(), Arc::new(catalog));
    }

    /// Returns the catalog for `language`, falling back from the full tag
    /// (`zh-Hans-CN`) to the bare language (`zh`).
    pub fn catalog_for(&self, language: &LanguageIdentifier) -> Option<Arc<MessageCatalog>> {
        self.catalogs
            .get(&language.to_string())
            .or_else(|| self.catalogs.get(language.language.as_str()))
            .cloned()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Loads every catalog file in `dir` whose extension is supported, keyed by
    /// the file stem parsed as a language tag (`zh-Hans.json`, `en.toml`).
    /// Files with other extensions are ignored.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, Error> {
        let mut translations = Translations::new();

        let mut paths = std::fs::read_dir(dir.as_ref())?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()?;
        paths.sort();

        for path in paths {
            if !path.is_file() || codec::infer_format_from_extension(&path).is_none() {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            let language: LanguageIdentifier = stem
                .replace('_', "-")
                .parse()
                .map_err(|_| Error::InvalidLanguage(stem.to_string()))?;

            let catalog = codec::load(&path)?;
            tracing::debug!(
                language = %language,
                messages = catalog.len(),
                path = %path.display(),
                "loaded translation catalog"
            );
            translations.insert(&language, catalog);
        }

        Ok(translations)
    }
}
