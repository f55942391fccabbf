//! Locale-aware decimal digits.
//!
//! A language-bound printer renders `%d`, `%f`, `%g` and `%v` numbers with the
//! locale's grouping and decimal separators (`1,234.50` in `en`, `1.234,50`
//! in `de`). Exponent forms, other bases and diagnostics stay as printf
//! writes them.

use fixed_decimal::Decimal;
use icu::{
    decimal::{DecimalFormatter, options::DecimalFormatterOptions},
    locale::Locale,
};
use unic_langid::LanguageIdentifier;

pub struct LocaleDigits {
    formatter: DecimalFormatter,
}

impl LocaleDigits {
    /// Loads the decimal symbols for `language`. Returns `None` when the tag is
    /// not a valid locale or no data is available for it.
    pub fn new(language: &LanguageIdentifier) -> Option<Self> {
        let locale: Locale = language.to_string().parse().ok()?;
        match DecimalFormatter::try_new(locale.into(), DecimalFormatterOptions::default()) {
            Ok(formatter) => Some(LocaleDigits { formatter }),
            Err(e) => {
                tracing::debug!(language = %language, error = %e, "no decimal data, using plain digits");
                None
            }
        }
    }

    /// Rewrites an unsigned plain decimal such as `1234567` or `1234.50`.
    /// Anything else (signs, exponents, hex digits) yields `None`.
    pub fn format(&self, plain: &str) -> Option<String> {
        if plain.is_empty() || !plain.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
            return None;
        }
        let decimal = Decimal::try_from_str(plain).ok()?;
        Some(self.formatter.format(&decimal).to_string())
    }
}

impl std::fmt::Debug for LocaleDigits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleDigits").finish_non_exhaustive()
    }
}
