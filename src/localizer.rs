//! Session-aware formatting entry points.
//!
//! Every call first applies an attached plural rule set, then renders through
//! the session's formatter. An unknown session renders through
//! [`NeutralPrinter`] with the same format string and arguments.

use std::{io::Write, sync::Arc};

use crate::{
    error::Error,
    options::PluralOptions,
    plural::{self, PluralRules, Prepared},
    printer::{Formatter, NeutralPrinter},
    registry::SessionRegistry,
    types::Args,
};

#[derive(Debug, Clone)]
pub struct Localizer {
    registry: Arc<SessionRegistry>,
    options: PluralOptions,
}

impl Localizer {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Localizer {
            registry,
            options: PluralOptions::default(),
        }
    }

    /// Sets the plural options. `arity` applies to every format call;
    /// `malformed` applies to rule sets built through [`Localizer::plural`].
    pub fn with_options(mut self, options: PluralOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn options(&self) -> &PluralOptions {
        &self.options
    }

    /// Parses (expression, text) pairs under this localizer's malformed-expression policy.
    pub fn plural<S: AsRef<str>>(&self, cases: &[S]) -> Result<PluralRules, Error> {
        PluralRules::parse_with(cases, &self.options)
    }

    /// Formats into a string.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use localefmt::{Localizer, SessionRegistry, args, plural::plural};
    ///
    /// let localizer = Localizer::new(Arc::new(SessionRegistry::new()));
    /// let rules = plural(&["%[2]d=1", "%s has %d cat.", "%[2]d>1", "%s has %d cats."]);
    /// let text = localizer.format("any", "%s has %d cat.", args!["Lukin", 2].with_plural(rules))?;
    /// assert_eq!(text, "Lukin has 2 cats.");
    /// # Ok::<(), localefmt::Error>(())
    /// ```
    pub fn format(&self, id: &str, format: &str, args: impl Into<Args>) -> Result<String, Error> {
        let Prepared { format, values } = plural::preprocess(format, args.into(), &self.options)?;
        Ok(self.resolve(id).sprintf(&format, &values))
    }

    /// Formats to standard output.
    pub fn print(&self, id: &str, format: &str, args: impl Into<Args>) -> Result<(), Error> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.format_to(id, &mut handle, format, args)?;
        handle.flush()?;
        Ok(())
    }

    /// Formats into `writer`, returning the number of bytes written.
    pub fn format_to<W: Write>(
        &self,
        id: &str,
        writer: &mut W,
        format: &str,
        args: impl Into<Args>,
    ) -> Result<usize, Error> {
        let Prepared { format, values } = plural::preprocess(format, args.into(), &self.options)?;
        Ok(self.resolve(id).fprintf(writer, &format, &values)?)
    }

    fn resolve(&self, id: &str) -> Arc<dyn Formatter> {
        self.registry.lookup(id).unwrap_or_else(|| {
            tracing::debug!(session = %id, "unknown session, using neutral printer");
            Arc::new(NeutralPrinter)
        })
    }
}
