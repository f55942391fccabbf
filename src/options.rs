//! Options for plural rule parsing and argument trimming.

/// What to do with a plural expression that does not match the expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Drop the (expression, text) pair and keep parsing.
    #[default]
    Skip,
    /// Drop the pair, emitting a `tracing` warning that names the expression.
    Warn,
    /// Fail the whole parse.
    Strict,
}

/// How many arguments survive after a plural rule substitutes its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgumentArity {
    /// As many as the replacement text's directives consume. `%%` consumes none.
    #[default]
    Verbs,
    /// One per literal `%` in the replacement text, so `%%` counts twice.
    PercentCount,
}

/// Plural behavior options for [`crate::plural::PluralRules::parse_with`] and
/// [`crate::Localizer`]. The localizer reads `malformed` in
/// [`crate::Localizer::plural`] and `arity` on every format call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluralOptions {
    pub malformed: MalformedPolicy,
    pub arity: ArgumentArity,
}

impl PluralOptions {
    /// Creates default options: skip malformed expressions, count real verbs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the malformed-expression policy.
    pub fn with_malformed(mut self, malformed: MalformedPolicy) -> Self {
        self.malformed = malformed;
        self
    }

    /// Sets the argument arity rule.
    pub fn with_arity(mut self, arity: ArgumentArity) -> Self {
        self.arity = arity;
        self
    }

    /// Shorthand for [`MalformedPolicy::Strict`].
    pub fn strict() -> Self {
        Self::new().with_malformed(MalformedPolicy::Strict)
    }
}
