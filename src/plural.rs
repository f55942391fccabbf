//! Inline plural selection.
//!
//! A rule set is authored as (expression, text) pairs such as
//! `("%[2]d=1", "%s has %d cat.")`. The expression names a 1-based argument
//! position in brackets, one separator character (the verb), a comparison
//! operator (`=` or `>`) and a non-negative threshold. At format time the
//! first rule whose comparison holds replaces the format string.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    options::{ArgumentArity, MalformedPolicy, PluralOptions},
    placeholder,
    types::{Args, Value},
};

lazy_static! {
    static ref EXPRESSION: Regex =
        Regex::new(r"\[(\d+)\][^=>]\s*(=|>)\s*(\d+)$").expect("plural expression regex is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`
    Equal,
    /// `>`
    Greater,
}

impl Operator {
    pub fn holds(self, value: i128, threshold: i64) -> bool {
        let threshold = i128::from(threshold);
        match self {
            Operator::Equal => value == threshold,
            Operator::Greater => value > threshold,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Equal => write!(f, "="),
            Operator::Greater => write!(f, ">"),
        }
    }
}

/// One parsed plural case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRule {
    /// 1-based index into the formatting arguments.
    pub position: usize,
    pub operator: Operator,
    pub threshold: i64,
    /// Replacement format string.
    pub text: String,
}

impl PluralRule {
    /// Parses a single expression, pairing it with `text`. Returns `None` when
    /// the expression does not follow the grammar, names position 0, or holds
    /// numbers too large to represent.
    pub fn parse(expression: &str, text: impl Into<String>) -> Option<Self> {
        let caps = EXPRESSION.captures(expression)?;
        let position = caps[1].parse::<usize>().ok().filter(|p| *p > 0)?;
        let operator = match &caps[2] {
            "=" => Operator::Equal,
            _ => Operator::Greater,
        };
        let threshold = caps[3].parse::<i64>().ok()?;
        Some(PluralRule {
            position,
            operator,
            threshold,
            text: text.into(),
        })
    }
}

/// An ordered plural rule set. Evaluation follows authored order; the first
/// match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralRules {
    rules: Vec<PluralRule>,
}

impl PluralRules {
    pub fn new(rules: Vec<PluralRule>) -> Self {
        PluralRules { rules }
    }

    /// Parses (expression, text) pairs, silently dropping pairs whose
    /// expression is malformed and a trailing expression without text.
    pub fn parse<S: AsRef<str>>(cases: &[S]) -> Self {
        Self::parse_with(cases, &PluralOptions::default()).unwrap_or_default()
    }

    /// Parses (expression, text) pairs under the given malformed-expression policy.
    pub fn parse_with<S: AsRef<str>>(cases: &[S], options: &PluralOptions) -> Result<Self, Error> {
        let mut rules = Vec::with_capacity(cases.len() / 2);

        for pair in cases.chunks(2) {
            let expression = pair[0].as_ref();
            let Some(text) = pair.get(1) else {
                match options.malformed {
                    MalformedPolicy::Skip => {}
                    MalformedPolicy::Warn => {
                        tracing::warn!(expression, "plural expression has no replacement text");
                    }
                    MalformedPolicy::Strict => {
                        return Err(Error::DanglingPluralExpression(expression.to_string()));
                    }
                }
                break;
            };

            match PluralRule::parse(expression, text.as_ref()) {
                Some(rule) => rules.push(rule),
                None => match options.malformed {
                    MalformedPolicy::Skip => {}
                    MalformedPolicy::Warn => {
                        tracing::warn!(expression, "skipping malformed plural expression");
                    }
                    MalformedPolicy::Strict => {
                        return Err(Error::InvalidPluralExpression(expression.to_string()));
                    }
                },
            }
        }

        Ok(PluralRules { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PluralRule> {
        self.rules.iter()
    }

    /// Returns the first rule whose comparison holds against `values`.
    ///
    /// Every rule inspected must point at an existing integer argument;
    /// rules after the first match are never inspected.
    pub fn select(&self, values: &[Value]) -> Result<Option<&PluralRule>, Error> {
        for rule in &self.rules {
            let value = rule
                .position
                .checked_sub(1)
                .and_then(|index| values.get(index))
                .ok_or(Error::PositionOutOfRange {
                    position: rule.position,
                    len: values.len(),
                })?;
            let number = value.as_integer().ok_or(Error::TypeMismatch {
                position: rule.position,
                found: value.type_name(),
            })?;
            if rule.operator.holds(number, rule.threshold) {
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }
}

impl FromIterator<PluralRule> for PluralRules {
    fn from_iter<I: IntoIterator<Item = PluralRule>>(iter: I) -> Self {
        PluralRules {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PluralRules {
    type Item = &'a PluralRule;
    type IntoIter = std::slice::Iter<'a, PluralRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Parses (expression, text) pairs leniently. Short form of [`PluralRules::parse`].
///
/// ```rust
/// use localefmt::plural::plural;
/// let rules = plural(&["%[2]d=1", "%s has %d cat.", "%[2]d>1", "%s has %d cats."]);
/// assert_eq!(rules.len(), 2);
/// ```
pub fn plural<S: AsRef<str>>(cases: &[S]) -> PluralRules {
    PluralRules::parse(cases)
}

/// A format string and argument list ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub format: String,
    pub values: Vec<Value>,
}

/// Applies an attached plural rule set to `format` and the argument values.
///
/// Plain arguments pass through untouched, as does everything when no rule
/// matches. On a match the rule text becomes the format and the values are
/// trimmed to what that text consumes, per `options.arity`.
pub fn preprocess(format: &str, args: Args, options: &PluralOptions) -> Result<Prepared, Error> {
    let (mut values, rules) = match args {
        Args::Plain(values) => {
            return Ok(Prepared {
                format: format.to_string(),
                values,
            });
        }
        Args::Plural { values, rules } => (values, rules),
    };

    let Some(rule) = rules.select(&values)? else {
        return Ok(Prepared {
            format: format.to_string(),
            values,
        });
    };

    let keep = match options.arity {
        ArgumentArity::Verbs => placeholder::required_arguments(&rule.text),
        ArgumentArity::PercentCount => placeholder::percent_count(&rule.text),
    };
    values.truncate(keep);

    Ok(Prepared {
        format: rule.text.clone(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::args;

    fn cats() -> PluralRules {
        plural(&["%[2]d=1", "%s has %d cat.", "%[2]d>1", "%s has %d cats."])
    }

    #[test]
    fn test_parse_rules_in_order() {
        let rules = cats();
        let parsed: Vec<_> = rules.iter().collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].position, 2);
        assert_eq!(parsed[0].operator, Operator::Equal);
        assert_eq!(parsed[0].threshold, 1);
        assert_eq!(parsed[0].text, "%s has %d cat.");
        assert_eq!(parsed[1].operator, Operator::Greater);
    }

    #[test]
    fn test_parse_skips_malformed_pair_and_continues() {
        let rules = plural(&[
            "%[x]d=1",
            "%s have an apple.",
            "%[2]d=2",
            "%s have two apples.",
        ]);
        assert_eq!(rules.len(), 1);
        let rule = rules.iter().next().unwrap();
        assert_eq!(rule.position, 2);
        assert_eq!(rule.operator, Operator::Equal);
        assert_eq!(rule.threshold, 2);
        assert_eq!(rule.text, "%s have two apples.");
    }

    #[test]
    fn test_parse_drops_dangling_expression() {
        let rules = plural(&["%[1]d=1", "one", "%[1]d>1"]);
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_parse_tolerates_spaces_around_operator() {
        let rule = PluralRule::parse("%[1]d = 3", "three").unwrap();
        assert_eq!(rule.operator, Operator::Equal);
        assert_eq!(rule.threshold, 3);
    }

    #[test]
    fn test_parse_rejects_position_zero_and_other_operators() {
        assert!(PluralRule::parse("%[0]d=1", "x").is_none());
        assert!(PluralRule::parse("%[1]d<1", "x").is_none());
        assert!(PluralRule::parse("%[1]d=1 trailing", "x").is_none());
        assert!(PluralRule::parse("%[1]=1", "x").is_none());
    }

    #[test]
    fn test_parse_strict_reports_malformed_expression() {
        let err = PluralRules::parse_with(&["%[x]d=1", "x"], &PluralOptions::strict()).unwrap_err();
        assert!(matches!(err, Error::InvalidPluralExpression(e) if e == "%[x]d=1"));

        let err = PluralRules::parse_with(&["%[1]d=1"], &PluralOptions::strict()).unwrap_err();
        assert!(matches!(err, Error::DanglingPluralExpression(_)));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Runs `f` under a subscriber that records every event as plain text.
    fn with_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (result, logs)
    }

    #[test]
    fn test_parse_warn_still_skips() {
        let options = PluralOptions::new().with_malformed(MalformedPolicy::Warn);
        let (rules, logs) =
            with_logs(|| PluralRules::parse_with(&["bad", "x", "%[1]d>0", "y", "%[1]d=1"], &options));
        assert_eq!(rules.unwrap().len(), 1);

        assert!(logs.contains("WARN"), "{}", logs);
        assert!(logs.contains("skipping malformed plural expression"), "{}", logs);
        assert!(logs.contains(r#"expression="bad""#), "{}", logs);
        assert!(logs.contains("plural expression has no replacement text"), "{}", logs);
        assert!(logs.contains(r#"expression="%[1]d=1""#), "{}", logs);
    }

    #[test]
    fn test_parse_skip_is_silent() {
        let cases = ["%[x]d=2", "%s have two apples.", "%[2]d=2", "%s have two apples."];
        let (rules, logs) = with_logs(|| plural(&cases));
        assert_eq!(rules.len(), 1);
        assert!(logs.is_empty(), "{}", logs);
    }

    #[test]
    fn test_select_first_match_wins() {
        // Both rules hold for 5; the earlier one must win.
        let rules = plural(&["%[1]d>1", "many", "%[1]d=5", "five"]);
        let rule = rules.select(&[Value::Int(5)]).unwrap().unwrap();
        assert_eq!(rule.text, "many");
    }

    #[test]
    fn test_select_stops_before_bad_later_rules() {
        // The second rule points past the arguments but is never reached.
        let rules = plural(&["%[1]d=1", "one", "%[9]d=1", "never"]);
        let rule = rules.select(&[Value::Int(1)]).unwrap().unwrap();
        assert_eq!(rule.text, "one");
    }

    #[test]
    fn test_select_type_mismatch() {
        let err = cats().select(&["Lukin".into(), "two".into()]).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                position: 2,
                found: "string"
            }
        ));
    }

    #[test]
    fn test_select_position_out_of_range() {
        let err = cats().select(&["Lukin".into()]).unwrap_err();
        assert!(matches!(err, Error::PositionOutOfRange { position: 2, len: 1 }));
    }

    #[test]
    fn test_select_accepts_unsigned() {
        let rules = cats();
        let rule = rules.select(&["Lukin".into(), Value::Uint(3)]).unwrap().unwrap();
        assert_eq!(rule.text, "%s has %d cats.");
    }

    #[test]
    fn test_preprocess_plain_passthrough() {
        let prepared = preprocess("%s!", args!["hi", 3], &PluralOptions::default()).unwrap();
        assert_eq!(prepared.format, "%s!");
        assert_eq!(prepared.values.len(), 2);
    }

    #[test]
    fn test_preprocess_no_match_keeps_everything() {
        let rules = plural(&["%[2]d=1", "%s has one."]);
        let args = args!["Lukin", 0, "extra"].with_plural(rules);
        let prepared = preprocess("%s has none.", args, &PluralOptions::default()).unwrap();
        assert_eq!(prepared.format, "%s has none.");
        assert_eq!(prepared.values, vec!["Lukin".into(), Value::Int(0), "extra".into()]);
    }

    #[test]
    fn test_preprocess_truncates_to_replacement_verbs() {
        let rules = plural(&[
            "%[2]d=1",
            "%s have an apple.",
            "%[2]d=2",
            "%s have two apples.",
            "%[2]d>2",
            "%s have %d apples.",
        ]);
        let args = args!["Lukin", 2].with_plural(rules.clone());
        let prepared = preprocess("%s have %d apple.", args, &PluralOptions::default()).unwrap();
        assert_eq!(prepared.format, "%s have two apples.");
        assert_eq!(prepared.values, vec![Value::from("Lukin")]);

        let args = args!["Lukin", 3].with_plural(rules);
        let prepared = preprocess("%s have %d apple.", args, &PluralOptions::default()).unwrap();
        assert_eq!(prepared.values.len(), 2);
    }

    #[test]
    fn test_preprocess_escaped_percent_arity() {
        let rules = plural(&["%[1]d>1", "%d%% of items"]);
        let values = args![50, "unused", "unused"];

        let verbs = preprocess("", values.clone().with_plural(rules.clone()), &PluralOptions::default())
            .unwrap();
        assert_eq!(verbs.values, vec![Value::Int(50)]);

        // The literal percent count keeps one argument per '%', including both of '%%'.
        let options = PluralOptions::new().with_arity(ArgumentArity::PercentCount);
        let counted = preprocess("", values.with_plural(rules), &options).unwrap();
        assert_eq!(counted.values.len(), 3);
    }

    #[test]
    fn test_preprocess_propagates_type_mismatch() {
        let args = args!["Lukin", 1.5].with_plural(cats());
        assert!(matches!(
            preprocess("%s", args, &PluralOptions::default()),
            Err(Error::TypeMismatch { .. })
        ));
    }
}
