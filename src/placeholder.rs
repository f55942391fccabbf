//! Placeholder tokenizing for printf-style format strings.
//!
//! Splits a format into literal runs and `%` directives (flags, width,
//! precision, explicit `[n]` argument indexes, verb), and answers how many
//! arguments a format consumes.

/// A piece of a tokenized format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece<'a> {
    Literal(&'a str),
    Directive(Directive),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub plus: bool,
    pub minus: bool,
    pub sharp: bool,
    pub space: bool,
    pub zero: bool,
}

/// An explicit `[n]` argument reference, stored zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgIndex {
    At(usize),
    Malformed,
}

/// A width or precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Fixed(usize),
    /// `*`: taken from the argument list, optionally at an explicit index.
    Star(Option<ArgIndex>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub flags: Flags,
    pub width: Option<Count>,
    pub precision: Option<Count>,
    /// Explicit index applied to the verb's operand.
    pub index: Option<ArgIndex>,
    /// `true` when an index was followed by a literal width or precision, which
    /// leaves the operand position undefined.
    pub misplaced_index: bool,
    /// `None` when the format ends right after the directive's prefix.
    pub verb: Option<char>,
}

impl Directive {
    pub fn is_percent(&self) -> bool {
        self.verb == Some('%')
    }
}

/// Widths and precisions beyond this are treated as absent.
const MAX_COUNT: usize = 1_000_000;

/// Tokenizes `format` into literal runs and directives, in order.
pub fn parse(format: &str) -> Vec<Piece<'_>> {
    let bytes = format.as_bytes();
    let mut pieces = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        while i < bytes.len() && bytes[i] != b'%' {
            i += 1;
        }
        if i > start {
            pieces.push(Piece::Literal(&format[start..i]));
        }
        if i >= bytes.len() {
            break;
        }

        let (directive, next) = parse_directive(format, i + 1);
        pieces.push(Piece::Directive(directive));
        i = next;
    }

    pieces
}

/// Parses one directive starting right after its `%`. Returns the directive and
/// the byte offset following it.
fn parse_directive(format: &str, mut i: usize) -> (Directive, usize) {
    let bytes = format.as_bytes();
    let mut directive = Directive {
        flags: Flags::default(),
        width: None,
        precision: None,
        index: None,
        misplaced_index: false,
        verb: None,
    };

    while i < bytes.len() {
        match bytes[i] {
            b'+' => directive.flags.plus = true,
            b'-' => {
                directive.flags.minus = true;
                directive.flags.zero = false;
            }
            b'#' => directive.flags.sharp = true,
            b' ' => directive.flags.space = true,
            b'0' => directive.flags.zero = !directive.flags.minus,
            _ => break,
        }
        i += 1;
    }

    // Width
    let (index, next) = parse_arg_index(format, i);
    i = next;
    if i < bytes.len() && bytes[i] == b'*' {
        directive.width = Some(Count::Star(index));
        i += 1;
    } else {
        let (width, next) = parse_number(format, i);
        if let Some(width) = width {
            directive.width = (width <= MAX_COUNT).then_some(Count::Fixed(width));
            i = next;
            if index.is_some() {
                directive.misplaced_index = true;
            }
        } else if index.is_some() {
            directive.index = index;
        }
    }

    // Precision
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        if directive.index.is_some() {
            directive.misplaced_index = true;
        }
        let (index, next) = parse_arg_index(format, i);
        i = next;
        if i < bytes.len() && bytes[i] == b'*' {
            directive.precision = Some(Count::Star(index));
            i += 1;
        } else {
            let (precision, next) = parse_number(format, i);
            // A lone '.' means precision zero.
            let precision = precision.unwrap_or(0);
            directive.precision = (precision <= MAX_COUNT).then_some(Count::Fixed(precision));
            i = next;
            if index.is_some() {
                directive.index = index;
            }
        }
    }

    if directive.index.is_none() {
        let (index, next) = parse_arg_index(format, i);
        directive.index = index;
        i = next;
    }

    match format[i..].chars().next() {
        Some(verb) => {
            directive.verb = Some(verb);
            (directive, i + verb.len_utf8())
        }
        None => (directive, i),
    }
}

/// Parses an optional `[n]` at `i`. A bracket that does not hold a positive
/// integer yields [`ArgIndex::Malformed`].
fn parse_arg_index(format: &str, i: usize) -> (Option<ArgIndex>, usize) {
    let bytes = format.as_bytes();
    if i >= bytes.len() || bytes[i] != b'[' {
        return (None, i);
    }

    let Some(close) = format[i..].find(']').map(|offset| i + offset) else {
        return (Some(ArgIndex::Malformed), i + 1);
    };

    let index = format[i + 1..close]
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0 && format[i + 1..close].bytes().all(|b| b.is_ascii_digit()))
        .map_or(ArgIndex::Malformed, |n| ArgIndex::At(n - 1));
    (Some(index), close + 1)
}

fn parse_number(format: &str, i: usize) -> (Option<usize>, usize) {
    let bytes = format.as_bytes();
    let mut j = i;
    let mut value: usize = 0;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        value = value
            .saturating_mul(10)
            .saturating_add(usize::from(bytes[j] - b'0'));
        j += 1;
    }
    if j == i { (None, i) } else { (Some(value), j) }
}

/// Returns how many leading arguments `format` consumes: the highest operand
/// position reached by its directives, including `*` widths and precisions
/// and explicit `[n]` indexes. `%%` consumes nothing.
pub fn required_arguments(format: &str) -> usize {
    let mut next = 0usize;
    let mut required = 0usize;

    let mut take = |index: Option<ArgIndex>, cursor: &mut usize| {
        if let Some(ArgIndex::At(n)) = index {
            *cursor = n;
        }
        required = required.max(*cursor + 1);
        *cursor += 1;
    };

    for piece in parse(format) {
        let Piece::Directive(directive) = piece else {
            continue;
        };
        if let Some(Count::Star(index)) = directive.width {
            take(index, &mut next);
        }
        if let Some(Count::Star(index)) = directive.precision {
            take(index, &mut next);
        }
        if directive.is_percent() {
            continue;
        }
        if directive.verb.is_some() && !matches!(directive.index, Some(ArgIndex::Malformed)) {
            take(directive.index, &mut next);
        }
    }

    required
}

/// Counts literal `%` characters, escaped `%%` included.
pub fn percent_count(format: &str) -> usize {
    format.matches('%').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directives(format: &str) -> Vec<Directive> {
        parse(format)
            .into_iter()
            .filter_map(|piece| match piece {
                Piece::Directive(d) => Some(d),
                Piece::Literal(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_literals_and_verbs() {
        let pieces = parse("%s has %d cats.");
        assert_eq!(pieces.len(), 4);
        assert_eq!(pieces[1], Piece::Literal(" has "));
        assert_eq!(pieces[3], Piece::Literal(" cats."));
    }

    #[test]
    fn test_parse_flags_width_precision() {
        let d = &directives("%-08.3f")[0];
        assert!(d.flags.minus);
        assert!(!d.flags.zero);
        assert_eq!(d.width, Some(Count::Fixed(8)));
        assert_eq!(d.precision, Some(Count::Fixed(3)));
        assert_eq!(d.verb, Some('f'));
    }

    #[test]
    fn test_parse_explicit_index() {
        let d = &directives("%[2]d")[0];
        assert_eq!(d.index, Some(ArgIndex::At(1)));
        assert_eq!(d.verb, Some('d'));

        let d = &directives("%[x]d")[0];
        assert_eq!(d.index, Some(ArgIndex::Malformed));
    }

    #[test]
    fn test_parse_star_with_index() {
        let d = &directives("%[3]*[1]d")[0];
        assert_eq!(d.width, Some(Count::Star(Some(ArgIndex::At(2)))));
        assert_eq!(d.index, Some(ArgIndex::At(0)));
    }

    #[test]
    fn test_parse_trailing_percent_has_no_verb() {
        let d = &directives("100%")[0];
        assert_eq!(d.verb, None);
    }

    #[test]
    fn test_required_arguments_sequential() {
        assert_eq!(required_arguments("%s have an apple."), 1);
        assert_eq!(required_arguments("%s have %d apples."), 2);
        assert_eq!(required_arguments("no verbs"), 0);
    }

    #[test]
    fn test_required_arguments_ignores_escaped_percent() {
        assert_eq!(required_arguments("%d%% done"), 1);
        assert_eq!(percent_count("%d%% done"), 3);
    }

    #[test]
    fn test_required_arguments_explicit_indexes() {
        assert_eq!(required_arguments("%[2]d apples"), 2);
        assert_eq!(required_arguments("%[2]d then %s"), 3);
        assert_eq!(required_arguments("%[1]s %[1]s"), 1);
    }

    #[test]
    fn test_required_arguments_star() {
        assert_eq!(required_arguments("%*d"), 2);
        assert_eq!(required_arguments("%.*f"), 2);
    }
}
