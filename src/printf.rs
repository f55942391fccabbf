//! Printf rendering.
//!
//! Verbs follow the familiar `%v %s %q %d %b %o %x %X %c %U %e %E %f %F %g %G %t %T %%`
//! set, with `+ - # 0 space` flags, `*` widths and precisions, and `%[n]`
//! argument indexes. Problems never abort rendering; they are reported
//! inline instead:
//!
//! - `%!d(string=cat)` operand of the wrong type for the verb
//! - `%!d(MISSING)` no operand left
//! - `%!d(BADINDEX)` explicit index out of range or malformed
//! - `%!(NOVERB)` format ends after `%`
//! - `%!(EXTRA int=2)` operands left over (only without explicit indexes)
//!
//! Numbers come out locale-neutral unless [`LocaleDigits`] are supplied.

use std::io::Write;

use crate::{
    numbers::LocaleDigits,
    placeholder::{self, ArgIndex, Count, Directive, Flags, Piece},
    types::Value,
};

/// Renders `format` with `args`.
pub fn sprintf(format: &str, args: &[Value]) -> String {
    sprintf_with(format, args, None)
}

/// Renders `format` with `args`, shaping decimal numbers with `locale`.
pub fn sprintf_with(format: &str, args: &[Value], locale: Option<&LocaleDigits>) -> String {
    let mut state = State {
        out: String::with_capacity(format.len() + 16),
        args,
        locale,
        next: 0,
        reordered: false,
    };

    for piece in placeholder::parse(format) {
        match piece {
            Piece::Literal(text) => state.out.push_str(text),
            Piece::Directive(directive) => state.directive(&directive),
        }
    }

    if !state.reordered && state.next < args.len() {
        state.out.push_str("%!(EXTRA ");
        for (i, arg) in args[state.next..].iter().enumerate() {
            if i > 0 {
                state.out.push_str(", ");
            }
            state.out.push_str(arg.type_name());
            state.out.push('=');
            state.out.push_str(&render_default(arg));
        }
        state.out.push(')');
    }

    state.out
}

/// Renders `format` with `args` into `writer`, returning the number of bytes written.
pub fn fprintf<W: Write + ?Sized>(
    writer: &mut W,
    format: &str,
    args: &[Value],
) -> std::io::Result<usize> {
    fprintf_with(writer, format, args, None)
}

/// [`fprintf`] with locale-shaped decimal numbers.
pub fn fprintf_with<W: Write + ?Sized>(
    writer: &mut W,
    format: &str,
    args: &[Value],
    locale: Option<&LocaleDigits>,
) -> std::io::Result<usize> {
    let rendered = sprintf_with(format, args, locale);
    writer.write_all(rendered.as_bytes())?;
    Ok(rendered.len())
}

struct State<'a> {
    out: String,
    args: &'a [Value],
    locale: Option<&'a LocaleDigits>,
    next: usize,
    reordered: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Spec {
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
}

impl State<'_> {
    fn directive(&mut self, directive: &Directive) {
        let mut spec = Spec {
            flags: directive.flags,
            ..Spec::default()
        };
        let mut good_index = !directive.misplaced_index;

        if let Some(width) = directive.width {
            match width {
                Count::Fixed(n) => spec.width = Some(n),
                Count::Star(index) => {
                    good_index &= self.seek(index);
                    match self.take_count() {
                        Some(n) if n < 0 => {
                            // Negative width means left alignment.
                            spec.flags.minus = true;
                            spec.flags.zero = false;
                            spec.width = Some(n.unsigned_abs() as usize);
                        }
                        Some(n) => spec.width = Some(n as usize),
                        None => self.out.push_str("%!(BADWIDTH)"),
                    }
                }
            }
        }

        if let Some(precision) = directive.precision {
            match precision {
                Count::Fixed(n) => spec.precision = Some(n),
                Count::Star(index) => {
                    good_index &= self.seek(index);
                    match self.take_count() {
                        // Negative precision means no precision.
                        Some(n) if n < 0 => spec.precision = None,
                        Some(n) => spec.precision = Some(n as usize),
                        None => self.out.push_str("%!(BADPREC)"),
                    }
                }
            }
        }

        good_index &= self.seek(directive.index);

        let Some(verb) = directive.verb else {
            self.out.push_str("%!(NOVERB)");
            return;
        };

        if verb == '%' {
            self.out.push('%');
            return;
        }
        if !good_index {
            self.out.push_str(&format!("%!{}(BADINDEX)", verb));
            return;
        }
        let Some(arg) = self.args.get(self.next) else {
            self.out.push_str(&format!("%!{}(MISSING)", verb));
            return;
        };
        self.next += 1;

        let rendered = render(arg, verb, &spec, self.locale);
        self.out.push_str(&rendered);
    }

    /// Moves to an explicit index. Returns `false` when the index is unusable.
    fn seek(&mut self, index: Option<ArgIndex>) -> bool {
        match index {
            None => true,
            Some(ArgIndex::Malformed) => {
                self.reordered = true;
                false
            }
            Some(ArgIndex::At(n)) => {
                self.reordered = true;
                if n < self.args.len() {
                    self.next = n;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Consumes an integer operand for a `*` width or precision.
    fn take_count(&mut self) -> Option<i64> {
        let value = self.args.get(self.next)?;
        self.next += 1;
        match value {
            Value::Int(n) if n.unsigned_abs() <= 1_000_000 => Some(*n),
            Value::Uint(n) if *n <= 1_000_000 => Some(*n as i64),
            _ => None,
        }
    }
}

fn render(arg: &Value, verb: char, spec: &Spec, locale: Option<&LocaleDigits>) -> String {
    if verb == 'T' {
        return pad(arg.type_name(), spec);
    }

    let rendered = match arg {
        Value::Int(n) => render_integer(*n < 0, u128::from(n.unsigned_abs()), verb, spec, locale),
        Value::Uint(n) => render_integer(false, u128::from(*n), verb, spec, locale),
        Value::Float(f) => render_float(*f, verb, spec, locale),
        Value::Str(s) => render_str(s, verb, spec),
        Value::Bool(b) => match verb {
            't' | 'v' => Some(pad(if *b { "true" } else { "false" }, spec)),
            _ => None,
        },
        Value::Char(c) => render_char(*c, verb, spec),
    };

    rendered.unwrap_or_else(|| format!("%!{}({}={})", verb, arg.type_name(), render_default(arg)))
}

fn render_default(arg: &Value) -> String {
    render(arg, 'v', &Spec::default(), None)
}

fn render_integer(
    negative: bool,
    magnitude: u128,
    verb: char,
    spec: &Spec,
    locale: Option<&LocaleDigits>,
) -> Option<String> {
    let (base, upper) = match verb {
        'd' | 'v' => (10, false),
        'b' => (2, false),
        'o' => (8, false),
        'x' => (16, false),
        'X' => (16, true),
        'c' | 'q' | 'U' => {
            let ch = if negative {
                char::REPLACEMENT_CHARACTER
            } else {
                u32::try_from(magnitude)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            };
            return render_char(ch, verb, spec);
        }
        _ => return None,
    };

    let mut digits = match base {
        2 => format!("{:b}", magnitude),
        8 => format!("{:o}", magnitude),
        16 if upper => format!("{:X}", magnitude),
        16 => format!("{:x}", magnitude),
        _ => magnitude.to_string(),
    };

    if let Some(precision) = spec.precision {
        if precision == 0 && magnitude == 0 {
            digits.clear();
        } else if digits.len() < precision {
            digits = format!("{}{}", "0".repeat(precision - digits.len()), digits);
        }
    } else if base == 10 {
        if let Some(shaped) = locale.and_then(|locale| locale.format(&digits)) {
            digits = shaped;
        }
    }

    let mut prefix = String::new();
    if negative {
        prefix.push('-');
    } else if spec.flags.plus {
        prefix.push('+');
    } else if spec.flags.space {
        prefix.push(' ');
    }
    if spec.flags.sharp {
        match base {
            2 => prefix.push_str("0b"),
            8 if !digits.starts_with('0') => prefix.push('0'),
            16 if upper => prefix.push_str("0X"),
            16 => prefix.push_str("0x"),
            _ => {}
        }
    }

    Some(pad_number(&prefix, &digits, spec, spec.precision.is_none()))
}

fn render_float(
    value: f64,
    verb: char,
    spec: &Spec,
    locale: Option<&LocaleDigits>,
) -> Option<String> {
    let upper = verb.is_ascii_uppercase();

    if !matches!(verb, 'v' | 'e' | 'E' | 'f' | 'F' | 'g' | 'G') {
        return None;
    }

    let sign = if value.is_sign_negative() && !value.is_nan() {
        "-"
    } else if spec.flags.plus {
        "+"
    } else if spec.flags.space {
        " "
    } else {
        ""
    };

    if !value.is_finite() {
        let body = if value.is_nan() { "NaN" } else { "Inf" };
        // No zero padding for NaN and infinities.
        return Some(pad_number(sign, body, spec, false));
    }

    let magnitude = value.abs();
    let body = match verb {
        'f' | 'F' => format!("{:.*}", spec.precision.unwrap_or(6), magnitude),
        'e' | 'E' => exponent_form(magnitude, spec.precision.unwrap_or(6), upper),
        'g' | 'G' | 'v' => general_form(magnitude, spec.precision, upper),
        _ => return None,
    };
    // Exponent forms are not plain decimals and keep their printf spelling.
    let body = locale.and_then(|locale| locale.format(&body)).unwrap_or(body);

    Some(pad_number(sign, &body, spec, true))
}

/// Scientific notation with a signed, at least two-digit exponent: `1.5e+03`.
fn exponent_form(magnitude: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, magnitude);
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    join_exponent(mantissa, exponent.parse().unwrap_or(0), upper)
}

fn join_exponent(mantissa: &str, exponent: i32, upper: bool) -> String {
    format!(
        "{}{}{}{:02}",
        mantissa,
        if upper { 'E' } else { 'e' },
        if exponent < 0 { '-' } else { '+' },
        exponent.unsigned_abs()
    )
}

/// `%g`: shortest representation (or `precision` significant digits), switching
/// to scientific notation for exponents below -4 or at or above the precision.
fn general_form(magnitude: f64, precision: Option<usize>, upper: bool) -> String {
    let raw = match precision {
        None => format!("{:e}", magnitude),
        Some(p) => format!("{:.*e}", p.max(1) - 1, magnitude),
    };
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    let significant = digits.len() as i32;
    let point = exponent + 1;

    let threshold = match precision {
        None => 6,
        Some(p) => {
            let p = p.max(1) as i32;
            if p > significant && significant >= point {
                significant
            } else {
                p
            }
        }
    };

    if exponent < -4 || exponent >= threshold {
        let mantissa = if digits.len() > 1 {
            format!("{}.{}", &digits[..1], &digits[1..])
        } else {
            digits.to_string()
        };
        return join_exponent(&mantissa, exponent, upper);
    }

    if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point >= significant {
        format!("{}{}", digits, "0".repeat((point - significant) as usize))
    } else {
        let split = point as usize;
        format!("{}.{}", &digits[..split], &digits[split..])
    }
}

fn render_str(value: &str, verb: char, spec: &Spec) -> Option<String> {
    let truncated = match spec.precision {
        Some(precision) => match value.char_indices().nth(precision) {
            Some((end, _)) => &value[..end],
            None => value,
        },
        None => value,
    };

    match verb {
        's' | 'v' => Some(pad(truncated, spec)),
        'q' => Some(pad(&quote(truncated, '"'), spec)),
        'x' | 'X' => {
            let hex: String = truncated
                .bytes()
                .map(|b| {
                    if verb == 'X' {
                        format!("{:02X}", b)
                    } else {
                        format!("{:02x}", b)
                    }
                })
                .collect();
            let prefix = match (spec.flags.sharp, verb) {
                (true, 'X') => "0X",
                (true, _) => "0x",
                _ => "",
            };
            Some(pad(&format!("{}{}", prefix, hex), spec))
        }
        _ => None,
    }
}

fn render_char(value: char, verb: char, spec: &Spec) -> Option<String> {
    match verb {
        'c' | 's' | 'v' => Some(pad(value.encode_utf8(&mut [0; 4]), spec)),
        'q' => Some(pad(&quote(value.encode_utf8(&mut [0; 4]), '\''), spec)),
        'U' => {
            let mut text = format!("U+{:04X}", u32::from(value));
            if spec.flags.sharp {
                text.push_str(&format!(" '{}'", value));
            }
            Some(pad(&text, spec))
        }
        'd' | 'b' | 'o' | 'x' | 'X' => {
            render_integer(false, u128::from(u32::from(value)), verb, spec, None)
        }
        _ => None,
    }
}

/// Double- or single-quoted literal with backslash escapes.
fn quote(value: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(delimiter);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() && (c as u32) < 0x80 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

/// Pads `text` with spaces to the width, on the left unless `-` is set.
fn pad(text: &str, spec: &Spec) -> String {
    let len = text.chars().count();
    match spec.width {
        Some(width) if width > len => {
            let fill = " ".repeat(width - len);
            if spec.flags.minus {
                format!("{}{}", text, fill)
            } else {
                format!("{}{}", fill, text)
            }
        }
        _ => text.to_string(),
    }
}

/// Pads a number, placing zero padding between the sign/prefix and the digits.
fn pad_number(prefix: &str, digits: &str, spec: &Spec, allow_zero: bool) -> String {
    let len = prefix.chars().count() + digits.chars().count();
    match spec.width {
        Some(width) if width > len && spec.flags.zero && allow_zero && !spec.flags.minus => {
            format!("{}{}{}", prefix, "0".repeat(width - len), digits)
        }
        _ => pad(&format!("{}{}", prefix, digits), spec),
    }
}
