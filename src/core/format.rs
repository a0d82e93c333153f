//! Positional message interpolation
//!
//! Templates contain literal text and `{index}` / `{index:spec}`
//! placeholders. `index` selects an argument (zero-based) and the optional
//! `spec` is a printf-style directive: `[flags][width][.precision][verb]`.
//!
//! ```
//! use leveled_logger::core::format::render;
//! use leveled_logger::Value;
//!
//! let out = render("{0:.2f} / {1:05} / {2}", &[3.14156.into(), 100.into(), "ok".into()]);
//! assert_eq!(out, "3.14 / 00100 / ok");
//! ```
//!
//! Rendering never fails. An unterminated `{` is copied through as text, an
//! unparseable placeholder renders nothing, an out-of-range index renders
//! nothing and a spec that does not suit the argument falls back to the
//! argument's plain form.

use super::value::Value;

/// Render `template` against `args`.
pub fn render(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len() + 10 * args.len());
    let mut rest = template;

    loop {
        let Some(open) = rest.find('{') else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..open]);

        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            break;
        };

        if let Some(placeholder) = Placeholder::parse(&tail[1..close]) {
            if let Some(arg) = placeholder.index.and_then(|i| args.get(i)) {
                render_value(&mut out, arg, placeholder.spec);
            }
        }

        rest = &tail[close + 1..];
    }

    out
}

/// The text between one pair of braces.
#[derive(Debug, PartialEq)]
struct Placeholder<'a> {
    /// `None` when the number is negative or does not fit in `usize`.
    index: Option<usize>,
    spec: Option<&'a str>,
}

impl<'a> Placeholder<'a> {
    /// Returns `None` when the text does not start with a number.
    fn parse(text: &'a str) -> Option<Self> {
        let text = text.trim_start();
        let negative = text.starts_with('-');
        let sign_len = usize::from(negative || text.starts_with('+'));
        let digits_len = text[sign_len..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits_len == 0 {
            return None;
        }

        let digits_end = sign_len + digits_len;
        let index = match (negative, text[sign_len..digits_end].parse::<usize>().ok()) {
            (false, index) => index,
            (true, Some(0)) => Some(0),
            (true, _) => None,
        };

        // Anything after the number that is not ":<spec>" is ignored.
        let spec = text[digits_end..]
            .strip_prefix(':')
            .and_then(|s| s.split_whitespace().next());

        Some(Self { index, spec })
    }
}

fn render_value(out: &mut String, value: &Value, spec: Option<&str>) {
    let parsed = spec.and_then(FormatSpec::parse);
    match value {
        Value::Int(v) => match spec {
            None => out.push_str(&v.to_string()),
            Some(_) => match parsed.and_then(|s| format_integer(*v < 0, v.unsigned_abs(), &s)) {
                Some(text) => out.push_str(&text),
                None => out.push_str(&v.to_string()),
            },
        },
        Value::Uint(v) => match spec {
            None => out.push_str(&v.to_string()),
            Some(_) => match parsed.and_then(|s| format_integer(false, *v, &s)) {
                Some(text) => out.push_str(&text),
                None => out.push_str(&v.to_string()),
            },
        },
        Value::Float(v) => match spec {
            None => out.push_str(&default_float(*v)),
            Some(_) => match parsed.and_then(|s| format_float(*v, &s)) {
                Some(text) => out.push_str(&text),
                None => out.push_str(&default_float(*v)),
            },
        },
        Value::Str(s) | Value::Other(s) => out.push_str(s),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Char(c) => out.push(*c),
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct FormatSpec {
    left_align: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alternate: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: Option<char>,
}

impl FormatSpec {
    fn parse(spec: &str) -> Option<Self> {
        let bytes = spec.as_bytes();
        let mut parsed = FormatSpec::default();
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'-' => parsed.left_align = true,
                b'+' => parsed.plus = true,
                b' ' => parsed.space = true,
                b'0' => parsed.zero = true,
                b'#' => parsed.alternate = true,
                _ => break,
            }
            i += 1;
        }

        let (width, used) = read_number(&bytes[i..])?;
        parsed.width = width;
        i += used;

        if bytes.get(i) == Some(&b'.') {
            i += 1;
            let (precision, used) = read_number(&bytes[i..])?;
            parsed.precision = Some(precision.unwrap_or(0));
            i += used;
        }

        let verb = &spec[i..];
        let mut chars = verb.chars();
        parsed.verb = chars.next();
        if chars.next().is_some() {
            return None;
        }

        Some(parsed)
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }

    /// Pad `sign + prefix + body` to the requested width.
    fn pad(&self, sign: &str, prefix: &str, body: &str, allow_zero: bool) -> String {
        let len = sign.len() + prefix.len() + body.chars().count();
        let fill = self.width.map_or(0, |w| w.saturating_sub(len));

        if self.left_align {
            format!("{sign}{prefix}{body}{}", " ".repeat(fill))
        } else if self.zero && allow_zero {
            format!("{sign}{prefix}{}{body}", "0".repeat(fill))
        } else {
            format!("{}{sign}{prefix}{body}", " ".repeat(fill))
        }
    }
}

/// Widths and precisions above this make the spec invalid.
const MAX_WIDTH: usize = 1_000_000;

/// Reads an optional run of ASCII digits. `None` when it exceeds `MAX_WIDTH`.
fn read_number(bytes: &[u8]) -> Option<(Option<usize>, usize)> {
    let len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return Some((None, 0));
    }
    let text = std::str::from_utf8(&bytes[..len]).ok()?;
    let value = text.parse::<usize>().ok().filter(|v| *v <= MAX_WIDTH)?;
    Some((Some(value), len))
}

fn format_integer(negative: bool, magnitude: u64, spec: &FormatSpec) -> Option<String> {
    let (mut digits, prefix) = match spec.verb {
        None | Some('d') => (magnitude.to_string(), ""),
        Some('x') => (format!("{magnitude:x}"), "0x"),
        Some('X') => (format!("{magnitude:X}"), "0X"),
        Some('o') => (format!("{magnitude:o}"), "0"),
        Some('b') => (format!("{magnitude:b}"), "0b"),
        Some(_) => return None,
    };

    if let Some(precision) = spec.precision {
        if precision == 0 && magnitude == 0 {
            digits.clear();
        } else if digits.len() < precision {
            digits = format!("{}{digits}", "0".repeat(precision - digits.len()));
        }
    }

    let prefix = if spec.alternate && !(prefix == "0" && digits.starts_with('0')) {
        prefix
    } else {
        ""
    };

    Some(spec.pad(
        spec.sign(negative),
        prefix,
        &digits,
        spec.precision.is_none(),
    ))
}

fn format_float(value: f64, spec: &FormatSpec) -> Option<String> {
    if !value.is_finite() {
        return Some(spec.pad("", "", &non_finite(value), false));
    }

    let negative = value.is_sign_negative();
    let abs = value.abs();
    let body = match spec.verb {
        None if spec.precision.is_none() => shortest(abs),
        None | Some('f') | Some('F') => format!("{:.*}", spec.precision.unwrap_or(6), abs),
        Some('e') => exponent_form(abs, Some(spec.precision.unwrap_or(6)), false),
        Some('E') => exponent_form(abs, Some(spec.precision.unwrap_or(6)), true),
        Some('g') | Some('v') => general_form(abs, spec.precision, false),
        Some('G') => general_form(abs, spec.precision, true),
        Some(_) => return None,
    };

    Some(spec.pad(spec.sign(negative), "", &body, true))
}

/// Rendering used when a float has no spec.
fn default_float(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}", shortest(value.abs()))
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_negative() {
        "-Inf".to_string()
    } else {
        "+Inf".to_string()
    }
}

/// Shortest round-trip digits, switching to exponent form below 1e-4 and
/// from 1e6 upward.
fn shortest(abs: f64) -> String {
    let exp = decimal_exponent(&format!("{abs:e}"));
    if abs != 0.0 && (exp < -4 || exp >= 6) {
        exponent_form(abs, None, false)
    } else {
        abs.to_string()
    }
}

fn general_form(abs: f64, precision: Option<usize>, upper: bool) -> String {
    let Some(precision) = precision else {
        let text = shortest(abs);
        return if upper { text.to_uppercase() } else { text };
    };

    let precision = precision.max(1);
    let exp = decimal_exponent(&format!("{:.*e}", precision - 1, abs));
    if abs != 0.0 && (exp < -4 || exp >= precision as i32) {
        let text = exponent_form(abs, Some(precision - 1), upper);
        match text.find(|c| c == 'e' || c == 'E') {
            Some(at) => format!("{}{}", trim_fraction(&text[..at]), &text[at..]),
            None => text,
        }
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{abs:.decimals$}")).to_string()
    }
}

/// `1.5e+03` style: signed exponent with at least two digits.
fn exponent_form(abs: f64, precision: Option<usize>, upper: bool) -> String {
    let raw = match precision {
        Some(p) => format!("{abs:.p$e}"),
        None => format!("{abs:e}"),
    };
    let (mantissa, exp) = match raw.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (raw.as_str(), 0),
    };
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{sign}{:02}", exp.unsigned_abs())
}

fn decimal_exponent(scientific: &str) -> i32 {
    scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
