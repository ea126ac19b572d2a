//! Value coercion and constraint enforcement against a manifest.

use tracing::debug;

use crate::error::UserError;
use crate::{Key, Manifest, OptionKind, OptionSpec, ParsedArgs, Value};

/// Renders an option for messages: `name` for booleans, `name=<a|b>` with an
/// allow list, otherwise `name=<type>`.
///
/// # Examples
///
/// ```
/// use argmap_core::{OptionSpec, render_option};
///
/// assert_eq!(render_option("verbose", &OptionSpec::boolean()), "verbose");
/// assert_eq!(render_option("jobs", &OptionSpec::int()), "jobs=<int>");
/// assert_eq!(
///     render_option("format", &OptionSpec::string().with_allow(["json", "yaml"])),
///     "format=<json|yaml>"
/// );
/// ```
pub fn render_option(name: &str, spec: &OptionSpec) -> String {
    if spec.kind == OptionKind::Boolean {
        name.to_string()
    } else {
        format!("{name}={}", value_hint(spec))
    }
}

/// `<a|b>` for an allow list, `<type>` otherwise.
pub(crate) fn value_hint(spec: &OptionSpec) -> String {
    match &spec.allow {
        Some(allow) => {
            let choices: Vec<String> = allow.iter().map(Value::to_string).collect();
            format!("<{}>", choices.join("|"))
        }
        None => format!("<{}>", spec.kind),
    }
}

/// Applies every manifest entry, in declaration order, to `args`.
pub(crate) fn apply_manifest(manifest: &Manifest, mut args: ParsedArgs) -> Result<ParsedArgs, UserError> {
    for (name, spec) in manifest.iter() {
        let key = Key::parse(name);
        match args.take(&key) {
            Some(raw) => {
                let value = coerce_value(name, spec, raw)?;
                if let Some(allow) = &spec.allow {
                    if !allow.contains(&value) {
                        return Err(invalid_value(name, spec, &value));
                    }
                }
                debug!(option = name, value = %value, "coerced option");
                args.set(key, value);
            }
            None => {
                if let Some(default) = &spec.default {
                    debug!(option = name, value = %default, "applied default");
                    args.set(key, conform_number(&spec.kind, default.clone()));
                } else if spec.required {
                    return Err(UserError::MissingOption(render_option(name, spec)));
                }
            }
        }
    }
    Ok(args)
}

fn coerce_value(name: &str, spec: &OptionSpec, raw: Value) -> Result<Value, UserError> {
    let coerced = match (&spec.kind, &raw) {
        (OptionKind::Boolean, Value::Bool(_)) | (OptionKind::String, Value::Str(_)) => {
            Some(raw.clone())
        }
        (OptionKind::Int, Value::Str(s)) => parse_int_prefix(s).map(Value::Int),
        (OptionKind::Float, Value::Str(s)) => parse_float_prefix(s).map(Value::Float),
        // Rejected by the manifest validator before coercion runs.
        (OptionKind::Unrecognized(_), _) => Some(raw.clone()),
        _ => None,
    };
    coerced.ok_or_else(|| invalid_value(name, spec, &raw))
}

/// Keeps numeric defaults in the declared representation.
fn conform_number(kind: &OptionKind, value: Value) -> Value {
    match (kind, value) {
        (OptionKind::Int, Value::Float(n)) => Value::Int(n.trunc() as i64),
        (OptionKind::Float, Value::Int(n)) => Value::Float(n as f64),
        (_, value) => value,
    }
}

fn invalid_value(name: &str, spec: &OptionSpec, value: &Value) -> UserError {
    UserError::InvalidValue {
        option: render_option(name, spec),
        value: value.to_string(),
    }
}

/// Parses the longest leading integer, ignoring trailing text.
///
/// `"1.5"` yields `1` and `"-7px"` yields `-7`. A `0x`/`0X` prefix after the
/// sign switches to hexadecimal, so `"0x1A"` yields `26`. Returns `None` when
/// no digits lead the string or the number does not fit in `i64`.
pub(crate) fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let sign = usize::from(s.starts_with(['+', '-']));
    let negative = s.starts_with('-');
    let body = &s[sign..];

    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        let digits = hex.bytes().take_while(u8::is_ascii_hexdigit).count();
        if digits == 0 {
            return None;
        }
        let magnitude = i128::from_str_radix(&hex[..digits], 16).ok()?;
        return i64::try_from(if negative { -magnitude } else { magnitude }).ok();
    }

    let digits = digit_run(s.as_bytes(), sign);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Parses the longest leading decimal float (with optional fraction and
/// exponent) or a signed `Infinity`, ignoring trailing text.
pub(crate) fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(s.starts_with(['+', '-']));

    if s[sign..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = digit_run(bytes, sign);
    let mut end = sign + int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digit_run(bytes, end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digit_run(bytes, exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("42"), Some(42));
        assert_eq!(parse_int_prefix("1.5"), Some(1));
        assert_eq!(parse_int_prefix("-1.9"), Some(-1));
        assert_eq!(parse_int_prefix("+8"), Some(8));
        assert_eq!(parse_int_prefix("  12abc"), Some(12));
        assert_eq!(parse_int_prefix("1e3"), Some(1));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix(".5"), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
        assert_eq!(parse_int_prefix("0x1A"), Some(26));
        assert_eq!(parse_int_prefix("0X1aZ"), Some(26));
        assert_eq!(parse_int_prefix("-0x10"), Some(-16));
        assert_eq!(parse_int_prefix("-0x8000000000000000"), Some(i64::MIN));
        assert_eq!(parse_int_prefix("0x"), None);
        assert_eq!(parse_int_prefix("0xg"), None);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("1.5"), Some(1.5));
        assert_eq!(parse_float_prefix(".25"), Some(0.25));
        assert_eq!(parse_float_prefix("3."), Some(3.0));
        assert_eq!(parse_float_prefix("-2.5e2x"), Some(-250.0));
        assert_eq!(parse_float_prefix("7e"), Some(7.0));
        assert_eq!(parse_float_prefix("1e+2"), Some(100.0));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("e5"), None);
        assert_eq!(parse_float_prefix("nan"), None);
        assert_eq!(parse_float_prefix("inf"), None);
    }

    #[test]
    fn test_conform_number() {
        assert_eq!(
            conform_number(&OptionKind::Float, Value::Int(2)),
            Value::Float(2.0)
        );
        assert!(matches!(
            conform_number(&OptionKind::Int, Value::Float(2.9)),
            Value::Int(2)
        ));
    }

    #[test]
    fn test_bare_flag_is_not_a_string() {
        let err = coerce_value("name", &OptionSpec::string(), Value::Bool(true)).unwrap_err();
        assert_eq!(
            err,
            UserError::InvalidValue {
                option: "name=<string>".into(),
                value: "true".into()
            }
        );
    }

    #[test]
    fn test_captured_value_is_not_a_boolean() {
        assert!(coerce_value("quiet", &OptionSpec::boolean(), Value::from("yes")).is_err());
    }
}
