//! Lenient number and text extraction for untrusted JSON fields.

use serde_json::Value;

/// Read `value` as a finite number, falling back to `default`.
///
/// Numbers pass through, numeric strings are parsed (surrounding whitespace
/// ignored, `0x`/`0o`/`0b` integer prefixes accepted), booleans count as 1/0.
/// Anything else, or any result that is not finite, yields `default`.
pub fn coerce_finite_number(value: Option<&Value>, default: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_numeric_str(s),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => n,
        _ => default,
    }
}

fn parse_numeric_str(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix_digits(&s[2..], radix);
    }

    // f64's parser also accepts "inf"/"nan" spellings; callers reject those as non-finite.
    s.parse::<f64>().ok()
}

/// Prefixed integer digits accumulated as `f64`, so long literals stay finite
/// instead of overflowing.
fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Textual form of a scalar field. Strings pass through; numbers and booleans
/// are rendered; null, absent, arrays and objects give `None`.
pub fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// First candidate whose text is non-empty.
pub fn first_text<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    values
        .into_iter()
        .filter_map(scalar_text)
        .find(|s| !s.is_empty())
}

/// First candidate that coerces to a non-zero number, else 0.
pub fn first_nonzero<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    values
        .into_iter()
        .map(|v| coerce_finite_number(v, 0.0))
        .find(|n| *n != 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce(v: Value) -> f64 {
        coerce_finite_number(Some(&v), 0.0)
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(coerce(json!(42.5)), 42.5);
        assert_eq!(coerce(json!(-3)), -3.0);
        assert_eq!(coerce(json!(0)), 0.0);
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        assert_eq!(coerce(json!("42.5")), 42.5);
        assert_eq!(coerce(json!("  17 ")), 17.0);
        assert_eq!(coerce(json!("1e3")), 1000.0);
        assert_eq!(coerce(json!(".5")), 0.5);
        assert_eq!(coerce(json!("0x1F")), 31.0);
        assert_eq!(coerce(json!("0b101")), 5.0);
    }

    #[test]
    fn test_prefixed_integers_beyond_u64() {
        assert_eq!(coerce(json!("0x10000000000000000")), 18446744073709551616.0);
        assert_eq!(coerce(json!("0o777")), 511.0);
        assert_eq!(coerce(json!("0x")), 0.0);
        assert_eq!(coerce(json!("0xZZ")), 0.0);
    }

    #[test]
    fn test_garbage_becomes_default() {
        assert_eq!(coerce(json!("abc")), 0.0);
        assert_eq!(coerce(json!("12abc")), 0.0);
        assert_eq!(coerce(json!("")), 0.0);
        assert_eq!(coerce(json!(null)), 0.0);
        assert_eq!(coerce(json!([1, 2])), 0.0);
        assert_eq!(coerce(json!({"v": 1})), 0.0);
        assert_eq!(coerce_finite_number(None, 7.0), 7.0);
    }

    #[test]
    fn test_non_finite_strings_become_default() {
        assert_eq!(coerce(json!("NaN")), 0.0);
        assert_eq!(coerce(json!("inf")), 0.0);
        assert_eq!(coerce(json!("-Infinity")), 0.0);
        assert_eq!(coerce(json!("1e400")), 0.0);
    }

    #[test]
    fn test_booleans() {
        assert_eq!(coerce(json!(true)), 1.0);
        assert_eq!(coerce(json!(false)), 0.0);
    }

    #[test]
    fn test_first_text_skips_empty() {
        let empty = json!("");
        let ip = json!("10.0.0.4");
        assert_eq!(first_text([Some(&empty), Some(&ip)]), Some("10.0.0.4".to_string()));
        assert_eq!(first_text([None, Some(&json!(null))]), None);
    }

    #[test]
    fn test_first_nonzero_falls_through_zero() {
        let zero = json!(0);
        let total = json!("2048");
        assert_eq!(first_nonzero([Some(&zero), Some(&total)]), 2048.0);
        assert_eq!(first_nonzero([None::<&Value>, None]), 0.0);
    }
}
