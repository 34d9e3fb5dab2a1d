//! Type assertions and coercions shared by the resolver, the modifiers and
//! the condition operators.
use crate::syntax::parse_number;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Parses a numeric value or numeric string as `f64`.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s.trim()).and_then(|v| v.as_f64()),
        _ => None,
    }
}

pub fn is_numeric(value: &Value) -> bool {
    as_number(value).is_some()
}

/// Like [`as_number`], but truncates toward zero.
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => match parse_number(s.trim())? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
            _ => None,
        },
        _ => None,
    }
}

/// Wraps a whole-number float as an integer value when it fits in `i64`.
pub fn integer_value(number: f64) -> Value {
    if number.is_finite() && number >= i64::MIN as f64 && number <= i64::MAX as f64 {
        Value::from(number as i64)
    } else {
        Value::from(number)
    }
}

/// Mirrors the "empty" test used by the replacement fast path.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}

/// Text form of a value as it appears inside rendered strings.
pub fn to_display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Permissive truthiness.
///
/// `true/1/yes/y/on` are true and `false/0/no/n/off/""` are false (case and
/// surrounding whitespace ignored); any other non-empty string is true.
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let lowered = s.trim().to_ascii_lowercase();
            match lowered.as_str() {
                "true" | "1" | "yes" | "y" | "on" => true,
                "false" | "0" | "no" | "n" | "off" | "" => false,
                _ => true,
            }
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Loose equality: numbers equal numeric strings, booleans compare by truthiness.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), other) | (other, Value::Bool(a)) => *a == to_bool(other),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| loose_eq(x, y))
        }
        (Value::Object(_), Value::Object(_)) => left == right,
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => {
            false
        }
        _ => match (as_number(left), as_number(right)) {
            (Some(a), Some(b)) => a == b,
            _ => to_display_string(left) == to_display_string(right),
        },
    }
}

/// Interprets a value as a point in time.
///
/// Numbers and numeric strings are epoch seconds; strings may be RFC 3339,
/// RFC 2822, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM`
/// or `YYYY-MM-DD`. Times without an offset are taken as UTC.
pub fn as_datetime(value: &Value) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::Number(n) => from_epoch(n.as_f64()?),
        Value::String(s) => {
            let s = s.trim();
            match parse_number(s).and_then(|v| v.as_f64()) {
                Some(seconds) => from_epoch(seconds),
                None => parse_date_string(s),
            }
        }
        _ => None,
    }
}

fn from_epoch(seconds: f64) -> Option<DateTime<FixedOffset>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(whole as i64, nanos).map(|dt| dt.fixed_offset())
}

fn parse_date_string(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness_table() {
        for truthy in ["true", "1", "yes", "Y", " on "] {
            assert!(to_bool(&json!(truthy)), "{truthy}");
        }
        for falsy in ["false", "0", "no", "N", "OFF", ""] {
            assert!(!to_bool(&json!(falsy)), "{falsy}");
        }
        assert!(to_bool(&json!("anything")));
        assert!(!to_bool(&json!(null)));
        assert!(to_bool(&json!(2.5)));
        assert!(!to_bool(&json!(0)));
    }

    #[test]
    fn test_display_string() {
        assert_eq!(to_display_string(&json!(null)), "");
        assert_eq!(to_display_string(&json!(true)), "true");
        assert_eq!(to_display_string(&json!(12)), "12");
        assert_eq!(to_display_string(&json!(3.0)), "3");
        assert_eq!(to_display_string(&json!(2.5)), "2.5");
        assert_eq!(to_display_string(&json!({"a": 1})), "{\"a\":1}");
    }

    #[test]
    fn test_loose_equality() {
        assert!(loose_eq(&json!(1), &json!("1")));
        assert!(loose_eq(&json!(1.0), &json!(1)));
        assert!(loose_eq(&json!("abc"), &json!("abc")));
        assert!(loose_eq(&json!(true), &json!("yes")));
        assert!(!loose_eq(&json!(["a"]), &json!("a")));
        assert!(!loose_eq(&json!("a"), &json!("b")));
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(as_integer(&json!("42")), Some(42));
        assert_eq!(as_integer(&json!(-3.9)), Some(-3));
        assert_eq!(as_integer(&json!("4.7")), Some(4));
        assert_eq!(as_integer(&json!("x")), None);
    }

    #[test]
    fn test_datetime_inputs() {
        let expected = as_datetime(&json!(1_700_000_000)).unwrap();
        assert_eq!(expected.timestamp(), 1_700_000_000);
        assert_eq!(
            as_datetime(&json!("2024-03-05 14:30:00")).unwrap().timestamp(),
            as_datetime(&json!("2024-03-05T14:30:00Z")).unwrap().timestamp()
        );
        assert!(as_datetime(&json!("2024-03-05")).is_some());
        assert!(as_datetime(&json!("not a date")).is_none());
        assert!(as_datetime(&json!(true)).is_none());
    }
}
