//! `toBool` and the comparison modifiers.
//!
//! Comparisons are only defined between two numbers or two strings; every
//! other pairing takes the false branch. The optional second and third
//! arguments replace the `true`/`false` results.
use super::{arg, arg_or};
use crate::coerce;
use crate::syntax::parse_number;
use crate::engine::EvaluationContext;
use serde_json::Value;
use std::cmp::Ordering;

pub(super) fn to_bool(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    Value::Bool(coerce::to_bool(value))
}

/// Ordering of two numbers, or of two strings (numerically if both are numeric).
pub(crate) fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => {
            let numeric = parse_number(a.trim())
                .and_then(|v| v.as_f64())
                .zip(parse_number(b.trim()).and_then(|v| v.as_f64()));
            match numeric {
                Some((x, y)) => x.partial_cmp(&y),
                None => Some(a.cmp(b)),
            }
        }
        _ => None,
    }
}

fn compare(value: &Value, args: &[Value], accept: fn(Ordering) -> bool) -> Value {
    let matched = arg(args, 0)
        .and_then(|other| compare_values(value, other))
        .is_some_and(accept);
    if matched {
        arg_or(args, 1, Value::Bool(true))
    } else {
        arg_or(args, 2, Value::Bool(false))
    }
}

pub(super) fn less(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    compare(value, args, Ordering::is_lt)
}

pub(super) fn less_or_equal(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    compare(value, args, Ordering::is_le)
}

pub(super) fn greater(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    compare(value, args, Ordering::is_gt)
}

pub(super) fn greater_or_equal(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    compare(value, args, Ordering::is_ge)
}

pub(super) fn equal(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    compare(value, args, Ordering::is_eq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values(&json!(1), &json!(2.5)), Some(Ordering::Less));
        assert_eq!(compare_values(&json!("10"), &json!("9")), Some(Ordering::Greater));
        assert_eq!(compare_values(&json!("apple"), &json!("banana")), Some(Ordering::Less));
        assert_eq!(compare_values(&json!(1), &json!("1")), None);
        assert_eq!(compare_values(&json!(null), &json!(null)), None);
    }
}
