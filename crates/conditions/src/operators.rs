//! Operator semantics.
//!
//! `actual` is what the location reports, `expected` is the value stored in
//! the condition. `equals`/`in` match on any overlap when either side is a
//! list, while `notequal`/`notin` only look inside one list: the expected
//! side if it is a list, otherwise the actual side.
use crate::model::Operator;
use etchkit_expr::coerce::{as_datetime, as_number, loose_eq, to_display_string};
use serde_json::Value;
use std::cmp::Ordering;

impl Operator {
    pub fn compare(&self, actual: &Value, expected: &Value) -> bool {
        match self {
            Self::Equals | Self::In => overlaps(actual, expected),
            Self::NotEqual | Self::NotIn => differs(actual, expected),
            Self::Less => numeric(actual, expected).is_some_and(Ordering::is_lt),
            Self::Greater => numeric(actual, expected).is_some_and(Ordering::is_gt),
            Self::Older => temporal(actual, expected).is_some_and(Ordering::is_lt),
            Self::Younger => temporal(actual, expected).is_some_and(Ordering::is_gt),
            Self::Contains => contains(actual, expected),
            Self::NotContain => !contains(actual, expected),
            Self::Between => between(actual, expected),
            Self::Other(_) => actual == expected,
        }
    }
}

fn overlaps(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Array(have), Value::Array(want)) => {
            have.iter().any(|a| want.iter().any(|w| loose_eq(a, w)))
        }
        (Value::Array(have), want) => have.iter().any(|a| loose_eq(a, want)),
        (have, Value::Array(want)) => want.iter().any(|w| loose_eq(have, w)),
        _ => loose_eq(actual, expected),
    }
}

fn differs(actual: &Value, expected: &Value) -> bool {
    if let Value::Array(want) = expected {
        return !want.iter().any(|w| loose_eq(actual, w));
    }
    if let Value::Array(have) = actual {
        return !have.iter().any(|a| loose_eq(a, expected));
    }
    !loose_eq(actual, expected)
}

fn numeric(left: &Value, right: &Value) -> Option<Ordering> {
    as_number(left)?.partial_cmp(&as_number(right)?)
}

/// Dates first, then numbers, then plain string order.
fn temporal(left: &Value, right: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (as_datetime(left), as_datetime(right)) {
        return Some(a.cmp(&b));
    }
    ordered(left, right)
}

fn ordered(left: &Value, right: &Value) -> Option<Ordering> {
    if let Some(ordering) = numeric(left, right) {
        return Some(ordering);
    }
    match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn contains(actual: &Value, expected: &Value) -> bool {
    match actual {
        Value::Array(items) => items.iter().any(|item| loose_eq(item, expected)),
        Value::Null => false,
        other => {
            let needle = to_display_string(expected);
            !needle.is_empty() && to_display_string(other).contains(&needle)
        }
    }
}

/// `low < actual < high`, with bounds given as `[low, high]` or `"low,high"`.
fn between(actual: &Value, expected: &Value) -> bool {
    let bounds: Vec<Value> = match expected {
        Value::Array(items) => items.clone(),
        Value::String(s) => s.split(',').map(|part| Value::from(part.trim())).collect(),
        _ => return false,
    };
    let [low, high] = bounds.as_slice() else {
        return false;
    };
    temporal(low, actual).is_some_and(Ordering::is_lt)
        && temporal(actual, high).is_some_and(Ordering::is_lt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equals_with_lists() {
        let op = Operator::Equals;
        assert!(op.compare(&json!("page"), &json!("page")));
        assert!(op.compare(&json!(["single", "front_page"]), &json!("front_page")));
        assert!(op.compare(&json!("post"), &json!(["page", "post"])));
        assert!(op.compare(&json!(["editor", "author"]), &json!(["subscriber", "author"])));
        assert!(!op.compare(&json!(["editor"]), &json!(["subscriber"])));
        assert!(op.compare(&json!(42), &json!("42")));
    }

    #[test]
    fn test_not_equal_asymmetry() {
        let op = Operator::NotEqual;
        assert!(!op.compare(&json!("post"), &json!(["page", "post"])));
        assert!(!op.compare(&json!(["a", "b"]), &json!("a")));
        // both lists: the actual list is looked up as a single item of the expected list
        assert!(op.compare(&json!(["a"]), &json!(["a", "b"])));
        assert!(op.compare(&json!("x"), &json!("y")));
    }

    #[test]
    fn test_numeric_and_dates() {
        assert!(Operator::Less.compare(&json!(3), &json!("10")));
        assert!(!Operator::Less.compare(&json!("abc"), &json!(10)));
        assert!(Operator::Greater.compare(&json!(10.5), &json!(10)));
        assert!(Operator::Older.compare(&json!("2023-01-01"), &json!("2024-01-01")));
        assert!(Operator::Younger.compare(&json!("2024-06-01 10:00:00"), &json!("2024-01-01")));
    }

    #[test]
    fn test_contains() {
        assert!(Operator::Contains.compare(&json!("https://x.test/shop/cart"), &json!("/shop")));
        assert!(Operator::NotContain.compare(&json!("https://x.test/blog"), &json!("/shop")));
        assert!(Operator::Contains.compare(&json!(["a", "b"]), &json!("b")));
        assert!(!Operator::Contains.compare(&json!("abc"), &json!("")));
    }

    #[test]
    fn test_between_is_strict() {
        let op = Operator::Between;
        assert!(op.compare(&json!(5), &json!([1, 10])));
        assert!(!op.compare(&json!(1), &json!([1, 10])));
        assert!(!op.compare(&json!(10), &json!("1,10")));
        assert!(op.compare(&json!("2024-03-01"), &json!("2024-01-01, 2024-12-31")));
        assert!(!op.compare(&json!(5), &json!([1])));
    }

    #[test]
    fn test_unknown_operator_is_strict_equality() {
        let op = Operator::Other("sameas".to_string());
        assert!(op.compare(&json!("1"), &json!("1")));
        assert!(!op.compare(&json!(1), &json!("1")));
    }
}
