//! Sequence modifiers. `length`, `reverse` and `indexOf` also accept strings.
use super::{arg, arg_integer, arg_or, arg_string};
use crate::coerce::{loose_eq, to_display_string};
use crate::engine::{EvaluationContext, lookup};
use itertools::Itertools;
use serde_json::Value;

pub(super) fn join(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    let Value::Array(items) = value else {
        return value.clone();
    };
    let separator = arg_string(args, 0).unwrap_or_else(|| ",".to_string());
    Value::String(items.iter().map(to_display_string).join(&separator))
}

pub(super) fn length(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    match value {
        Value::Array(items) => items.len().into(),
        Value::Object(map) => map.len().into(),
        Value::String(s) => s.chars().count().into(),
        _ => value.clone(),
    }
}

pub(super) fn reverse(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().rev().cloned().collect()),
        Value::String(s) => Value::String(s.chars().rev().collect()),
        _ => value.clone(),
    }
}

/// Maps a possibly negative index onto `0..=len`.
fn clamp_index(index: i64, len: usize) -> usize {
    if index < 0 {
        (len as i64 + index).max(0) as usize
    } else {
        (index as usize).min(len)
    }
}

pub(super) fn at(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    let Value::Array(items) = value else {
        return value.clone();
    };
    let Some(index) = arg_integer(args, 0) else {
        return Value::Null;
    };
    let resolved = if index < 0 {
        items.len() as i64 + index
    } else {
        index
    };
    usize::try_from(resolved)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .unwrap_or(Value::Null)
}

pub(super) fn slice(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    let Value::Array(items) = value else {
        return value.clone();
    };
    let len = items.len();
    let start = clamp_index(arg_integer(args, 0).unwrap_or(0), len);
    let end = arg_integer(args, 1).map_or(len, |end| clamp_index(end, len));
    if start >= end {
        return Value::Array(Vec::new());
    }
    Value::Array(items[start..end].to_vec())
}

pub(super) fn index_of(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    let Some(needle) = arg(args, 0) else {
        return match value {
            Value::Array(_) | Value::String(_) => Value::from(-1),
            _ => value.clone(),
        };
    };
    match value {
        Value::Array(items) => items
            .iter()
            .position(|item| loose_eq(item, needle))
            .map_or(Value::from(-1), Value::from),
        Value::String(haystack) => {
            let needle = to_display_string(needle);
            haystack
                .find(&needle)
                .map_or(Value::from(-1), |byte| Value::from(haystack[..byte].chars().count()))
        }
        _ => value.clone(),
    }
}

pub(super) fn includes(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    let Value::Array(items) = value else {
        return value.clone();
    };
    let found = arg(args, 0).is_some_and(|needle| items.iter().any(|item| loose_eq(item, needle)));
    if found {
        arg_or(args, 1, Value::Bool(true))
    } else {
        arg_or(args, 2, Value::Bool(false))
    }
}

/// Collects `path` from every item; items where the path breaks give `Null`.
pub(super) fn pluck(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    let Value::Array(items) = value else {
        return value.clone();
    };
    let Some(path) = arg_string(args, 0) else {
        return value.clone();
    };
    Value::Array(
        items
            .iter()
            .map(|item| {
                path.split('.')
                    .try_fold(item, |current, key| lookup(current, key))
                    .cloned()
                    .unwrap_or(Value::Null)
            })
            .collect(),
    )
}
