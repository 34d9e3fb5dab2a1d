//! Type-preserving substitution over strings and nested structures.
use crate::coerce::{is_empty, to_display_string};
use crate::engine::{EvaluationContext, process_expression};
use crate::scanner::{find_and_replace, is_dynamic_expression};
use itertools::Itertools;
use serde_json::Value;

/// Resolves every expression inside `value`.
///
/// A string that is exactly one `{...}` expression becomes the resolved
/// value itself, keeping its type. A string with embedded expressions stays a
/// string. Arrays and objects are processed element by element.
pub fn type_safe_replacement(value: &Value, e_ctx: &EvaluationContext<'_>) -> Value {
    if e_ctx.data.is_empty() || is_empty(value) {
        return value.clone();
    }

    match value {
        Value::String(text) => replace_string(text, e_ctx),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| type_safe_replacement(item, e_ctx))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), type_safe_replacement(item, e_ctx)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

fn replace_string(text: &str, e_ctx: &EvaluationContext<'_>) -> Value {
    if is_dynamic_expression(text) {
        return process_expression(&text[1..text.len() - 1], e_ctx);
    }
    if !text.contains('{') {
        return Value::String(text.to_string());
    }
    let separator = e_ctx.config.list_separator.as_str();
    Value::String(find_and_replace(text, |expression| {
        stringify(&process_expression(expression, e_ctx), separator)
    }))
}

/// Text used when a resolved value is spliced into a larger string.
/// Lists are joined with `separator`; `Null` becomes empty.
pub fn stringify(value: &Value, separator: &str) -> String {
    match value {
        Value::Array(items) => items.iter().map(|item| stringify(item, separator)).join(separator),
        other => to_display_string(other),
    }
}
