//! String modifiers. Except for `toString`, non-string values pass through untouched.
use super::{arg_integer, arg_string};
use crate::coerce::to_display_string;
use crate::engine::EvaluationContext;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde_json::Value;

/// Everything but `A-Z a-z 0-9 - _ . ~ ! * ' ( )` is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const DEFAULT_ELLIPSIS: &str = "...";

fn map_str(value: &Value, f: impl FnOnce(&str) -> Value) -> Value {
    match value.as_str() {
        Some(s) => f(s),
        None => value.clone(),
    }
}

pub(super) fn to_upper_case(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    map_str(value, |s| s.to_uppercase().into())
}

pub(super) fn to_lower_case(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    map_str(value, |s| s.to_lowercase().into())
}

pub(super) fn to_string(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    Value::String(to_display_string(value))
}

fn trim_set(args: &[Value]) -> Option<Vec<char>> {
    arg_string(args, 0).map(|chars| chars.chars().collect())
}

pub(super) fn trim(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    map_str(value, |s| match trim_set(args) {
        Some(set) => s.trim_matches(set.as_slice()).into(),
        None => s.trim_matches(is_blank).into(),
    })
}

pub(super) fn ltrim(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    map_str(value, |s| match trim_set(args) {
        Some(set) => s.trim_start_matches(set.as_slice()).into(),
        None => s.trim_start_matches(is_blank).into(),
    })
}

pub(super) fn rtrim(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    map_str(value, |s| match trim_set(args) {
        Some(set) => s.trim_end_matches(set.as_slice()).into(),
        None => s.trim_end_matches(is_blank).into(),
    })
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\0'
}

pub(super) fn to_slug(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    map_str(value, |s| slug::slugify(s).into())
}

pub(super) fn truncate_chars(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    let Some(limit) = arg_integer(args, 0).and_then(|n| usize::try_from(n).ok()) else {
        return value.clone();
    };
    map_str(value, |s| {
        if s.chars().count() <= limit {
            return s.into();
        }
        let ellipsis = arg_string(args, 1).unwrap_or_else(|| DEFAULT_ELLIPSIS.to_string());
        let mut truncated: String = s.chars().take(limit).collect();
        truncated.push_str(&ellipsis);
        truncated.into()
    })
}

pub(super) fn truncate_words(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    let Some(limit) = arg_integer(args, 0).and_then(|n| usize::try_from(n).ok()) else {
        return value.clone();
    };
    map_str(value, |s| {
        let words: Vec<&str> = s.split_whitespace().collect();
        if words.len() <= limit {
            return s.into();
        }
        let ellipsis = arg_string(args, 1).unwrap_or_else(|| DEFAULT_ELLIPSIS.to_string());
        format!("{}{}", words[..limit].join(" "), ellipsis).into()
    })
}

pub(super) fn concat(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    map_str(value, |s| {
        let mut joined = s.to_string();
        for part in args {
            joined.push_str(&to_display_string(part));
        }
        joined.into()
    })
}

pub(super) fn strip_tags(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    map_str(value, |s| strip_markup(s).into())
}

pub(super) fn split(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    let separator = arg_string(args, 0).unwrap_or_else(|| ",".to_string());
    if separator.is_empty() {
        return value.clone();
    }
    map_str(value, |s| {
        Value::Array(s.split(separator.as_str()).map(Value::from).collect())
    })
}

pub(super) fn url_encode(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    map_str(value, |s| utf8_percent_encode(s, URI_COMPONENT).to_string().into())
}

pub(super) fn url_decode(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    map_str(value, |s| percent_decode_str(s).decode_utf8_lossy().into_owned().into())
}

/// Removes markup tags. `<script>` and `<style>` lose their contents too.
fn strip_markup(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        output.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('>') else {
            rest = "";
            break;
        };
        let tag = &tail[1..close];
        rest = &tail[close + 1..];

        if let Some(name) = raw_text_element(tag) {
            let closing = format!("</{name}");
            rest = match rest.to_ascii_lowercase().find(&closing) {
                Some(start) => {
                    let after = &rest[start..];
                    after.find('>').map_or("", |end| &after[end + 1..])
                }
                None => "",
            };
        }
    }

    output.push_str(rest);
    output
}

fn raw_text_element(tag: &str) -> Option<&'static str> {
    let name: String = tag
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    match name.as_str() {
        "script" => Some("script"),
        "style" => Some("style"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<p>Hello <b>World</b></p>"), "Hello World");
        assert_eq!(
            strip_markup("a<script type=\"x\">alert('<b>')</script>b<style>p{}</STYLE>c"),
            "abc"
        );
        assert_eq!(strip_markup("no tags"), "no tags");
        assert_eq!(strip_markup("broken <tag"), "broken ");
    }

    #[test]
    fn test_uri_component_set() {
        let encoded = utf8_percent_encode("a b&c=d/é!*'()~", URI_COMPONENT).to_string();
        assert_eq!(encoded, "a%20b%26c%3Dd%2F%C3%A9!*'()~");
    }

    #[test]
    fn test_trim_set_argument() {
        let set = trim_set(&[Value::from("-_")]).unwrap();
        assert_eq!("--a_b__".trim_matches(set.as_slice()), "a_b");
        assert!(super::super::arg(&[Value::Null], 0).is_none());
    }
}
