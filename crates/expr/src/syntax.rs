//! Small grammar pieces of the expression language.
//!
//! Literals and modifier heads are recognised with `nom`; path and argument
//! splitting reuse the quote tracking from the scanner.
use crate::scanner::QuoteState;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    sequence::{pair, terminated},
};
use serde_json::Value;

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

fn numeric_literal(input: &str) -> IResult<&str, &str> {
    recognize((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
    ))
    .parse(input)
}

/// Returns true if `name` is a valid modifier identifier.
pub(crate) fn is_identifier(name: &str) -> bool {
    matches!(identifier(name), Ok(("", _)))
}

/// Splits a `name(args)` segment into its name and raw argument text.
pub(crate) fn modifier_call(segment: &str) -> Option<(&str, &str)> {
    let segment = segment.trim();
    let (rest, name) = terminated(identifier, char('(')).parse(segment).ok()?;
    let args = rest.strip_suffix(')')?;
    Some((name, args))
}

/// Parses a whole string as a number.
///
/// Literals without a `.` are integers, `1e3` included, as long as the value
/// is whole and fits in `i64`; everything else is a float.
pub fn parse_number(text: &str) -> Option<Value> {
    let (rest, matched) = numeric_literal(text).ok()?;
    if !rest.is_empty() {
        return None;
    }
    if let Ok(integer) = matched.parse::<i64>() {
        return Some(Value::from(integer));
    }
    let float = matched.parse::<f64>().ok()?;
    let whole = float.fract() == 0.0 && float.abs() < i64::MAX as f64;
    if !matched.contains('.') && whole {
        Some(Value::from(float as i64))
    } else {
        Some(Value::from(float))
    }
}

fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quotes = QuoteState::default();
    let mut start = 0;

    for (index, ch) in input.char_indices() {
        if quotes.step(ch) {
            continue;
        }
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&input[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

/// Splits a path on dots that are outside brackets and quotes.
///
/// `post.title.concat("a.b", x.y)` yields `post`, `title`, `concat("a.b", x.y)`.
pub fn split_path(path: &str) -> Vec<&str> {
    split_top_level(path, '.')
}

/// Splits raw modifier arguments on top-level commas, trimming each token.
pub fn split_arguments(raw: &str) -> Vec<&str> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(raw, ',')
        .into_iter()
        .map(str::trim)
        .collect()
}
