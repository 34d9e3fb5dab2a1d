//! Expression resolution against a context.
use crate::config::EngineConfig;
use crate::modifiers::{self, ModifierFn, ModifierRegistry};
use crate::replace;
use crate::syntax::{modifier_call, parse_number, split_path};
use crate::error::ExprError;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Ordered mapping from root keys (`post`, `user`, `site`, ...) to data.
pub type Context = Map<String, Value>;

/// Everything a single resolution pass needs. Never mutated while resolving.
#[derive(Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// The root data sources, tried in insertion order.
    pub data: &'a Context,
    pub config: &'a EngineConfig,
    pub modifiers: &'a ModifierRegistry,
    /// Number of enclosing `applyData` passes.
    pub depth: usize,
    /// Number of enclosing modifier argument lists.
    pub nesting: usize,
}

impl EvaluationContext<'_> {
    /// The context for one more level of `applyData` recursion.
    pub fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// The context for resolving one modifier's arguments.
    pub fn argument(&self) -> Self {
        Self {
            nesting: self.nesting + 1,
            ..*self
        }
    }
}

/// Resolves a single expression (the text between the outer braces).
///
/// Checked in order: empty text (returned as-is), quoted string, number,
/// `true`/`false`, JSON array/object, and finally a path into the context.
pub fn process_expression(expression: &str, e_ctx: &EvaluationContext<'_>) -> Value {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Value::String(expression.to_string());
    }
    if let Some(literal) = quoted_literal(trimmed) {
        return Value::String(literal);
    }
    if let Some(number) = parse_number(trimmed) {
        return number;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Some(parsed) = json_literal(trimmed) {
        return parsed;
    }
    if e_ctx.data.is_empty() {
        return Value::Null;
    }
    resolve_path(trimmed, e_ctx)
}

fn quoted_literal(text: &str) -> Option<String> {
    let quote = text.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    if text.len() < 2 || !text.ends_with(quote) {
        return None;
    }
    let mut literal = String::with_capacity(text.len());
    let mut chars = text[1..text.len() - 1].chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(next) if next == quote || next == '\\' => literal.push(next),
                Some(next) => {
                    literal.push('\\');
                    literal.push(next);
                }
                None => literal.push('\\'),
            },
            other => literal.push(other),
        }
    }
    Some(literal)
}

fn json_literal(text: &str) -> Option<Value> {
    let looks_like_json = (text.starts_with('[') && text.ends_with(']'))
        || (text.starts_with('{') && text.ends_with('}'));
    if !looks_like_json {
        return None;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) if !items.is_empty() => Some(Value::Array(items)),
        Ok(Value::Object(map)) if !map.is_empty() => Some(Value::Object(map)),
        Ok(_) => None,
        Err(e) => {
            log::trace!("'{}' is not a JSON literal ({}), resolving as a path", text, e);
            None
        }
    }
}

/// Walks `path` from the first root key it starts with.
///
/// A root that leads nowhere does not end the search; the next matching
/// root key is tried, and the first non-null result wins.
fn resolve_path(path: &str, e_ctx: &EvaluationContext<'_>) -> Value {
    for (key, root) in e_ctx.data {
        if path == key {
            return root.clone();
        }
        let Some(rest) = path
            .strip_prefix(key.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
        else {
            continue;
        };
        match walk(root, rest, e_ctx) {
            Some(value) if !value.is_null() => return value,
            _ => log::trace!("Path '{}' did not resolve under '{}'", path, key),
        }
    }
    Value::Null
}

fn walk(root: &Value, rest: &str, e_ctx: &EvaluationContext<'_>) -> Option<Value> {
    let mut current = Cow::Borrowed(root);
    for segment in split_path(rest) {
        current = step(current, segment.trim(), e_ctx)?;
    }
    Some(current.into_owned())
}

fn step<'v>(
    current: Cow<'v, Value>,
    segment: &str,
    e_ctx: &EvaluationContext<'_>,
) -> Option<Cow<'v, Value>> {
    match current {
        Cow::Borrowed(value) => match lookup(value, segment) {
            Some(found) => Some(Cow::Borrowed(found)),
            None => invoke(value, segment, e_ctx).map(Cow::Owned),
        },
        Cow::Owned(value) => match lookup(&value, segment) {
            Some(found) => Some(Cow::Owned(found.clone())),
            None => invoke(&value, segment, e_ctx).map(Cow::Owned),
        },
    }
}

fn invoke(value: &Value, segment: &str, e_ctx: &EvaluationContext<'_>) -> Option<Value> {
    modifier_call(segment)?;
    Some(modifiers::apply_modifier(value, segment, e_ctx))
}

/// One key or index step into a mapping or sequence.
pub(crate) fn lookup<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// The resolver service: configuration plus the modifier catalog.
///
/// Construct one per host (or per request) and pass it to whatever renders
/// templates; it holds no per-call state.
#[derive(Debug, Clone, Default)]
pub struct ExpressionEngine {
    config: EngineConfig,
    modifiers: ModifierRegistry,
}

impl ExpressionEngine {
    /// Creates an engine with the built-in modifier catalog.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            modifiers: ModifierRegistry::default(),
        }
    }

    /// Replaces the modifier catalog.
    pub fn with_modifiers(mut self, modifiers: ModifierRegistry) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn modifiers(&self) -> &ModifierRegistry {
        &self.modifiers
    }

    /// Adds or overrides a modifier (names are case-insensitive).
    pub fn register_modifier(&mut self, name: &str, func: ModifierFn) -> Result<(), ExprError> {
        self.modifiers.register(name, func)
    }

    fn context<'a>(&'a self, data: &'a Context) -> EvaluationContext<'a> {
        EvaluationContext {
            data,
            config: &self.config,
            modifiers: &self.modifiers,
            depth: 0,
            nesting: 0,
        }
    }

    pub fn process_expression(&self, expression: &str, data: &Context) -> Value {
        process_expression(expression, &self.context(data))
    }

    pub fn apply_modifier(&self, value: &Value, modifier: &str, data: &Context) -> Value {
        modifiers::apply_modifier(value, modifier, &self.context(data))
    }

    pub fn type_safe_replacement(&self, value: &Value, data: &Context) -> Value {
        replace::type_safe_replacement(value, &self.context(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: Value) -> Context {
        match value {
            Value::Object(map) => map,
            _ => panic!("context fixture must be an object"),
        }
    }

    #[test]
    fn test_literals() {
        let engine = ExpressionEngine::default();
        let empty = Context::new();
        assert_eq!(engine.process_expression("\"hello\"", &empty), json!("hello"));
        assert_eq!(engine.process_expression("'it\\'s'", &empty), json!("it's"));
        assert_eq!(engine.process_expression("42", &empty), json!(42));
        assert_eq!(engine.process_expression("3.14", &empty), json!(3.14));
        assert_eq!(engine.process_expression("TRUE", &empty), json!(true));
        assert_eq!(engine.process_expression("false", &empty), json!(false));
        assert_eq!(engine.process_expression("[1, 2]", &empty), json!([1, 2]));
        assert_eq!(engine.process_expression("{\"a\": 1}", &empty), json!({"a": 1}));
        assert_eq!(engine.process_expression("", &empty), json!(""));
    }

    #[test]
    fn test_empty_context_yields_null_for_paths() {
        let engine = ExpressionEngine::default();
        assert_eq!(engine.process_expression("user.name", &Context::new()), Value::Null);
        assert_eq!(engine.process_expression("[]", &Context::new()), Value::Null);
    }

    #[test]
    fn test_path_resolution() {
        let engine = ExpressionEngine::default();
        let data = context(json!({ "user": { "name": "Alice", "tags": ["a", "b"] } }));
        assert_eq!(engine.process_expression("user.name", &data), json!("Alice"));
        assert_eq!(engine.process_expression(" user.name ", &data), json!("Alice"));
        assert_eq!(engine.process_expression("user.tags.1", &data), json!("b"));
        assert_eq!(engine.process_expression("user.missing", &data), Value::Null);
        assert_eq!(
            engine.process_expression("user", &data),
            json!({ "name": "Alice", "tags": ["a", "b"] })
        );
        assert_eq!(engine.process_expression("username", &data), Value::Null);
    }

    #[test]
    fn test_later_root_key_is_tried() {
        let engine = ExpressionEngine::default();
        let data = context(json!({
            "item": { "title": "first" },
            "item.meta": { "color": "red" }
        }));
        assert_eq!(engine.process_expression("item.meta.color", &data), json!("red"));
        assert_eq!(engine.process_expression("item.title", &data), json!("first"));
    }

    #[test]
    fn test_modifier_segments() {
        let engine = ExpressionEngine::default();
        let data = context(json!({ "post": { "title": "  Hello World  " } }));
        assert_eq!(
            engine.process_expression("post.title.trim().toUpperCase()", &data),
            json!("HELLO WORLD")
        );
        assert_eq!(
            engine.process_expression("post.title.noSuchModifier()", &data),
            Value::Null
        );
    }

    #[test]
    fn test_modifier_arguments_resolve_against_context() {
        let engine = ExpressionEngine::default();
        let data = context(json!({
            "post": { "title": "Hello" },
            "site": { "suffix": " | Site" }
        }));
        assert_eq!(
            engine.process_expression("post.title.concat(site.suffix)", &data),
            json!("Hello | Site")
        );
    }
}
