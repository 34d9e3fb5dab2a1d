//! Dynamic brace expressions for templated content.
//!
//! A template string embeds expressions between `{` and `}`. Each expression
//! is a literal or a dotted path into a [`Context`], optionally followed by
//! modifiers such as `{post.title.toUpperCase()}` or
//! `{post.price.numberFormat(2, ".", ",")}`.
//!
//! Resolution never fails: missing data resolves to `null`, malformed input
//! is kept as literal text, and an unknown modifier yields `null`.
//!
//! ```
//! use etchkit_expr::{Context, ExpressionEngine};
//! use serde_json::json;
//!
//! let engine = ExpressionEngine::default();
//! let data: Context = serde_json::from_value(json!({ "user": { "name": "Alice" } })).unwrap();
//!
//! let greeting = engine.type_safe_replacement(&json!("Hi {user.name.toUpperCase()}!"), &data);
//! assert_eq!(greeting, json!("Hi ALICE!"));
//! ```

pub mod coerce;
pub mod config;
pub mod engine;
pub mod error;
pub mod modifiers;
pub mod replace;
mod scanner;
mod syntax;

// --- Public API ---
pub use config::{DateLocale, EngineConfig};
pub use engine::{Context, EvaluationContext, ExpressionEngine, process_expression};
pub use error::ExprError;
pub use modifiers::{ModifierFn, ModifierRegistry, apply_modifier};
pub use replace::{stringify, type_safe_replacement};
pub use scanner::{find_and_replace, is_dynamic_expression};
pub use syntax::{parse_number, split_arguments, split_path};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn data(value: Value) -> Context {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_standalone_expression_keeps_type() {
        let engine = ExpressionEngine::default();
        let ctx = data(json!({ "post": { "id": 7, "tags": ["a", "b"] } }));
        assert_eq!(engine.type_safe_replacement(&json!("{post.id}"), &ctx), json!(7));
        assert_eq!(
            engine.type_safe_replacement(&json!("{post.tags}"), &ctx),
            json!(["a", "b"])
        );
    }

    #[test]
    fn test_embedded_expressions_are_stringified() {
        let engine = ExpressionEngine::default();
        let ctx = data(json!({ "post": { "id": 7, "tags": ["a", "b"] } }));
        assert_eq!(
            engine.type_safe_replacement(&json!("#{post.id}: {post.tags} {post.none}."), &ctx),
            json!("#7: a, b .")
        );
    }

    #[test]
    fn test_nested_structures() {
        let engine = ExpressionEngine::default();
        let ctx = data(json!({ "site": { "name": "Etch", "year": 2024 } }));
        let input = json!({
            "title": "{site.name}",
            "meta": ["© {site.year}", 3, null, { "year": "{site.year}" }]
        });
        assert_eq!(
            engine.type_safe_replacement(&input, &ctx),
            json!({
                "title": "Etch",
                "meta": ["© 2024", 3, null, { "year": 2024 }]
            })
        );
    }

    #[test]
    fn test_empty_context_is_noop() {
        let engine = ExpressionEngine::default();
        let input = json!("{post.title}");
        assert_eq!(engine.type_safe_replacement(&input, &Context::new()), input);
    }

    #[test]
    fn test_apply_data_recursion() {
        let engine = ExpressionEngine::default();
        let ctx = data(json!({
            "site": { "name": "Etch" },
            "post": { "body": "Welcome to {site.name}" }
        }));
        assert_eq!(
            engine.process_expression("post.body.applyData()", &ctx),
            json!("Welcome to Etch")
        );
        assert_eq!(engine.process_expression("post.body", &ctx), json!("Welcome to {site.name}"));
    }

    #[test]
    fn test_apply_data_depth_guard() {
        let engine = ExpressionEngine::new(EngineConfig {
            max_apply_depth: 3,
            ..EngineConfig::default()
        });
        let ctx = data(json!({ "loop": { "self": "{loop.self.applyData()}" } }));
        assert_eq!(
            engine.process_expression("loop.self.applyData()", &ctx),
            json!("{loop.self.applyData()}")
        );
    }
}
