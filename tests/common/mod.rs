pub mod fixtures;

use etchkit::{ConditionEvaluator, Context, ExpressionEngine, RequestLocation};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Converts a `json!` object into a resolver context.
pub fn context(value: Value) -> Context {
    match value {
        Value::Object(map) => map,
        other => panic!("context fixture must be an object, got {other}"),
    }
}

/// Resolves a standalone expression with a default engine.
pub fn resolve(expression: &str, data: &Value) -> Value {
    ExpressionEngine::default().process_expression(expression, &context(data.clone()))
}

/// Applies one modifier to `value` with an empty context.
pub fn modify(value: Value, modifier: &str) -> Value {
    ExpressionEngine::default().apply_modifier(&value, modifier, &Context::new())
}

/// Runs the full substitution pass with a default engine.
pub fn render(template: Value, data: &Value) -> Value {
    ExpressionEngine::default().type_safe_replacement(&template, &context(data.clone()))
}

/// Evaluates stored condition JSON against a request snapshot.
pub fn shown(conditions: Value, location: &RequestLocation) -> bool {
    let _ = env_logger::builder().is_test(true).try_init();
    ConditionEvaluator::new().evaluate_raw(&conditions, location)
}
