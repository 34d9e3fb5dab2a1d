use etchkit_conditions::ConditionError;
use etchkit_expr::ExprError;
use thiserror::Error;

/// Errors raised while loading inputs for the resolver and the evaluator.
///
/// Evaluation itself never fails; only reading files and decoding their
/// contents can.
#[derive(Error, Debug)]
pub enum EtchError {
    #[error("Expression setup failed: {0}")]
    Expr(#[from] ExprError),

    #[error("Condition setup failed: {0}")]
    Condition(#[from] ConditionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Context must be a JSON object, found {0}")]
    InvalidContext(&'static str),
}
