use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConditionError {
    #[error("Condition data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid condition parameter '{0}'")]
    InvalidParam(String),
}
