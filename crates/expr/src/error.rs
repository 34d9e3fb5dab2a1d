use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExprError {
    #[error("Invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid modifier name '{0}': expected an identifier")]
    InvalidModifierName(String),
}
