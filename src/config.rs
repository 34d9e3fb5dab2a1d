//! File-backed configuration and input loading.
use crate::error::EtchError;
use etchkit_conditions::RequestLocation;
use etchkit_expr::{Context, EngineConfig, ExpressionEngine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Top-level settings file.
///
/// ```json
/// { "engine": { "maxApplyDepth": 4, "dateFormat": "Y-m-d" } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
}

impl Config {
    pub fn from_json(source: &str) -> Result<Self, EtchError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EtchError> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn build_engine(&self) -> ExpressionEngine {
        ExpressionEngine::new(self.engine.clone())
    }
}

fn read_json(path: &Path) -> Result<Value, EtchError> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reads a resolver context. The document root must be an object.
pub fn load_context(path: impl AsRef<Path>) -> Result<Context, EtchError> {
    match read_json(path.as_ref())? {
        Value::Object(map) => Ok(map),
        other => Err(EtchError::InvalidContext(kind(&other))),
    }
}

pub fn load_location(path: impl AsRef<Path>) -> Result<RequestLocation, EtchError> {
    Ok(serde_json::from_value(read_json(path.as_ref())?)?)
}

/// Reads stored condition data as-is; decoding is left to the evaluator so
/// malformed trees fall back the same way they do at render time.
pub fn load_conditions(path: impl AsRef<Path>) -> Result<Value, EtchError> {
    read_json(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_json(r#"{ "engine": { "maxApplyDepth": 3 } }"#).unwrap();
        assert_eq!(config.engine.max_apply_depth, 3);
        assert_eq!(config.engine.date_format, "F j, Y");
        assert_eq!(config.build_engine().config().max_apply_depth, 3);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.engine.list_separator, ", ");
    }
}
