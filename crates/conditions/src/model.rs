//! The condition tree: filter → AND-scopes → OR-conditions.
use crate::error::ConditionError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Whether a fulfilled tree shows or hides the content.
///
/// Only `hideif` hides; any other stored type reads as `showif`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum FilterType {
    #[default]
    ShowIf,
    HideIf,
}

impl From<Value> for FilterType {
    fn from(raw: Value) -> Self {
        match raw.as_str().map(str::trim) {
            Some(name) if name.eq_ignore_ascii_case("hideif") => Self::HideIf,
            _ => Self::ShowIf,
        }
    }
}

/// The top of the tree. Its scopes are combined with AND.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ConditionFilter {
    #[serde(rename = "type", default)]
    pub filter_type: FilterType,
    #[serde(default)]
    pub conditions: Vec<AndScope>,
}

impl ConditionFilter {
    pub fn from_json(source: &str) -> Result<Self, ConditionError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// One AND-operand; its conditions are combined with OR.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AndScope {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// A single `{param, operator, value}` test.
///
/// A missing or non-string `param` is kept as `""`, which no predicate answers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    #[serde(default, deserialize_with = "lenient_string")]
    pub param: String,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub value: Value,
}

/// Comparison between the location's value and the condition's value.
///
/// Names that are not recognised are kept as `Other` and compared with strict equality.
/// A non-string operator (including `null`) is `Other` too.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum Operator {
    #[default]
    Equals,
    In,
    NotEqual,
    NotIn,
    Less,
    Greater,
    Older,
    Younger,
    Contains,
    NotContain,
    Between,
    Other(String),
}

impl From<&str> for Operator {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "equals" => Self::Equals,
            "in" => Self::In,
            "notequal" => Self::NotEqual,
            "notin" => Self::NotIn,
            "less" => Self::Less,
            "greater" => Self::Greater,
            "older" => Self::Older,
            "younger" => Self::Younger,
            "contains" => Self::Contains,
            "notcontain" => Self::NotContain,
            "between" => Self::Between,
            _ => Self::Other(name.to_string()),
        }
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Value> for Operator {
    fn from(raw: Value) -> Self {
        match raw {
            Value::String(name) => Self::from(name.as_str()),
            Value::Null => Self::Other(String::new()),
            other => Self::Other(other.to_string()),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equals => "equals",
            Self::In => "in",
            Self::NotEqual => "notequal",
            Self::NotIn => "notin",
            Self::Less => "less",
            Self::Greater => "greater",
            Self::Older => "older",
            Self::Younger => "younger",
            Self::Contains => "contains",
            Self::NotContain => "notcontain",
            Self::Between => "between",
            Self::Other(name) => name,
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_tree() {
        let filter = ConditionFilter::from_json(
            r#"{
                "type": "hideif",
                "conditions": [
                    { "conditions": [
                        { "param": "location_post_type", "operator": "equals", "value": "page" },
                        { "param": "user_role", "operator": "whatever", "value": ["editor"] }
                    ] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(filter.filter_type, FilterType::HideIf);
        let leaves = &filter.conditions[0].conditions;
        assert_eq!(leaves[0].operator, Operator::Equals);
        assert_eq!(leaves[1].operator, Operator::Other("whatever".to_string()));
        assert_eq!(leaves[1].value, json!(["editor"]));
    }

    #[test]
    fn test_lenient_leaves() {
        let filter = ConditionFilter::from_json(
            r#"{
                "type": "",
                "conditions": [ { "conditions": [
                    { "operator": "equals", "value": "x" },
                    { "param": 7, "operator": null, "value": "editor" },
                    { "param": "user_role", "operator": ["in"] }
                ] } ]
            }"#,
        )
        .unwrap();
        assert_eq!(filter.filter_type, FilterType::ShowIf);
        let leaves = &filter.conditions[0].conditions;
        assert_eq!(leaves[0].param, "");
        assert_eq!(leaves[1].param, "");
        assert_eq!(leaves[1].operator, Operator::Other(String::new()));
        assert_eq!(leaves[2].operator, Operator::Other("[\"in\"]".to_string()));
        assert_eq!(leaves[2].value, Value::Null);
    }

    #[test]
    fn test_filter_type_names() {
        assert_eq!(FilterType::from(json!("HideIf")), FilterType::HideIf);
        assert_eq!(FilterType::from(json!("showif")), FilterType::ShowIf);
        assert_eq!(FilterType::from(json!("hide")), FilterType::ShowIf);
        assert_eq!(FilterType::from(json!(null)), FilterType::ShowIf);
    }

    #[test]
    fn test_defaults() {
        let filter = ConditionFilter::from_json("{}").unwrap();
        assert_eq!(filter.filter_type, FilterType::ShowIf);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_operator_names_round_trip() {
        for name in ["equals", "in", "notequal", "notin", "less", "greater", "older", "younger",
            "contains", "notcontain", "between"]
        {
            assert_eq!(Operator::from(name).to_string(), name);
        }
    }
}
