//! Evaluates a condition tree against a [`Location`].
use crate::error::ConditionError;
use crate::location::Location;
use crate::model::{AndScope, Condition, ConditionFilter, FilterType};
use crate::predicates::{Predicate, PredicateFn};
use serde_json::Value;
use std::collections::HashMap;

/// The condition service. Built-in predicates are always available; custom
/// ones registered under the same `param` take precedence.
#[derive(Debug, Clone, Default)]
pub struct ConditionEvaluator {
    custom: HashMap<String, PredicateFn>,
}

impl ConditionEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a predicate for a `param` name.
    pub fn register(&mut self, param: &str, func: PredicateFn) -> Result<(), ConditionError> {
        let param = param.trim();
        if param.is_empty() || param.contains(char::is_whitespace) {
            return Err(ConditionError::InvalidParam(param.to_string()));
        }
        self.custom.insert(param.to_string(), func);
        Ok(())
    }

    /// Returns true when the content guarded by `filter` should be shown.
    ///
    /// Scopes are ANDed (every scope is evaluated), conditions inside a scope
    /// are ORed, and `hideif` negates the result. No conditions means shown.
    pub fn evaluate(&self, filter: &ConditionFilter, location: &dyn Location) -> bool {
        if filter.is_empty() {
            return true;
        }

        let results: Vec<bool> = filter
            .conditions
            .iter()
            .map(|scope| self.evaluate_scope(scope, location))
            .collect();
        let fulfilled = results.iter().all(|passed| *passed);

        match filter.filter_type {
            FilterType::ShowIf => fulfilled,
            FilterType::HideIf => !fulfilled,
        }
    }

    /// Evaluates stored condition data: a JSON object, or a string holding JSON.
    ///
    /// Missing, empty or undecodable data counts as "no conditions".
    pub fn evaluate_raw(&self, raw: &Value, location: &dyn Location) -> bool {
        let decoded = match raw {
            Value::Null => return true,
            Value::String(s) if s.trim().is_empty() => return true,
            Value::String(s) => ConditionFilter::from_json(s),
            Value::Array(items) if items.is_empty() => return true,
            other => serde_json::from_value(other.clone()).map_err(ConditionError::from),
        };
        match decoded {
            Ok(filter) => self.evaluate(&filter, location),
            Err(e) => {
                log::warn!("Ignoring unreadable condition data: {}", e);
                true
            }
        }
    }

    fn evaluate_scope(&self, scope: &AndScope, location: &dyn Location) -> bool {
        if scope.conditions.is_empty() {
            return true;
        }
        scope
            .conditions
            .iter()
            .any(|condition| self.evaluate_condition(condition, location))
    }

    /// Evaluates a single leaf. Unknown params never match.
    pub fn evaluate_condition(&self, condition: &Condition, location: &dyn Location) -> bool {
        let Some(actual) = self.resolve_param(&condition.param, location) else {
            log::debug!("Unknown condition param '{}'", condition.param);
            return false;
        };
        let matched = condition.operator.compare(&actual, &condition.value);
        log::trace!(
            "{} {} {} => {}",
            condition.param,
            condition.operator,
            condition.value,
            matched
        );
        matched
    }

    fn resolve_param(&self, param: &str, location: &dyn Location) -> Option<Value> {
        if let Some(func) = self.custom.get(param.trim()) {
            return Some(func(location));
        }
        Predicate::from_param(param).map(|predicate| predicate.resolve(location))
    }
}
