//! Show/hide conditions for snippets and blocks.
//!
//! A [`ConditionFilter`] is a fixed three-level tree: the filter (`showif` or
//! `hideif`) holds AND-scopes, and each scope holds OR-conditions. Each
//! condition compares one location signal (page type, post type, user role,
//! device, URL, ...) with a stored value through an [`Operator`].
//!
//! ```
//! use etchkit_conditions::{ConditionEvaluator, ConditionFilter, RequestLocation};
//!
//! let filter = ConditionFilter::from_json(r#"{
//!     "type": "showif",
//!     "conditions": [{ "conditions": [
//!         { "param": "location_post_type", "operator": "equals", "value": "product" }
//!     ] }]
//! }"#).unwrap();
//!
//! let location = RequestLocation { post_type: Some("product".into()), ..Default::default() };
//! assert!(ConditionEvaluator::new().evaluate(&filter, &location));
//! ```

pub mod error;
pub mod evaluator;
pub mod location;
pub mod model;
mod operators;
pub mod predicates;

// --- Public API ---
pub use error::ConditionError;
pub use evaluator::ConditionEvaluator;
pub use location::{DeviceType, Location, RequestLocation};
pub use model::{AndScope, Condition, ConditionFilter, FilterType, Operator};
pub use predicates::{Predicate, PredicateFn};
