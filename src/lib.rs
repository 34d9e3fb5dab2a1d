//! Dynamic expressions and display conditions for page-builder content.
//!
//! The resolver lives in [`etchkit_expr`] and the condition evaluator in
//! [`etchkit_conditions`]; this crate re-exports both and adds file loading
//! for the `etchkit` command line tool.

pub mod config;
pub mod error;

pub use config::{Config, load_conditions, load_context, load_location};
pub use error::EtchError;

pub use etchkit_conditions::{
    ConditionEvaluator, ConditionFilter, DeviceType, FilterType, Location, Operator,
    RequestLocation,
};
pub use etchkit_expr::{
    Context, EngineConfig, ExpressionEngine, ModifierFn, ModifierRegistry, is_dynamic_expression,
};
