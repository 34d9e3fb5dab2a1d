//! The modifier registry and dispatcher.
//!
//! A modifier is a path segment of the form `name(args)`. Its arguments are
//! split on top-level commas and each one is resolved as an expression
//! against the same context before the modifier runs.
use crate::coerce::to_display_string;
use crate::engine::{EvaluationContext, process_expression};
use crate::error::ExprError;
use crate::replace;
use crate::syntax::{is_identifier, modifier_call, split_arguments};
use serde_json::Value;
use std::collections::HashMap;

mod array;
mod date;
mod logic;
mod number;
mod string;

/// The signature of a modifier implementation.
///
/// `value` is the value the modifier is applied to and `args` are the
/// already-resolved arguments.
pub type ModifierFn = fn(value: &Value, args: &[Value], e_ctx: &EvaluationContext<'_>) -> Value;

/// Name-to-implementation table. Lookups ignore ASCII case.
#[derive(Debug, Clone)]
pub struct ModifierRegistry {
    modifiers: HashMap<String, ModifierFn>,
}

impl ModifierRegistry {
    /// Creates an empty registry with no modifiers at all.
    pub fn empty() -> Self {
        Self {
            modifiers: HashMap::new(),
        }
    }

    /// Registers (or replaces) a modifier.
    pub fn register(&mut self, name: &str, func: ModifierFn) -> Result<(), ExprError> {
        if !is_identifier(name) {
            return Err(ExprError::InvalidModifierName(name.to_string()));
        }
        self.modifiers.insert(name.to_ascii_lowercase(), func);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ModifierFn> {
        self.modifiers.get(&name.to_ascii_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    fn builtin(&mut self, name: &'static str, func: ModifierFn) {
        self.modifiers.insert(name.to_ascii_lowercase(), func);
    }
}

impl Default for ModifierRegistry {
    /// Creates a registry populated with the built-in catalog.
    fn default() -> Self {
        let mut registry = Self::empty();

        // Date
        registry.builtin("format", date::format);
        registry.builtin("dateFormat", date::format);

        // Number
        registry.builtin("numberFormat", number::number_format);
        registry.builtin("toInt", number::to_int);
        registry.builtin("ceil", number::ceil);
        registry.builtin("floor", number::floor);
        registry.builtin("round", number::round);

        // String
        registry.builtin("toUpperCase", string::to_upper_case);
        registry.builtin("toLowerCase", string::to_lower_case);
        registry.builtin("toString", string::to_string);
        registry.builtin("trim", string::trim);
        registry.builtin("ltrim", string::ltrim);
        registry.builtin("rtrim", string::rtrim);
        registry.builtin("toSlug", string::to_slug);
        registry.builtin("truncateChars", string::truncate_chars);
        registry.builtin("truncateWords", string::truncate_words);
        registry.builtin("concat", string::concat);
        registry.builtin("stripTags", string::strip_tags);
        registry.builtin("split", string::split);
        registry.builtin("urlEncode", string::url_encode);
        registry.builtin("urlDecode", string::url_decode);

        // Boolean & comparison
        registry.builtin("toBool", logic::to_bool);
        registry.builtin("less", logic::less);
        registry.builtin("lessOrEqual", logic::less_or_equal);
        registry.builtin("greater", logic::greater);
        registry.builtin("greaterOrEqual", logic::greater_or_equal);
        registry.builtin("equal", logic::equal);

        // Array
        registry.builtin("join", array::join);
        registry.builtin("length", array::length);
        registry.builtin("reverse", array::reverse);
        registry.builtin("at", array::at);
        registry.builtin("slice", array::slice);
        registry.builtin("indexOf", array::index_of);
        registry.builtin("includes", array::includes);
        registry.builtin("pluck", array::pluck);

        // Structural
        registry.builtin("applyData", apply_data);

        registry
    }
}

/// Applies one `name(args)` modifier to `value`.
///
/// A malformed invocation leaves the value unchanged; an unknown name yields
/// `Null` so callers can tell the two apart.
pub fn apply_modifier(value: &Value, modifier: &str, e_ctx: &EvaluationContext<'_>) -> Value {
    let Some((name, raw_args)) = modifier_call(modifier) else {
        return value.clone();
    };
    let Some(func) = e_ctx.modifiers.get(name) else {
        log::debug!("Unknown modifier '{}' in '{}'", name, modifier);
        return Value::Null;
    };
    if e_ctx.nesting >= e_ctx.config.max_argument_depth {
        log::warn!(
            "Modifier arguments nested deeper than {}, '{}' resolves to null",
            e_ctx.config.max_argument_depth,
            name
        );
        return Value::Null;
    }

    let arg_ctx = e_ctx.argument();
    let args: Vec<Value> = split_arguments(raw_args)
        .into_iter()
        .map(|arg| process_expression(arg, &arg_ctx))
        .collect();

    func(value, &args, e_ctx)
}

fn apply_data(value: &Value, _args: &[Value], e_ctx: &EvaluationContext<'_>) -> Value {
    if e_ctx.depth >= e_ctx.config.max_apply_depth {
        log::warn!(
            "applyData nesting reached the limit of {}, leaving value unresolved",
            e_ctx.config.max_apply_depth
        );
        return value.clone();
    }
    replace::type_safe_replacement(value, &e_ctx.nested())
}

// --- Argument helpers ---

/// The argument at `index`, treating `Null` as absent.
fn arg(args: &[Value], index: usize) -> Option<&Value> {
    args.get(index).filter(|v| !v.is_null())
}

fn arg_string(args: &[Value], index: usize) -> Option<String> {
    arg(args, index).map(to_display_string)
}

fn arg_integer(args: &[Value], index: usize) -> Option<i64> {
    arg(args, index).and_then(crate::coerce::as_integer)
}

fn arg_or(args: &[Value], index: usize, default: Value) -> Value {
    arg(args, index).cloned().unwrap_or(default)
}
