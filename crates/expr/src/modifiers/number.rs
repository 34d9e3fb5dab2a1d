//! Number modifiers. Non-numeric input is returned unchanged; numeric strings count as numbers.
use super::{arg_integer, arg_string};
use crate::coerce::{as_integer, as_number, integer_value};
use crate::engine::EvaluationContext;
use serde_json::Value;

pub(super) fn number_format(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    let Some(number) = as_number(value) else {
        return value.clone();
    };
    let decimals = arg_integer(args, 0).unwrap_or(0).clamp(0, 20) as usize;
    let dec_point = arg_string(args, 1).unwrap_or_else(|| ".".to_string());
    let thousands = arg_string(args, 2).unwrap_or_else(|| ",".to_string());
    Value::String(format_number(number, decimals, &dec_point, &thousands))
}

/// Fixed-point formatting with digit grouping; rounds half away from zero.
pub(crate) fn format_number(number: f64, decimals: usize, dec_point: &str, thousands: &str) -> String {
    let factor = 10f64.powi(decimals as i32);
    let mut rounded = (number * factor).round() / factor;
    if rounded == 0.0 {
        rounded = 0.0;
    }

    let text = format!("{:.*}", decimals, rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let digits: Vec<char> = int_part.chars().collect();
    let mut formatted = String::with_capacity(text.len() + digits.len() / 3 * thousands.len() + 1);
    if rounded < 0.0 {
        formatted.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push_str(thousands);
        }
        formatted.push(*digit);
    }
    if decimals > 0 {
        formatted.push_str(dec_point);
        formatted.push_str(frac_part);
    }
    formatted
}

pub(super) fn to_int(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    as_integer(value).map(Value::from).unwrap_or_else(|| value.clone())
}

pub(super) fn ceil(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    as_number(value)
        .map(|n| integer_value(n.ceil()))
        .unwrap_or_else(|| value.clone())
}

pub(super) fn floor(value: &Value, _args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    as_number(value)
        .map(|n| integer_value(n.floor()))
        .unwrap_or_else(|| value.clone())
}

/// `round(precision)`; a negative precision rounds to tens, hundreds, ...
pub(super) fn round(value: &Value, args: &[Value], _e_ctx: &EvaluationContext<'_>) -> Value {
    let Some(number) = as_number(value) else {
        return value.clone();
    };
    let precision = arg_integer(args, 0).unwrap_or(0).clamp(-15, 15) as i32;
    let factor = 10f64.powi(precision);
    let rounded = (number * factor).round() / factor;
    if precision <= 0 {
        integer_value(rounded)
    } else {
        Value::from(rounded)
    }
}
