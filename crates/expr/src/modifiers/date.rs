//! `format()` / `dateFormat()`: PHP-style date patterns over epoch or date-string input.
use super::arg_string;
use crate::coerce::as_datetime;
use crate::config::DateLocale;
use crate::engine::EvaluationContext;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use serde_json::Value;

pub(super) fn format(value: &Value, args: &[Value], e_ctx: &EvaluationContext<'_>) -> Value {
    if !matches!(value, Value::Number(_) | Value::String(_)) {
        return value.clone();
    }
    let Some(moment) = as_datetime(value) else {
        log::debug!("Cannot format {} as a date", value);
        return value.clone();
    };
    let pattern = arg_string(args, 0).unwrap_or_else(|| e_ctx.config.date_format.clone());
    Value::String(render(&moment, &pattern, &e_ctx.config.locale))
}

/// Renders `pattern` where each letter stands for a date part, as in PHP's `date()`.
/// A backslash emits the next character literally; unknown characters are copied.
pub fn render(moment: &DateTime<FixedOffset>, pattern: &str, locale: &DateLocale) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        let part = match ch {
            '\\' => {
                out.extend(chars.next());
                continue;
            }
            // Day
            'd' => format!("{:02}", moment.day()),
            'D' => locale.weekday(moment.weekday().num_days_from_sunday(), true).to_string(),
            'j' => moment.day().to_string(),
            'l' => locale.weekday(moment.weekday().num_days_from_sunday(), false).to_string(),
            'N' => moment.weekday().number_from_monday().to_string(),
            'S' => ordinal_suffix(moment.day()).to_string(),
            'w' => moment.weekday().num_days_from_sunday().to_string(),
            'z' => moment.ordinal0().to_string(),
            // Week
            'W' => format!("{:02}", moment.iso_week().week()),
            // Month
            'F' => locale.month(moment.month(), false).to_string(),
            'M' => locale.month(moment.month(), true).to_string(),
            'm' => format!("{:02}", moment.month()),
            'n' => moment.month().to_string(),
            't' => days_in_month(moment.year(), moment.month()).to_string(),
            // Year
            'L' => u8::from(is_leap_year(moment.year())).to_string(),
            'o' => moment.iso_week().year().to_string(),
            'Y' => moment.year().to_string(),
            'y' => format!("{:02}", moment.year().rem_euclid(100)),
            // Time
            'a' => locale.meridiem(moment.hour12().0).to_string(),
            'A' => locale.meridiem(moment.hour12().0).to_uppercase(),
            'g' => moment.hour12().1.to_string(),
            'G' => moment.hour().to_string(),
            'h' => format!("{:02}", moment.hour12().1),
            'H' => format!("{:02}", moment.hour()),
            'i' => format!("{:02}", moment.minute()),
            's' => format!("{:02}", moment.second()),
            'u' => format!("{:06}", moment.nanosecond() / 1_000),
            'v' => format!("{:03}", moment.nanosecond() / 1_000_000),
            // Timezone
            'e' | 'T' => zone_name(moment.offset()),
            'O' => offset_string(moment.offset(), ""),
            'P' => offset_string(moment.offset(), ":"),
            'p' => match moment.offset().local_minus_utc() {
                0 => "Z".to_string(),
                _ => offset_string(moment.offset(), ":"),
            },
            'Z' => moment.offset().local_minus_utc().to_string(),
            // Full date/time
            'c' => render(moment, "Y-m-d\\TH:i:sP", locale),
            'r' => render(moment, "D, d M Y H:i:s O", &DateLocale::default()),
            'U' => moment.timestamp().to_string(),
            other => {
                out.push(other);
                continue;
            }
        };
        out.push_str(&part);
    }

    out
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

fn offset_string(offset: &FixedOffset, separator: &str) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("{}{:02}{}{:02}", sign, minutes / 60, separator, minutes % 60)
}

fn zone_name(offset: &FixedOffset) -> String {
    match offset.local_minus_utc() {
        0 => "UTC".to_string(),
        _ => offset_string(offset, ":"),
    }
}
