use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

/// Parses a launch date in `YYYY-MM-DD` form. Surrounding whitespace is ignored.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

fn parse_bound_date(raw: &str) -> Option<Date> {
    parse_date(raw).or_else(|| Date::parse(raw, format_description!("[year]/[month]/[day]")).ok())
}

fn parse_bound_time(raw: &str) -> Option<Time> {
    Time::parse(raw, format_description!("[hour]:[minute]:[second]"))
        .or_else(|_| Time::parse(raw, format_description!("[hour]:[minute]")))
        .ok()
}

/// Parses a range bound supplied by a caller.
///
/// Accepts `YYYY-MM-DD` or `YYYY/MM/DD`, taken as midnight, optionally
/// followed by `HH:MM` or `HH:MM:SS` after a space or `T`.
#[must_use]
pub fn parse_date_bound(raw: &str) -> Option<PrimitiveDateTime> {
    let raw = raw.trim();
    if let Some(date) = parse_bound_date(raw) {
        return Some(PrimitiveDateTime::new(date, Time::MIDNIGHT));
    }
    let (date, time) = raw.split_once([' ', 'T'])?;
    Some(PrimitiveDateTime::new(
        parse_bound_date(date)?,
        parse_bound_time(time.trim())?,
    ))
}

/// Parses a price in millions, tolerating thousands separators and a
/// leading `$`.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|&c| c != ',').collect();
    let cleaned = cleaned.trim();
    let cleaned = cleaned.strip_prefix('$').unwrap_or(cleaned).trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}
