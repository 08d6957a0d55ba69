//! Calendar date-key normalization.
//!
//! # Responsibility
//! - Map store date strings to canonical `YYYY-MM-DD` keys.
//!
//! # Invariants
//! - Instants carrying an offset are converted to the local timezone before
//!   the date is taken; naive datetimes are already local wall-clock time.
//! - Input that cannot be recognized is returned unchanged. This is lossy:
//!   an unknown locale format ends up under its own raw key.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical key format.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

// `2024년 3월 10일`, optionally followed by time text such as `오후 7:00`.
static KOREAN_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})\s*년\s*(\d{1,2})\s*월\s*(\d{1,2})\s*일").expect("valid korean date regex")
});
// `2024. 3. 10.` and `2024/3/10`.
static SEPARATED_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})\s*([./])\s*(\d{1,2})\s*[./]\s*(\d{1,2})\.?(?:\s|$)")
        .expect("valid separated date regex")
});

/// Returns the canonical `YYYY-MM-DD` key for `raw`, or `raw` unchanged when
/// no supported format matches.
pub fn date_key(raw: &str) -> String {
    match parse_local_date(raw) {
        Some(date) => date.format(DATE_KEY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Parses the local calendar date of `raw`.
///
/// Returns `None` for blank, unrecognized or impossible dates.
pub fn parse_local_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Local).date_naive());
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(instant) = DateTime::parse_from_str(value, format) {
            return Some(instant.with_timezone(&Local).date_naive());
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(value, format) {
            return Some(local.date());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_KEY_FORMAT) {
        return Some(date);
    }

    parse_locale_date(value)
}

fn parse_locale_date(value: &str) -> Option<NaiveDate> {
    let (year, month, day) = if let Some(caps) = KOREAN_DATE_RE.captures(value) {
        (caps.get(1)?, caps.get(2)?, caps.get(3)?)
    } else if let Some(caps) = SEPARATED_DATE_RE.captures(value) {
        (caps.get(1)?, caps.get(3)?, caps.get(4)?)
    } else {
        return None;
    };

    NaiveDate::from_ymd_opt(
        year.as_str().parse().ok()?,
        month.as_str().parse().ok()?,
        day.as_str().parse().ok()?,
    )
}
