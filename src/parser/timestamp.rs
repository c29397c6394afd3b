//! Lenient timestamp parsing for spreadsheet cells.
//!
//! Sheets hold timestamps in whatever format the CRM export produced.
//! Everything is reduced to a calendar day; anything unrecognised becomes
//! `None` instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %I:%M:%S %p",
    "%Y/%m/%d %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y"];

/// Format of the appointment-day column, e.g. "January 7, 2024"
const APPOINTMENT_DAY_FORMAT: &str = "%B %d, %Y";

/// Parse a creation timestamp down to its day
pub fn parse_timestamp(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
}

/// Parse an appointment day after stripping stray punctuation
pub fn parse_appointment_day(value: &str) -> Option<NaiveDate> {
    static STRAY: OnceLock<Regex> = OnceLock::new();
    let stray = STRAY.get_or_init(|| Regex::new(r"[^\w\s,]").expect("valid regex"));

    let cleaned = stray.replace_all(value.trim(), "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(cleaned, APPOINTMENT_DAY_FORMAT).ok()
}
