//! Normalization of provider-reported dates and times.
//!
//! The schedule provider reports dates in several locale conventions,
//! depending on response version and page origin. Everything is funneled
//! through [`normalize_date`] before a fixture may be stored; a fixture
//! without a valid date is not storable.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

/// Two-digit years below the pivot are 2000s, at or above are 1900s.
const PIVOT_YEAR: u32 = 50;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("Invalid ISO date regex"));

/// Leading weekday abbreviation, e.g. "Sa, " or "Mo., ".
static WEEKDAY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}\.?\s*,\s*").expect("Invalid weekday prefix regex")
});

static DOTTED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{2}|\d{4})$").expect("Invalid dotted date regex")
});

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}):(\d{2})").expect("Invalid clock time regex"));

/// Normalizes a provider-reported date string into a calendar date.
///
/// Accepted conventions:
/// - canonical ISO: `2025-10-25`
/// - day-first dotted, optional weekday abbreviation: `25.10.2025`,
///   `Sa, 25.10.2025`
/// - day-first dotted with a 2-digit year: `25.10.25` (pivot 50:
///   `00`–`49` map to the 2000s, `50`–`99` to the 1900s)
///
/// Returns `None` for anything else, including impossible calendar dates.
/// Never panics; callers log and drop the record.
pub fn normalize_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if ISO_DATE.is_match(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok();
    }

    let without_weekday = WEEKDAY_PREFIX.replace(trimmed, "");
    let captures = DOTTED_DATE.captures(without_weekday.trim())?;

    let day: u32 = captures[1].parse().ok()?;
    let month: u32 = captures[2].parse().ok()?;
    let raw_year = &captures[3];
    let year: i32 = if raw_year.len() == 2 {
        let short: u32 = raw_year.parse().ok()?;
        if short < PIVOT_YEAR {
            2000 + short as i32
        } else {
            1900 + short as i32
        }
    } else {
        raw_year.parse().ok()?
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Extracts a kickoff time from a provider-reported string.
///
/// Tolerates suffixes such as `"15:00 Uhr"`; only the first `HH:MM`
/// occurrence counts. Returns `None` when no valid clock time is present.
pub fn normalize_time(input: &str) -> Option<NaiveTime> {
    let captures = CLOCK_TIME.captures(input)?;
    let hour: u32 = captures[1].parse().ok()?;
    let minute: u32 = captures[2].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}
