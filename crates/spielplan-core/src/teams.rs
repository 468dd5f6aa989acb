//! Team-name handling: match normalization, age categories, display cleaning.
//!
//! Stored team names are free text exactly as the provider reported them.
//! Two transforms exist on top, with different purposes and different
//! rules:
//!
//! - [`normalize_for_match`] builds dedup keys and never leaks into
//!   stored or displayed values.
//! - [`clean_club_name`] builds export titles and is deliberately
//!   opinionated about club prefixes and reserve sides.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// An age token embedded in a team name ("U17", "u19").
static AGE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[Uu](\d{1,2})\b").expect("Invalid age token regex"));

/// A whole token that is an age token.
static AGE_TOKEN_FULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[Uu](\d{1,2})$").expect("Invalid age token regex"));

/// A whole token marking a reserve/second side.
static RESERVE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)(2|3|ii|iii)$").expect("Invalid reserve token regex"));

/// A whole token that is a bare number, with or without a trailing dot
/// ("1899", "04", "1.").
static NUMBER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.?$").expect("Invalid number token regex"));

/// Club-type prefixes dropped from display names. Lowercase.
const CLUB_PREFIXES: &[&str] = &[
    "fc", "tsg", "tsv", "sv", "sc", "sg", "ssv", "fsv", "vfb", "vfl", "vfr", "spvgg", "tus", "djk",
    "jfv", "jsg",
];

/// Age grouping of a team or match, derived from team names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AgeCategory {
    /// No age token found: senior football.
    Senior,
    /// Youth side; `Youth(17)` is U17.
    Youth(u8),
}

impl AgeCategory {
    /// Detects the category from a single team name.
    pub fn from_team_name(name: &str) -> Self {
        AGE_TOKEN
            .captures(name)
            .and_then(|captures| captures[1].parse::<u8>().ok())
            .map_or(Self::Senior, Self::Youth)
    }

    /// Category of a match; the first age token across both sides wins.
    pub fn of_match(home: &str, away: &str) -> Self {
        match Self::from_team_name(home) {
            Self::Senior => Self::from_team_name(away),
            youth => youth,
        }
    }

    /// Editorial sort rank: senior first, then higher age numbers
    /// (U19 before U17 before U15). Smaller ranks sort first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Senior => 0,
            Self::Youth(age) => 200u8.saturating_sub(*age),
        }
    }

    /// Display label; `None` for senior sides.
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Senior => None,
            Self::Youth(age) => Some(format!("U{age}")),
        }
    }
}

/// Normalizes a team name for dedup matching only.
///
/// Strips age tokens, collapses whitespace, casefolds. The stored value is
/// never mutated. Known limit: two genuinely different age groups of the
/// same clubs playing at the same date and time merge into one bucket.
pub fn normalize_for_match(name: &str) -> String {
    let without_age = AGE_TOKEN.replace_all(name, " ");
    without_age
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Cleans a club name for export titles.
///
/// Drops club-type prefixes ("FC", "TSG", ...) and bare number tokens
/// ("1899", "04", "1."), removes age tokens, and detects reserve sides
/// (trailing "2"/"3"/"II"/"III" or a "U23" token), which append a "U23"
/// suffix. Falls back to the whitespace-collapsed input when cleaning
/// would consume the entire name.
pub fn clean_club_name(name: &str) -> String {
    let mut reserve = false;
    let mut kept: Vec<&str> = Vec::new();

    for token in name.split_whitespace() {
        if let Some(captures) = AGE_TOKEN_FULL.captures(token) {
            if captures[1].parse::<u8>().ok() == Some(23) {
                reserve = true;
            }
            continue;
        }
        if RESERVE_TOKEN.is_match(token) {
            reserve = true;
            continue;
        }
        if NUMBER_TOKEN.is_match(token) {
            continue;
        }
        if CLUB_PREFIXES.contains(&token.to_lowercase().as_str()) {
            continue;
        }
        kept.push(token);
    }

    let mut cleaned = if kept.is_empty() {
        name.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        kept.join(" ")
    };

    if reserve {
        cleaned.push_str(" U23");
    }
    cleaned
}
