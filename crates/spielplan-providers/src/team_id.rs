//! Team identifier extraction from profile references.
//!
//! A subject's profile reference is an opaque URL into the schedule
//! provider. The team identifier needed for fixture queries is embedded
//! in it in one of two shapes; anything else is a skip signal for the
//! sync pass, never an error.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Identifier following the well-known `/team-id/` path segment.
static EXPLICIT_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/team-id/([0-9A-Za-z-]+)").expect("Invalid team-id segment regex")
});

/// Fallback: a long alphanumeric token ending the path.
static TRAILING_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([0-9A-Za-z]{20,})/?$").expect("Invalid trailing token regex"));

/// Opaque provider-specific team identifier.
///
/// Derived from a profile reference, never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the team identifier from a profile reference.
///
/// Tries the explicit `/team-id/<id>` segment first, then a trailing
/// long alphanumeric path token. Returns `None` when neither pattern
/// matches or the input is empty; callers treat this as a skip.
pub fn extract_team_id(profile_ref: &str) -> Option<TeamId> {
    let trimmed = profile_ref.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Work on the path when the reference parses as a URL; profile
    // references are not guaranteed to, so fall back to the raw string.
    let path = Url::parse(trimmed)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| trimmed.to_string());

    if let Some(captures) = EXPLICIT_SEGMENT.captures(&path) {
        return Some(TeamId(captures[1].to_string()));
    }

    TRAILING_TOKEN
        .captures(&path)
        .map(|captures| TeamId(captures[1].to_string()))
}
