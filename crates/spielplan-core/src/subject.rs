//! Subject types for represented players.
//!
//! A [`Subject`] is a represented player whose fixtures this pipeline
//! tracks. Subjects are owned by the player-record collaborator and are
//! strictly read-only here; a sync pass never writes them back.

use serde::{Deserialize, Serialize};

/// A represented player whose fixtures are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier within the player records.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Link to the player's team profile on the schedule provider, if any.
    #[serde(default)]
    pub profile_url: Option<String>,
    /// Age-category or league label ("U17", "Herren", ...), used for
    /// grouping and export titles.
    #[serde(default)]
    pub category: Option<String>,
    /// Delimiter-joined areas of responsibility (e.g. "Süd & West").
    #[serde(default)]
    pub responsibility: Option<String>,
}

impl Subject {
    /// Creates a new subject with the given id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            profile_url: None,
            category: None,
            responsibility: None,
        }
    }

    /// Builder method to set the provider profile URL.
    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }

    /// Builder method to set the age-category/league label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder method to set the responsibility string.
    pub fn with_responsibility(mut self, responsibility: impl Into<String>) -> Self {
        self.responsibility = Some(responsibility.into());
        self
    }

    /// Returns true if the subject carries a non-empty profile reference.
    ///
    /// Only such subjects participate in a sync pass.
    pub fn has_profile(&self) -> bool {
        self.profile_url
            .as_ref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// The subject's areas of responsibility as discrete values.
    pub fn areas(&self) -> Vec<String> {
        self.responsibility
            .as_deref()
            .map(split_areas)
            .unwrap_or_default()
    }
}

/// Splits a delimiter-joined responsibility string into discrete areas.
///
/// Delimiters are comma and ampersand; surrounding whitespace is trimmed
/// and empty segments are dropped.
pub fn split_areas(raw: &str) -> Vec<String> {
    raw.split([',', '&'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_profile_check() {
        let subject = Subject::new("s-1", "Lena Meyer")
            .with_profile_url("https://www.fussball.de/verein/x/-/team-id/ABC123")
            .with_category("U17")
            .with_responsibility("Süd & West");

        assert!(subject.has_profile());
        assert_eq!(subject.category.as_deref(), Some("U17"));
    }

    #[test]
    fn blank_profile_does_not_count() {
        let subject = Subject::new("s-2", "Jonas Brandt");
        assert!(!subject.has_profile());

        let subject = subject.with_profile_url("   ");
        assert!(!subject.has_profile());
    }

    #[test]
    fn areas_split_on_ampersand() {
        assert_eq!(split_areas("Süd & West"), vec!["Süd", "West"]);
    }

    #[test]
    fn areas_split_on_comma() {
        assert_eq!(split_areas("Nord, Ost"), vec!["Nord", "Ost"]);
    }

    #[test]
    fn areas_mixed_delimiters_and_noise() {
        assert_eq!(
            split_areas(" Süd ,  West &  , Nord "),
            vec!["Süd", "West", "Nord"]
        );
        assert!(split_areas("  ").is_empty());
    }

    #[test]
    fn areas_from_subject() {
        let subject = Subject::new("s-3", "Tim Krause").with_responsibility("Nord, Ost");
        assert_eq!(subject.areas(), vec!["Nord", "Ost"]);

        let bare = Subject::new("s-4", "Ali Demir");
        assert!(bare.areas().is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let subject = Subject::new("s-1", "Lena Meyer").with_category("U19");
        let json = serde_json::to_string(&subject).unwrap();
        let parsed: Subject = serde_json::from_str(&json).unwrap();
        assert_eq!(subject, parsed);
    }
}
