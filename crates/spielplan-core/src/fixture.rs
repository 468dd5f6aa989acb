//! Fixture types for scheduled matches.
//!
//! A [`Fixture`] is one real-world scheduled match as fetched for one
//! subject. The same real-world match may exist as several rows when
//! several represented players are on the participating teams; the
//! read-time merge lives in [`crate::aggregate`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One scheduled match as known for one subject.
///
/// Team names, location, and competition labels are stored exactly as the
/// provider reported them; normalization happens only at matching time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Store-assigned identity. Not the dedup key.
    pub id: String,
    /// The subject this row was fetched for.
    pub subject_id: String,
    /// The subject's display name at fetch time.
    pub subject_name: String,
    /// Canonical calendar date of the match.
    pub date: NaiveDate,
    /// Kickoff time, provider-local, no timezone guarantee.
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// Home team name as reported.
    pub home_team: String,
    /// Away team name as reported.
    pub away_team: String,
    /// Venue, free text.
    #[serde(default)]
    pub location: Option<String>,
    /// Competition label ("Kreisliga A", "Pokal", ...), free text.
    #[serde(default)]
    pub competition: Option<String>,
    /// Matchday label ("5. Spieltag"), free text.
    #[serde(default)]
    pub matchday: Option<String>,
    /// Result, free text, present once the match is played.
    #[serde(default)]
    pub result: Option<String>,
    /// Deep link to the provider's fixture page.
    #[serde(default)]
    pub source_url: Option<String>,
    /// User intent to include this fixture in a calendar export.
    #[serde(default)]
    pub selected: bool,
}

impl Fixture {
    /// Creates a fixture with the required fields.
    pub fn new(
        id: impl Into<String>,
        subject_id: impl Into<String>,
        subject_name: impl Into<String>,
        date: NaiveDate,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            subject_id: subject_id.into(),
            subject_name: subject_name.into(),
            date,
            time: None,
            home_team: home_team.into(),
            away_team: away_team.into(),
            location: None,
            competition: None,
            matchday: None,
            result: None,
            source_url: None,
            selected: false,
        }
    }

    /// Builder method to set the kickoff time.
    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Builder method to set the venue.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the competition label.
    pub fn with_competition(mut self, competition: impl Into<String>) -> Self {
        self.competition = Some(competition.into());
        self
    }

    /// Builder method to set the matchday label.
    pub fn with_matchday(mut self, matchday: impl Into<String>) -> Self {
        self.matchday = Some(matchday.into());
        self
    }

    /// Builder method to set the result.
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Builder method to set the provider deep link.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Builder method to set the export selection flag.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// The identity under which this row is upserted.
    pub fn key(&self) -> FixtureKey {
        FixtureKey {
            subject_id: self.subject_id.clone(),
            date: self.date,
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
        }
    }
}

/// The upsert key: `(subject_id, date, home_team, away_team)`.
///
/// Unique within the store. Re-syncing unchanged provider data maps to the
/// same key and therefore to an update, never a duplicate row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FixtureKey {
    pub subject_id: String,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
}
