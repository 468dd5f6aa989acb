//! Provider-reported fixture records.
//!
//! A [`ProviderFixture`] is a fixture as fetched for one team, with the
//! date already normalized but no subject attached yet; attaching the
//! subject is the caller's responsibility.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use spielplan_core::{Fixture, Subject};

/// One upcoming match as reported by the schedule provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFixture {
    /// Canonical calendar date.
    pub date: NaiveDate,
    /// Kickoff time, provider-local.
    #[serde(default)]
    pub time: Option<NaiveTime>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(default)]
    pub matchday: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

impl ProviderFixture {
    /// Creates a record with the required fields.
    pub fn new(date: NaiveDate, home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            date,
            time: None,
            home_team: home_team.into(),
            away_team: away_team.into(),
            location: None,
            competition: None,
            matchday: None,
            result: None,
            source_url: None,
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

    /// Attaches the subject this record was fetched for. The store
    /// assigns the row id on first insert.
    pub fn into_fixture(self, subject: &Subject) -> Fixture {
        let mut fixture = Fixture::new(
            "",
            &subject.id,
            &subject.name,
            self.date,
            self.home_team,
            self.away_team,
        );
        fixture.time = self.time;
        fixture.location = self.location;
        fixture.competition = self.competition;
        fixture.matchday = self.matchday;
        fixture.result = self.result;
        fixture.source_url = self.source_url;
        fixture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn subject_attachment() {
        let record = ProviderFixture::new(date(2025, 10, 25), "SV Nord", "FC Süd")
            .with_time(NaiveTime::from_hms_opt(15, 0, 0).unwrap())
            .with_location("Sportpark Nord");
        let subject = Subject::new("s-1", "Lena Meyer");

        let fixture = record.into_fixture(&subject);
        assert_eq!(fixture.subject_id, "s-1");
        assert_eq!(fixture.subject_name, "Lena Meyer");
        assert_eq!(fixture.home_team, "SV Nord");
        assert_eq!(fixture.location.as_deref(), Some("Sportpark Nord"));
        assert!(fixture.id.is_empty());
        assert!(!fixture.selected);
    }
}
