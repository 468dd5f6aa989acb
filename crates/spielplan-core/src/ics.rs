//! Calendar export for selected fixtures.
//!
//! Serializes the `selected` aggregated fixtures into an iCalendar
//! (RFC 5545) document. Kickoff times are provider-local with no timezone
//! guarantee, so events are emitted as floating local times
//! (`DTSTART:YYYYMMDDTHHMMSS`).

use chrono::{Duration, NaiveTime};
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};
use thiserror::Error;

use crate::aggregate::AggregatedFixture;
use crate::subject::Subject;
use crate::teams::clean_club_name;

/// Errors refusing an export.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    /// No fixture is selected; an empty document is never emitted.
    #[error("no fixtures selected for export")]
    NothingSelected,
}

/// Kind of match, derived from the competition label by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    League,
    Cup,
    Friendly,
}

impl MatchKind {
    /// Classifies a competition label. Unknown or absent labels are
    /// league matches.
    pub fn from_competition(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::League;
        };
        let lower = label.to_lowercase();
        if lower.contains("pokal") || lower.contains("cup") {
            Self::Cup
        } else if lower.contains("freundschaft") || lower.contains("test") {
            Self::Friendly
        } else {
            Self::League
        }
    }

    /// Shorthand used in event titles.
    pub fn shorthand(&self) -> &'static str {
        match self {
            Self::League => "Liga",
            Self::Cup => "Pokal",
            Self::Friendly => "Test",
        }
    }
}

/// Options for calendar export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Start time used when the provider reported no kickoff time.
    /// A deliberate placeholder, not data loss.
    pub placeholder_time: NaiveTime,
    /// Fixed event duration in hours; the source data carries no real
    /// durations.
    pub duration_hours: i64,
    /// Calendar display name (X-WR-CALNAME).
    pub calendar_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            placeholder_time: NaiveTime::from_hms_opt(12, 0, 0).expect("valid placeholder time"),
            duration_hours: 2,
            calendar_name: "Spielplan".to_string(),
        }
    }
}

/// Serializes the selected fixtures into an iCalendar document.
///
/// `subjects` supplies league labels for senior fixture titles. Returns
/// [`ExportError::NothingSelected`] when nothing is selected; an export
/// is all-or-nothing per invocation.
pub fn export_calendar(
    fixtures: &[AggregatedFixture],
    subjects: &[Subject],
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let selected: Vec<&AggregatedFixture> =
        fixtures.iter().filter(|fixture| fixture.selected).collect();
    if selected.is_empty() {
        return Err(ExportError::NothingSelected);
    }

    let mut calendar = Calendar::new();
    calendar.name(&options.calendar_name);

    for fixture in selected {
        let start = fixture
            .date
            .and_time(fixture.time.unwrap_or(options.placeholder_time));
        let end = start + Duration::hours(options.duration_hours);

        let mut event = Event::new();
        event
            .summary(&fixture_title(fixture, subjects))
            .starts(CalendarDateTime::Floating(start))
            .ends(CalendarDateTime::Floating(end))
            .description(&format!("Spieler: {}", fixture.subject_names.join(", ")));
        if let Some(ref location) = fixture.location {
            event.location(location);
        }
        if let Some(ref url) = fixture.source_url {
            event.add_property("URL", url);
        }
        calendar.push(event.done());
    }

    Ok(calendar.to_string())
}

/// Builds the event title: category or league shorthand, match-type
/// shorthand, and the cleaned team names.
pub fn fixture_title(fixture: &AggregatedFixture, subjects: &[Subject]) -> String {
    let home = clean_club_name(&fixture.home_team);
    let away = clean_club_name(&fixture.away_team);
    let kind = MatchKind::from_competition(fixture.competition.as_deref());

    match category_label(fixture, subjects) {
        Some(label) => format!("{} {}: {} - {}", label, kind.shorthand(), home, away),
        None => format!("{}: {} - {}", kind.shorthand(), home, away),
    }
}

/// The title's leading shorthand: the age token for youth fixtures, else
/// the league label of the first contributing subject that has one.
fn category_label(fixture: &AggregatedFixture, subjects: &[Subject]) -> Option<String> {
    if let Some(label) = fixture.category.label() {
        return Some(label);
    }
    fixture.subject_ids.iter().find_map(|id| {
        subjects
            .iter()
            .find(|subject| subject.id == *id)
            .and_then(|subject| subject.category.clone())
            .filter(|category| !category.trim().is_empty())
    })
}
