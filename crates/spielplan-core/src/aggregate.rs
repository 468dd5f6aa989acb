//! Read-time aggregation of fixture rows.
//!
//! The same real-world match is stored once per subscribed subject. This
//! module merges those rows into [`AggregatedFixture`] values for display
//! and export, applies the bounded forward-looking window, the editorial
//! sort order, and the client-side filter predicates.
//!
//! Aggregation is always recomputed from current rows; nothing here is
//! persisted.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Days, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::fixture::Fixture;
use crate::subject::Subject;
use crate::teams::{AgeCategory, normalize_for_match};

/// Forward-looking date window, `[start, start + days]` inclusive.
///
/// Rows outside the window are excluded entirely, not merely hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationWindow {
    pub start: NaiveDate,
    pub days: u64,
}

impl AggregationWindow {
    /// Default window length in days.
    pub const DEFAULT_DAYS: u64 = 35;

    /// The standard window: today through today + 35 days.
    pub fn from_today(today: NaiveDate) -> Self {
        Self {
            start: today,
            days: Self::DEFAULT_DAYS,
        }
    }

    /// Builder method to override the window length.
    pub fn with_days(mut self, days: u64) -> Self {
        self.days = days;
        self
    }

    /// Last date inside the window.
    pub fn end(&self) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(self.days))
            .unwrap_or(self.start)
    }

    /// Whether a date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }
}

/// One real-world match merged across the subjects that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedFixture {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    /// Team names from the first contributing row, verbatim.
    pub home_team: String,
    pub away_team: String,
    pub location: Option<String>,
    pub competition: Option<String>,
    pub matchday: Option<String>,
    pub result: Option<String>,
    pub source_url: Option<String>,
    /// Age grouping derived from the team names.
    pub category: AgeCategory,
    /// Distinct contributing subjects, in row order.
    pub subject_ids: Vec<String>,
    pub subject_names: Vec<String>,
    /// Store ids of the merged rows.
    pub fixture_ids: Vec<String>,
    /// True iff any merged row is selected for export.
    pub selected: bool,
}

impl AggregatedFixture {
    fn from_row(row: &Fixture) -> Self {
        Self {
            date: row.date,
            time: row.time,
            home_team: row.home_team.clone(),
            away_team: row.away_team.clone(),
            location: row.location.clone(),
            competition: row.competition.clone(),
            matchday: row.matchday.clone(),
            result: row.result.clone(),
            source_url: row.source_url.clone(),
            category: AgeCategory::of_match(&row.home_team, &row.away_team),
            subject_ids: vec![row.subject_id.clone()],
            subject_names: vec![row.subject_name.clone()],
            fixture_ids: vec![row.id.clone()],
            selected: row.selected,
        }
    }

    /// Merges a further row describing the same match.
    fn absorb(&mut self, row: &Fixture) {
        if !self.subject_ids.contains(&row.subject_id) {
            self.subject_ids.push(row.subject_id.clone());
        }
        if !self.subject_names.contains(&row.subject_name) {
            self.subject_names.push(row.subject_name.clone());
        }
        self.fixture_ids.push(row.id.clone());
        self.selected |= row.selected;

        // Later rows may carry detail the first one lacked.
        if self.location.is_none() {
            self.location = row.location.clone();
        }
        if self.competition.is_none() {
            self.competition = row.competition.clone();
        }
        if self.matchday.is_none() {
            self.matchday = row.matchday.clone();
        }
        if self.result.is_none() {
            self.result = row.result.clone();
        }
        if self.source_url.is_none() {
            self.source_url = row.source_url.clone();
        }
    }
}

/// Groups rows inside the window into deduplicated, sorted fixtures.
///
/// The bucket key is `(date, time-or-empty, sorted pair of normalized
/// team names)`: a home/away swap of the same two sides on the same date
/// and time lands in the same bucket.
pub fn aggregate(rows: &[Fixture], window: &AggregationWindow) -> Vec<AggregatedFixture> {
    let mut buckets: BTreeMap<(NaiveDate, String, String, String), AggregatedFixture> =
        BTreeMap::new();

    for row in rows.iter().filter(|row| window.contains(row.date)) {
        let mut pair = [
            normalize_for_match(&row.home_team),
            normalize_for_match(&row.away_team),
        ];
        pair.sort();
        let [first, second] = pair;
        let time = row.time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default();

        buckets
            .entry((row.date, time, first, second))
            .and_modify(|bucket| bucket.absorb(row))
            .or_insert_with(|| AggregatedFixture::from_row(row));
    }

    let mut merged: Vec<AggregatedFixture> = buckets.into_values().collect();
    sort_fixtures(&mut merged);
    merged
}

/// The editorial total order: date ascending; timed fixtures before
/// untimed, earlier kickoff first; then senior before youth, and among
/// youth the higher age number first (U19 before U17).
pub fn sort_fixtures(items: &mut [AggregatedFixture]) {
    items.sort_by(|a, b| {
        (a.date, a.time.is_none(), a.time, a.category.rank()).cmp(&(
            b.date,
            b.time.is_none(),
            b.time,
            b.category.rank(),
        ))
    });
}

/// Client-side filter predicates over aggregated fixtures.
#[derive(Debug, Clone, Default)]
pub struct FixtureQuery {
    /// Free-text search over team names, subject names, and location.
    pub text: Option<String>,
    /// Only fixtures referencing one of these subject ids.
    pub subject_ids: Option<HashSet<String>>,
    /// Only fixtures whose subjects cover one of these responsibility
    /// areas.
    pub areas: Option<HashSet<String>>,
}

impl FixtureQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the free-text filter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder method to restrict to specific subjects.
    pub fn with_subject_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subject_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method to restrict to responsibility areas.
    pub fn with_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.areas = Some(
            areas
                .into_iter()
                .map(|area| area.into().to_lowercase())
                .collect(),
        );
        self
    }

    /// Applies the query. `subjects` resolves responsibility areas for the
    /// area filter; subjects missing from the slice simply never match it.
    pub fn apply(
        &self,
        items: Vec<AggregatedFixture>,
        subjects: &[Subject],
    ) -> Vec<AggregatedFixture> {
        let areas_by_subject: HashMap<&str, Vec<String>> = subjects
            .iter()
            .map(|subject| {
                (
                    subject.id.as_str(),
                    subject
                        .areas()
                        .into_iter()
                        .map(|area| area.to_lowercase())
                        .collect(),
                )
            })
            .collect();

        items
            .into_iter()
            .filter(|item| self.matches(item, &areas_by_subject))
            .collect()
    }

    fn matches(
        &self,
        item: &AggregatedFixture,
        areas_by_subject: &HashMap<&str, Vec<String>>,
    ) -> bool {
        if let Some(ref needle) = self.text {
            let needle = needle.to_lowercase();
            let haystack_hit = item.home_team.to_lowercase().contains(&needle)
                || item.away_team.to_lowercase().contains(&needle)
                || item
                    .location
                    .as_ref()
                    .is_some_and(|location| location.to_lowercase().contains(&needle))
                || item
                    .subject_names
                    .iter()
                    .any(|name| name.to_lowercase().contains(&needle));
            if !haystack_hit {
                return false;
            }
        }

        if let Some(ref wanted) = self.subject_ids {
            if !item.subject_ids.iter().any(|id| wanted.contains(id)) {
                return false;
            }
        }

        if let Some(ref wanted_areas) = self.areas {
            let covered = item.subject_ids.iter().any(|id| {
                areas_by_subject
                    .get(id.as_str())
                    .is_some_and(|areas| areas.iter().any(|area| wanted_areas.contains(area)))
            });
            if !covered {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn row(
        id: &str,
        subject_id: &str,
        subject_name: &str,
        on: NaiveDate,
        at: Option<NaiveTime>,
        home: &str,
        away: &str,
    ) -> Fixture {
        let mut fixture = Fixture::new(id, subject_id, subject_name, on, home, away);
        fixture.time = at;
        fixture
    }

    fn today() -> NaiveDate {
        date(2025, 10, 1)
    }

    fn window() -> AggregationWindow {
        AggregationWindow::from_today(today())
    }

    mod window_bounds {
        use super::*;

        #[test]
        fn inclusive_on_both_ends() {
            let window = window();
            assert!(window.contains(today()));
            assert!(window.contains(date(2025, 11, 5))); // today + 35
            assert!(!window.contains(date(2025, 9, 30)));
            assert!(!window.contains(date(2025, 11, 6))); // today + 36
        }

        #[test]
        fn out_of_window_rows_are_excluded() {
            let rows = vec![
                row("a", "s1", "A", date(2025, 11, 6), None, "SV Nord", "SV Süd"),
                row("b", "s1", "A", date(2025, 9, 30), None, "SV Nord", "SV Süd"),
            ];
            assert!(aggregate(&rows, &window()).is_empty());
        }
    }

    mod dedup {
        use super::*;

        #[test]
        fn swapped_home_away_is_one_match() {
            let rows = vec![
                row(
                    "a",
                    "s1",
                    "Lena Meyer",
                    today(),
                    Some(time(15, 0)),
                    "SV Nord U17",
                    "FC Süd U17",
                ),
                row(
                    "b",
                    "s2",
                    "Jonas Brandt",
                    today(),
                    Some(time(15, 0)),
                    "FC Süd U17",
                    "SV Nord U17",
                ),
            ];
            let merged = aggregate(&rows, &window());
            assert_eq!(merged.len(), 1);
            assert_eq!(
                merged[0].subject_names,
                vec!["Lena Meyer", "Jonas Brandt"]
            );
            assert_eq!(merged[0].fixture_ids.len(), 2);
        }

        #[test]
        fn duplicate_subject_names_are_not_repeated() {
            let rows = vec![
                row("a", "s1", "Lena Meyer", today(), None, "SV Nord", "FC Süd"),
                row("b", "s1", "Lena Meyer", today(), None, "fc süd", "sv nord"),
            ];
            let merged = aggregate(&rows, &window());
            assert_eq!(merged.len(), 1);
            assert_eq!(merged[0].subject_names, vec!["Lena Meyer"]);
        }

        #[test]
        fn different_times_stay_separate() {
            let rows = vec![
                row(
                    "a",
                    "s1",
                    "A",
                    today(),
                    Some(time(13, 0)),
                    "SV Nord",
                    "FC Süd",
                ),
                row(
                    "b",
                    "s2",
                    "B",
                    today(),
                    Some(time(15, 0)),
                    "SV Nord",
                    "FC Süd",
                ),
            ];
            assert_eq!(aggregate(&rows, &window()).len(), 2);
        }

        #[test]
        fn selection_and_details_merge() {
            let mut first = row("a", "s1", "A", today(), None, "SV Nord", "FC Süd");
            first.selected = true;
            let mut second = row("b", "s2", "B", today(), None, "SV Nord", "FC Süd");
            second.location = Some("Sportpark Nord".to_string());

            let merged = aggregate(&[first, second], &window());
            assert_eq!(merged.len(), 1);
            assert!(merged[0].selected);
            assert_eq!(merged[0].location.as_deref(), Some("Sportpark Nord"));
        }
    }

    mod sort_order {
        use super::*;

        #[test]
        fn editorial_order_is_reproduced() {
            let rows = vec![
                row(
                    "u19",
                    "s1",
                    "A",
                    today(),
                    Some(time(15, 0)),
                    "SV Nord U19",
                    "FC Süd U19",
                ),
                row(
                    "senior",
                    "s2",
                    "B",
                    today(),
                    Some(time(15, 0)),
                    "SV Nord",
                    "FC Süd",
                ),
                row(
                    "u17",
                    "s3",
                    "C",
                    today(),
                    Some(time(15, 0)),
                    "SV Nord U17",
                    "FC Süd U17",
                ),
                row("open", "s4", "D", today(), None, "SV West", "SV Ost"),
            ];
            let merged = aggregate(&rows, &window());
            let ids: Vec<&str> = merged
                .iter()
                .map(|item| item.fixture_ids[0].as_str())
                .collect();
            assert_eq!(ids, vec!["senior", "u19", "u17", "open"]);
        }

        #[test]
        fn date_takes_precedence_over_time() {
            let rows = vec![
                row(
                    "later-day",
                    "s1",
                    "A",
                    date(2025, 10, 2),
                    Some(time(9, 0)),
                    "SV Nord",
                    "FC Süd",
                ),
                row(
                    "earlier-day",
                    "s2",
                    "B",
                    today(),
                    None,
                    "SV West",
                    "SV Ost",
                ),
            ];
            let merged = aggregate(&rows, &window());
            assert_eq!(merged[0].fixture_ids[0], "earlier-day");
        }
    }

    mod filters {
        use super::*;

        fn sample() -> Vec<AggregatedFixture> {
            let rows = vec![
                row(
                    "a",
                    "s1",
                    "Lena Meyer",
                    today(),
                    Some(time(15, 0)),
                    "TSG Hoffenheim U17",
                    "FC Bayern U17",
                ),
                row("b", "s2", "Jonas Brandt", today(), None, "SV Nord", "SV Süd"),
            ];
            aggregate(&rows, &window())
        }

        fn subjects() -> Vec<Subject> {
            vec![
                Subject::new("s1", "Lena Meyer").with_responsibility("Süd & West"),
                Subject::new("s2", "Jonas Brandt").with_responsibility("Nord"),
            ]
        }

        #[test]
        fn text_filter_matches_team_and_subject() {
            let query = FixtureQuery::new().with_text("hoffenheim");
            let hits = query.apply(sample(), &subjects());
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].subject_names, vec!["Lena Meyer"]);

            let query = FixtureQuery::new().with_text("jonas");
            assert_eq!(query.apply(sample(), &subjects()).len(), 1);

            let query = FixtureQuery::new().with_text("nothing-like-this");
            assert!(query.apply(sample(), &subjects()).is_empty());
        }

        #[test]
        fn subject_id_filter() {
            let query = FixtureQuery::new().with_subject_ids(["s2"]);
            let hits = query.apply(sample(), &subjects());
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].subject_ids, vec!["s2"]);
        }

        #[test]
        fn area_filter_uses_decomposed_values() {
            let query = FixtureQuery::new().with_areas(["West"]);
            let hits = query.apply(sample(), &subjects());
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].subject_ids, vec!["s1"]);

            let query = FixtureQuery::new().with_areas(["Ost"]);
            assert!(query.apply(sample(), &subjects()).is_empty());
        }

        #[test]
        fn empty_query_keeps_everything() {
            let query = FixtureQuery::new();
            assert_eq!(query.apply(sample(), &subjects()).len(), 2);
        }
    }
}
