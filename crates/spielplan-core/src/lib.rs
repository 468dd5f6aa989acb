//! Core types: subjects, fixtures, normalization, aggregation, calendar export

pub mod aggregate;
pub mod dates;
pub mod fixture;
pub mod ics;
pub mod subject;
pub mod teams;
pub mod tracing;

pub use aggregate::{AggregatedFixture, AggregationWindow, FixtureQuery, aggregate, sort_fixtures};
pub use dates::{normalize_date, normalize_time};
pub use fixture::{Fixture, FixtureKey};
pub use ics::{ExportError, ExportOptions, MatchKind, export_calendar, fixture_title};
pub use subject::{Subject, split_areas};
pub use teams::{AgeCategory, clean_club_name, normalize_for_match};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
