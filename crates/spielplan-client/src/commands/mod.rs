//! Command implementations.

pub mod cleanup;
pub mod export;
pub mod list;
pub mod select;
pub mod sync;
pub mod token;

use chrono::Local;
use spielplan_core::{AggregatedFixture, AggregationWindow, Subject, aggregate};
use spielplan_store::{FixtureStore, JsonFixtureStore, JsonSubjectSource, SubjectSource};

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Loads the aggregated view of the upcoming window plus the subjects
/// needed to resolve filters and titles.
pub(crate) fn load_view(
    config: &ClientConfig,
) -> ClientResult<(Vec<AggregatedFixture>, Vec<Subject>)> {
    let store = JsonFixtureStore::open(config.fixtures_path())?;
    let subjects = JsonSubjectSource::new(config.subjects_path()).subjects()?;

    let today = Local::now().date_naive();
    let window = AggregationWindow::from_today(today).with_days(config.window_days);
    let rows = store.in_window(window.start, window.end())?;

    Ok((aggregate(&rows, &window), subjects))
}
