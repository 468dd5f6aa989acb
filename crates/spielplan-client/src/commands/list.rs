//! `spielplan list` command.

use spielplan_core::FixtureQuery;

use crate::config::ClientConfig;
use crate::error::ClientResult;

use super::load_view;

/// Prints the aggregated fixtures of the upcoming window.
pub fn run(
    config: &ClientConfig,
    query: Option<String>,
    subjects_filter: Vec<String>,
    areas: Vec<String>,
    json: bool,
) -> ClientResult<()> {
    let (items, subjects) = load_view(config)?;

    let mut fixture_query = FixtureQuery::new();
    if let Some(text) = query {
        fixture_query = fixture_query.with_text(text);
    }
    if !subjects_filter.is_empty() {
        fixture_query = fixture_query.with_subject_ids(subjects_filter);
    }
    if !areas.is_empty() {
        fixture_query = fixture_query.with_areas(areas);
    }
    let items = fixture_query.apply(items, &subjects);

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No fixtures in the next {} days.", config.window_days);
        return Ok(());
    }

    for item in &items {
        let marker = if item.selected { "*" } else { " " };
        let kickoff = item
            .time
            .map(|time| time.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string());
        println!(
            "{} {} {}  {} - {}  [{}]  ({})",
            marker,
            item.date,
            kickoff,
            item.home_team,
            item.away_team,
            item.subject_names.join(", "),
            item.fixture_ids.join(", ")
        );
    }

    Ok(())
}
