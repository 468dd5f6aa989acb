//! Alias-list field mapping for provider records.
//!
//! The provider's field names vary by response version. Instead of
//! scattering conditionals, each logical field is read through an ordered
//! list of candidate names, first non-empty match wins; format drift
//! stays in this one table.

use serde_json::Value;
use spielplan_core::{normalize_date, normalize_time};
use tracing::debug;

use crate::raw_fixture::ProviderFixture;

pub const HOME_TEAM_ALIASES: &[&str] =
    &["homeTeam", "home_team", "home", "heimmannschaft", "heim"];
pub const AWAY_TEAM_ALIASES: &[&str] =
    &["awayTeam", "away_team", "away", "gastmannschaft", "gast"];
pub const DATE_ALIASES: &[&str] = &["date", "matchDate", "kickoffDate", "datum", "spieldatum"];
pub const TIME_ALIASES: &[&str] = &["time", "matchTime", "kickoffTime", "uhrzeit", "anstoss"];
pub const LOCATION_ALIASES: &[&str] = &["location", "venue", "spielort", "ort"];
pub const COMPETITION_ALIASES: &[&str] = &["competition", "league", "staffel", "wettbewerb"];
pub const MATCHDAY_ALIASES: &[&str] = &["matchday", "round", "spieltag"];
pub const RESULT_ALIASES: &[&str] = &["result", "score", "ergebnis"];
pub const URL_ALIASES: &[&str] = &["url", "link", "matchUrl", "spielbericht"];

/// Reads the first non-empty candidate field from a JSON record.
///
/// String values are trimmed; integer values are accepted and rendered
/// (some response versions report matchdays as numbers). Other value
/// types are skipped.
pub fn pick_string(record: &Value, aliases: &[&str]) -> Option<String> {
    let object = record.as_object()?;
    for alias in aliases {
        let Some(value) = object.get(*alias) else {
            continue;
        };
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => continue,
        };
        if !text.is_empty() {
            return Some(text);
        }
    }
    None
}

/// Maps one provider record into a [`ProviderFixture`].
///
/// Records missing a team name or whose date does not normalize map to
/// `None` and are excluded from the result entirely, never returned as
/// partial records.
pub fn map_record(record: &Value) -> Option<ProviderFixture> {
    let Some(home_team) = pick_string(record, HOME_TEAM_ALIASES) else {
        debug!("dropping record without a home team");
        return None;
    };
    let Some(away_team) = pick_string(record, AWAY_TEAM_ALIASES) else {
        debug!("dropping record without an away team");
        return None;
    };
    let Some(raw_date) = pick_string(record, DATE_ALIASES) else {
        debug!(home = %home_team, away = %away_team, "dropping record without a date");
        return None;
    };
    let Some(date) = normalize_date(&raw_date) else {
        debug!(raw = %raw_date, home = %home_team, "dropping record with unparseable date");
        return None;
    };

    let mut fixture = ProviderFixture::new(date, home_team, away_team);
    fixture.time = pick_string(record, TIME_ALIASES).and_then(|raw| normalize_time(&raw));
    fixture.location = pick_string(record, LOCATION_ALIASES);
    fixture.competition = pick_string(record, COMPETITION_ALIASES);
    fixture.matchday = pick_string(record, MATCHDAY_ALIASES);
    fixture.result = pick_string(record, RESULT_ALIASES);
    fixture.source_url = pick_string(record, URL_ALIASES);
    Some(fixture)
}
