//! `spielplan select` / `unselect` commands.

use spielplan_store::{FixtureStore, JsonFixtureStore};

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Flags or unflags a fixture for export.
pub fn run(config: &ClientConfig, fixture_id: &str, selected: bool) -> ClientResult<()> {
    let store = JsonFixtureStore::open(config.fixtures_path())?;
    store.set_selected(fixture_id, selected)?;
    if selected {
        println!("Fixture {fixture_id} selected for export.");
    } else {
        println!("Fixture {fixture_id} removed from the export selection.");
    }
    Ok(())
}
