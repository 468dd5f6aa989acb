//! `spielplan cleanup` command.

use chrono::Local;
use spielplan_store::{FixtureStore, JsonFixtureStore};

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Deletes fixtures dated before today.
pub fn run(config: &ClientConfig) -> ClientResult<()> {
    let store = JsonFixtureStore::open(config.fixtures_path())?;
    let today = Local::now().date_naive();
    let removed = store.delete_before(today)?;
    println!("Removed {removed} past fixtures.");
    Ok(())
}
