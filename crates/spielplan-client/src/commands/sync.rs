//! `spielplan sync` command.

use std::sync::Arc;
use std::time::Duration;

use spielplan_providers::{FussballProvider, RelayClient, RelayConfig};
use spielplan_store::{JsonFixtureStore, JsonSubjectSource, SubjectSource, TomlSettings};
use spielplan_sync::SyncOrchestrator;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Runs one sync pass and prints the summary.
pub async fn run(config: &ClientConfig) -> ClientResult<()> {
    let relay_config =
        RelayConfig::new(&config.relay_url)?.with_timeout(Duration::from_secs(config.timeout));
    let provider = FussballProvider::new(RelayClient::new(relay_config)?);

    let fixtures = Arc::new(JsonFixtureStore::open(config.fixtures_path())?);
    let settings = Arc::new(TomlSettings::new(config.settings_path()));
    let subjects = JsonSubjectSource::new(config.subjects_path()).subjects_with_profile()?;

    let orchestrator = SyncOrchestrator::new(Arc::new(provider), fixtures, settings);
    let report = orchestrator
        .run(&subjects, |progress| {
            println!(
                "[{}/{}] {}",
                progress.current, progress.total, progress.subject_name
            );
        })
        .await?;

    println!();
    println!(
        "{} added, {} updated ({} subjects)",
        report.added, report.updated, report.subjects_processed
    );
    if report.failed_upserts > 0 {
        println!("{} fixtures could not be written", report.failed_upserts);
    }
    for warning in &report.warnings {
        println!("warning: {}: {}", warning.subject_name, warning.message);
    }

    Ok(())
}
