//! `spielplan export` command.

use std::path::Path;

use spielplan_core::{ExportOptions, export_calendar};

use crate::config::ClientConfig;
use crate::error::ClientResult;

use super::load_view;

/// Writes the selected fixtures as an iCalendar file.
///
/// Refuses when nothing is selected; no file is written in that case.
pub fn run(config: &ClientConfig, output: &Path) -> ClientResult<()> {
    let (items, subjects) = load_view(config)?;

    let document = export_calendar(&items, &subjects, &ExportOptions::default())?;
    std::fs::write(output, document)?;

    let count = items.iter().filter(|item| item.selected).count();
    println!("Exported {} fixtures to {}", count, output.display());
    Ok(())
}
