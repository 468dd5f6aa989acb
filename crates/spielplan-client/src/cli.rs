//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// spielplan - fixture sync and calendar export for represented players
#[derive(Debug, Parser)]
#[command(name = "spielplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "SPIELPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch upcoming fixtures for all syncable players
    Sync,

    /// Show the aggregated fixtures of the upcoming window
    List {
        /// Free-text filter over teams, players, and locations
        #[arg(long, short)]
        query: Option<String>,

        /// Only fixtures of these player ids (can be repeated)
        #[arg(long, action = clap::ArgAction::Append)]
        subject: Vec<String>,

        /// Only fixtures covered by these responsibility areas (can be repeated)
        #[arg(long, action = clap::ArgAction::Append)]
        area: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the selected fixtures as an iCalendar file
    Export {
        /// Output path
        #[arg(long, short, default_value = "spielplan.ics")]
        output: PathBuf,
    },

    /// Mark a fixture for export
    Select {
        /// Fixture id as shown by `list`
        fixture_id: String,
    },

    /// Remove a fixture from the export selection
    Unselect {
        /// Fixture id as shown by `list`
        fixture_id: String,
    },

    /// Manage the provider access token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Delete fixtures dated before today
    Cleanup,
}

#[derive(Debug, Subcommand)]
pub enum TokenAction {
    /// Store the access token
    Set { token: String },
    /// Show whether a token is configured
    Show,
    /// Remove the stored token
    Clear,
}
