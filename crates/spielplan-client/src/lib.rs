//! CLI: sync, list, export, selection, token management
//!
//! This crate provides the `spielplan` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
