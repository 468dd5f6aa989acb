//! `spielplan token` commands.

use spielplan_store::{API_TOKEN_KEY, SettingsStore, TomlSettings};

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Stores the access token.
pub fn set(config: &ClientConfig, token: &str) -> ClientResult<()> {
    TomlSettings::new(config.settings_path()).set(API_TOKEN_KEY, token)?;
    println!("Token stored.");
    Ok(())
}

/// Reports whether a token is configured. Never prints the token itself.
pub fn show(config: &ClientConfig) -> ClientResult<()> {
    let token = TomlSettings::new(config.settings_path()).get(API_TOKEN_KEY)?;
    match token {
        Some(token) if !token.trim().is_empty() => println!("A token is configured."),
        _ => println!("No token configured. Store one with `spielplan token set <TOKEN>`."),
    }
    Ok(())
}

/// Removes the stored token.
pub fn clear(config: &ClientConfig) -> ClientResult<()> {
    TomlSettings::new(config.settings_path()).remove(API_TOKEN_KEY)?;
    println!("Token removed.");
    Ok(())
}
