//! Store error types.

use thiserror::Error;

/// Errors from the record store collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document did not deserialize.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The settings document did not parse.
    #[error("settings parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The settings document did not serialize.
    #[error("settings write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// A point lookup by id found nothing.
    #[error("no fixture with id {0}")]
    UnknownFixture(String),
}

/// A specialized Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
