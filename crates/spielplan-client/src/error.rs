//! Client error types.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced to the CLI user.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration file problems.
    #[error("configuration error: {0}")]
    Config(String),

    /// Provider/relay access failed.
    #[error(transparent)]
    Provider(#[from] spielplan_providers::ProviderError),

    /// Store access failed.
    #[error(transparent)]
    Store(#[from] spielplan_store::StoreError),

    /// The sync pass aborted.
    #[error(transparent)]
    Sync(#[from] spielplan_sync::SyncError),

    /// The export was refused.
    #[error(transparent)]
    Export(#[from] spielplan_core::ExportError),

    /// File access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Output serialization failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
