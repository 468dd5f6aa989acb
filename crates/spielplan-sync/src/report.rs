//! Sync outcome types.
//!
//! A sync pass always completes with a [`SyncReport`] summarizing counts
//! and recovered per-subject problems; partial failure is an expected,
//! successful outcome. Only a missing access token aborts a pass before
//! any work.

use thiserror::Error;

use spielplan_store::StoreError;

/// Progress notification, emitted after each subject.
///
/// `current` is 1-based and monotonically increasing within a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncProgress {
    pub current: usize,
    pub total: usize,
    pub subject_name: String,
}

/// A recovered per-subject problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncWarning {
    pub subject_id: String,
    pub subject_name: String,
    pub message: String,
}

/// Summary of a completed sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Rows newly created.
    pub added: usize,
    /// Rows rewritten in place.
    pub updated: usize,
    /// Individual upserts that failed; the pass continued past them.
    pub failed_upserts: usize,
    /// Subjects the pass got through (including skipped ones).
    pub subjects_processed: usize,
    /// Recovered per-subject problems, in subject order.
    pub warnings: Vec<SyncWarning>,
    /// True when the pass stopped at a cancellation point.
    pub cancelled: bool,
}

impl SyncReport {
    /// Total rows written, added plus updated.
    pub fn total_written(&self) -> usize {
        self.added + self.updated
    }
}

/// Errors that abort a sync pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No access token configured. Distinct and user-actionable; the
    /// pass performs no network calls in this state.
    #[error("no fussball.de access token configured; set one with `spielplan token set`")]
    MissingToken,

    /// Settings or subject access failed before the subject loop.
    #[error(transparent)]
    Store(#[from] StoreError),
}
