//! Read-only subject source collaborator.
//!
//! Subjects are owned by the player-record side of the application; this
//! pipeline only ever reads them.

use std::path::PathBuf;

use spielplan_core::Subject;

use crate::error::StoreResult;

/// Source of subjects.
pub trait SubjectSource: Send + Sync {
    /// All subjects known to the player records.
    fn subjects(&self) -> StoreResult<Vec<Subject>>;

    /// Subjects eligible for a sync pass: non-empty profile reference.
    fn subjects_with_profile(&self) -> StoreResult<Vec<Subject>> {
        Ok(self
            .subjects()?
            .into_iter()
            .filter(Subject::has_profile)
            .collect())
    }
}

/// Fixed subject list, used in tests.
#[derive(Debug, Default)]
pub struct StaticSubjects {
    subjects: Vec<Subject>,
}

impl StaticSubjects {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }
}

impl SubjectSource for StaticSubjects {
    fn subjects(&self) -> StoreResult<Vec<Subject>> {
        Ok(self.subjects.clone())
    }
}

/// Subjects read from a JSON document on each access.
#[derive(Debug)]
pub struct JsonSubjectSource {
    path: PathBuf,
}

impl JsonSubjectSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SubjectSource for JsonSubjectSource {
    fn subjects(&self) -> StoreResult<Vec<Subject>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
