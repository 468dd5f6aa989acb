//! Collaborator contracts and reference implementations: fixture store,
//! key/value settings, read-only subject source.

pub mod error;
pub mod fixtures;
pub mod settings;
pub mod subjects;

pub use error::{StoreError, StoreResult};
pub use fixtures::{FixtureStore, JsonFixtureStore, MemoryFixtureStore, UpsertOutcome};
pub use settings::{API_TOKEN_KEY, MemorySettings, SettingsStore, TomlSettings};
pub use subjects::{JsonSubjectSource, StaticSubjects, SubjectSource};
