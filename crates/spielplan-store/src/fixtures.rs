//! Fixture persistence.
//!
//! The store keys rows by the dedup tuple `(subject_id, date, home_team,
//! away_team)`; `Fixture::id` is storage identity only. Upserts are
//! idempotent: re-applying the same sync pass updates rows in place and
//! never duplicates them, and an update keeps the row's `id` and
//! `selected` flag so export intent survives a re-sync.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use spielplan_core::{Fixture, FixtureKey};
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Outcome of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was created.
    Added,
    /// An existing row was rewritten.
    Updated,
}

/// Record store for fixtures.
pub trait FixtureStore: Send + Sync {
    /// Inserts or updates by the dedup key. A row arriving with an empty
    /// `id` gets a store-assigned one; an update keeps the existing `id`
    /// and `selected` flag and rewrites the provider-owned fields.
    fn upsert(&self, fixture: Fixture) -> StoreResult<UpsertOutcome>;

    /// All rows, ordered by key.
    fn all(&self) -> StoreResult<Vec<Fixture>>;

    /// Rows with `from <= date <= to`.
    fn in_window(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<Fixture>>;

    /// Flags a row for export by its store id.
    fn set_selected(&self, id: &str, selected: bool) -> StoreResult<()>;

    /// Removes rows dated strictly before `cutoff`; returns the count.
    fn delete_before(&self, cutoff: NaiveDate) -> StoreResult<usize>;
}

fn apply_upsert(rows: &mut BTreeMap<FixtureKey, Fixture>, mut fixture: Fixture) -> UpsertOutcome {
    let key = fixture.key();
    match rows.get_mut(&key) {
        Some(existing) => {
            fixture.id = existing.id.clone();
            fixture.selected = existing.selected;
            *existing = fixture;
            UpsertOutcome::Updated
        }
        None => {
            if fixture.id.is_empty() {
                fixture.id = Uuid::new_v4().to_string();
            }
            rows.insert(key, fixture);
            UpsertOutcome::Added
        }
    }
}

fn apply_set_selected(
    rows: &mut BTreeMap<FixtureKey, Fixture>,
    id: &str,
    selected: bool,
) -> StoreResult<()> {
    let row = rows
        .values_mut()
        .find(|row| row.id == id)
        .ok_or_else(|| StoreError::UnknownFixture(id.to_string()))?;
    row.selected = selected;
    Ok(())
}

fn apply_delete_before(rows: &mut BTreeMap<FixtureKey, Fixture>, cutoff: NaiveDate) -> usize {
    let before = rows.len();
    rows.retain(|key, _| key.date >= cutoff);
    before - rows.len()
}

/// In-memory fixture store, used in tests and as the base for the
/// file-backed store.
#[derive(Debug, Default)]
pub struct MemoryFixtureStore {
    rows: Mutex<BTreeMap<FixtureKey, Fixture>>,
}

impl MemoryFixtureStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FixtureStore for MemoryFixtureStore {
    fn upsert(&self, fixture: Fixture) -> StoreResult<UpsertOutcome> {
        let mut rows = self.rows.lock().expect("fixture store lock poisoned");
        Ok(apply_upsert(&mut rows, fixture))
    }

    fn all(&self) -> StoreResult<Vec<Fixture>> {
        let rows = self.rows.lock().expect("fixture store lock poisoned");
        Ok(rows.values().cloned().collect())
    }

    fn in_window(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<Fixture>> {
        let rows = self.rows.lock().expect("fixture store lock poisoned");
        Ok(rows
            .values()
            .filter(|row| row.date >= from && row.date <= to)
            .cloned()
            .collect())
    }

    fn set_selected(&self, id: &str, selected: bool) -> StoreResult<()> {
        let mut rows = self.rows.lock().expect("fixture store lock poisoned");
        apply_set_selected(&mut rows, id, selected)
    }

    fn delete_before(&self, cutoff: NaiveDate) -> StoreResult<usize> {
        let mut rows = self.rows.lock().expect("fixture store lock poisoned");
        Ok(apply_delete_before(&mut rows, cutoff))
    }
}

/// Fixture store persisted as a JSON document on disk.
///
/// The whole document is rewritten after every mutation; fixture counts
/// here are small (a few hundred rows at most).
#[derive(Debug)]
pub struct JsonFixtureStore {
    path: PathBuf,
    rows: Mutex<BTreeMap<FixtureKey, Fixture>>,
}

impl JsonFixtureStore {
    /// Opens the store, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let rows = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let fixtures: Vec<Fixture> = serde_json::from_str(&content)?;
            debug!(count = fixtures.len(), path = %path.display(), "loaded fixture store");
            fixtures
                .into_iter()
                .map(|fixture| (fixture.key(), fixture))
                .collect()
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            rows: Mutex::new(rows),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn persist(&self, rows: &BTreeMap<FixtureKey, Fixture>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let fixtures: Vec<&Fixture> = rows.values().collect();
        let json = serde_json::to_string_pretty(&fixtures)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl FixtureStore for JsonFixtureStore {
    fn upsert(&self, fixture: Fixture) -> StoreResult<UpsertOutcome> {
        let mut rows = self.rows.lock().expect("fixture store lock poisoned");
        let outcome = apply_upsert(&mut rows, fixture);
        self.persist(&rows)?;
        Ok(outcome)
    }

    fn all(&self) -> StoreResult<Vec<Fixture>> {
        let rows = self.rows.lock().expect("fixture store lock poisoned");
        Ok(rows.values().cloned().collect())
    }

    fn in_window(&self, from: NaiveDate, to: NaiveDate) -> StoreResult<Vec<Fixture>> {
        let rows = self.rows.lock().expect("fixture store lock poisoned");
        Ok(rows
            .values()
            .filter(|row| row.date >= from && row.date <= to)
            .cloned()
            .collect())
    }

    fn set_selected(&self, id: &str, selected: bool) -> StoreResult<()> {
        let mut rows = self.rows.lock().expect("fixture store lock poisoned");
        apply_set_selected(&mut rows, id, selected)?;
        self.persist(&rows)
    }

    fn delete_before(&self, cutoff: NaiveDate) -> StoreResult<usize> {
        let mut rows = self.rows.lock().expect("fixture store lock poisoned");
        let removed = apply_delete_before(&mut rows, cutoff);
        if removed > 0 {
            self.persist(&rows)?;
        }
        Ok(removed)
    }
}
