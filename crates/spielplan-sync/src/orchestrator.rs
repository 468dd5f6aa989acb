//! The sync orchestrator.
//!
//! Drives one full synchronization pass over all syncable subjects:
//! token check, per-subject extract/fetch/upsert with local failure
//! containment, progress callbacks, inter-subject pacing, and a
//! cooperative cancellation point between subjects.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use spielplan_core::Subject;
use spielplan_providers::{FixtureProvider, extract_team_id};
use spielplan_store::{API_TOKEN_KEY, FixtureStore, SettingsStore, UpsertOutcome};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::pacing::PacingPolicy;
use crate::report::{SyncError, SyncProgress, SyncReport, SyncWarning};

/// Cooperative cancellation handle, observed between subjects.
///
/// Cancelling never interrupts an in-flight fetch or upsert; the pass
/// stops at the next subject boundary and the report says so.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the pass to stop at the next subject boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Drives sync passes. Stateless across invocations; everything a pass
/// learns ends up in the store or the returned report.
pub struct SyncOrchestrator {
    provider: Arc<dyn FixtureProvider>,
    fixtures: Arc<dyn FixtureStore>,
    settings: Arc<dyn SettingsStore>,
    pacing: PacingPolicy,
    cancel: CancelHandle,
}

impl SyncOrchestrator {
    pub fn new(
        provider: Arc<dyn FixtureProvider>,
        fixtures: Arc<dyn FixtureStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            provider,
            fixtures,
            settings,
            pacing: PacingPolicy::default(),
            cancel: CancelHandle::new(),
        }
    }

    /// Builder method to override the pacing policy.
    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    /// Handle for cancelling a running pass.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Runs one pass over `subjects`.
    ///
    /// Subjects without a profile reference are not part of the pass.
    /// The progress callback fires once after every handled subject,
    /// including skipped ones, with a 1-based monotonically increasing
    /// `current`.
    ///
    /// # Errors
    ///
    /// [`SyncError::MissingToken`] when no access token is configured;
    /// no network call happens in that case. Per-subject problems never
    /// error: they are collected as warnings on the report.
    pub async fn run<F>(&self, subjects: &[Subject], mut progress: F) -> Result<SyncReport, SyncError>
    where
        F: FnMut(SyncProgress),
    {
        let token = self
            .settings
            .get(API_TOKEN_KEY)?
            .filter(|token| !token.trim().is_empty())
            .ok_or(SyncError::MissingToken)?;

        let eligible: Vec<&Subject> = subjects.iter().filter(|s| s.has_profile()).collect();
        let total = eligible.len();
        let mut report = SyncReport::default();
        info!(total, provider = self.provider.name(), "starting sync pass");

        for (index, subject) in eligible.into_iter().enumerate() {
            if self.cancel.is_cancelled() {
                info!(processed = report.subjects_processed, "sync pass cancelled");
                report.cancelled = true;
                break;
            }
            if index > 0 {
                sleep(self.pacing.request_spacing).await;
            }

            self.sync_subject(subject, &token, &mut report).await;
            report.subjects_processed += 1;
            progress(SyncProgress {
                current: index + 1,
                total,
                subject_name: subject.name.clone(),
            });
        }

        info!(
            added = report.added,
            updated = report.updated,
            warnings = report.warnings.len(),
            "sync pass finished"
        );
        Ok(report)
    }

    async fn sync_subject(&self, subject: &Subject, token: &str, report: &mut SyncReport) {
        let profile = subject.profile_url.as_deref().unwrap_or_default();
        let Some(team) = extract_team_id(profile) else {
            warn!(subject = %subject.name, "no team identifier in profile reference");
            report.warnings.push(SyncWarning {
                subject_id: subject.id.clone(),
                subject_name: subject.name.clone(),
                message: "no team identifier in profile reference".to_string(),
            });
            return;
        };

        let records = match self.provider.fetch_fixtures(&team, token).await {
            Ok(records) => records,
            Err(error) => {
                warn!(subject = %subject.name, error = %error, "fixture fetch failed");
                report.warnings.push(SyncWarning {
                    subject_id: subject.id.clone(),
                    subject_name: subject.name.clone(),
                    message: format!("fixture fetch failed: {error}"),
                });
                return;
            }
        };

        if records.is_empty() {
            // No scheduled games is a valid outcome, e.g. off-season.
            debug!(subject = %subject.name, "no upcoming fixtures");
            return;
        }

        for record in records {
            match self.fixtures.upsert(record.into_fixture(subject)) {
                Ok(UpsertOutcome::Added) => report.added += 1,
                Ok(UpsertOutcome::Updated) => report.updated += 1,
                Err(error) => {
                    warn!(subject = %subject.name, error = %error, "fixture upsert failed");
                    report.failed_upserts += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spielplan_providers::{ErrorProvider, ProviderErrorCode, ProviderFixture, StaticProvider};
    use spielplan_store::{MemoryFixtureStore, MemorySettings, StoreError, StoreResult};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subject(id: &str, name: &str, team: &str) -> Subject {
        Subject::new(id, name)
            .with_profile_url(format!("https://www.fussball.de/x/-/team-id/{team}"))
    }

    fn provider_with(count: usize) -> Arc<StaticProvider> {
        let fixtures = (0..count)
            .map(|i| {
                ProviderFixture::new(
                    date(2025, 10, 20 + i as u32),
                    format!("SV Heim {i}"),
                    format!("FC Gast {i}"),
                )
            })
            .collect();
        Arc::new(StaticProvider::new(fixtures))
    }

    fn settings_with_token() -> Arc<MemorySettings> {
        Arc::new(MemorySettings::with(API_TOKEN_KEY, "token"))
    }

    #[tokio::test]
    async fn missing_token_aborts_without_work() {
        let store = Arc::new(MemoryFixtureStore::new());
        let orchestrator = SyncOrchestrator::new(
            provider_with(1),
            store.clone(),
            Arc::new(MemorySettings::new()),
        );

        let result = orchestrator.run(&[subject("s1", "A", "AAA")], |_| {}).await;
        assert!(matches!(result, Err(SyncError::MissingToken)));
        assert!(store.all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_token_counts_as_missing() {
        let orchestrator = SyncOrchestrator::new(
            provider_with(1),
            Arc::new(MemoryFixtureStore::new()),
            Arc::new(MemorySettings::with(API_TOKEN_KEY, "   ")),
        );

        let result = orchestrator.run(&[subject("s1", "A", "AAA")], |_| {}).await;
        assert!(matches!(result, Err(SyncError::MissingToken)));
    }

    #[tokio::test]
    async fn pass_writes_fixtures_and_is_idempotent() {
        let store = Arc::new(MemoryFixtureStore::new());
        let orchestrator = SyncOrchestrator::new(
            provider_with(2),
            store.clone(),
            settings_with_token(),
        )
        .with_pacing(PacingPolicy::none());

        let subjects = [subject("s1", "Lena Meyer", "AAA")];

        let first = orchestrator.run(&subjects, |_| {}).await.unwrap();
        assert_eq!(first.added, 2);
        assert_eq!(first.updated, 0);
        assert!(first.warnings.is_empty());

        let second = orchestrator.run(&subjects, |_| {}).await.unwrap();
        assert_eq!(second.added, 0);
        assert_eq!(second.updated, 2);
        assert_eq!(store.all().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn bad_profile_collects_one_warning_and_continues() {
        let store = Arc::new(MemoryFixtureStore::new());
        let orchestrator = SyncOrchestrator::new(
            provider_with(1),
            store.clone(),
            settings_with_token(),
        )
        .with_pacing(PacingPolicy::none());

        let subjects = [
            subject("s1", "Lena Meyer", "AAA"),
            Subject::new("s2", "Jonas Brandt")
                .with_profile_url("https://www.fussball.de/verein/nope"),
            subject("s3", "Tim Krause", "CCC"),
        ];

        let report = orchestrator.run(&subjects, |_| {}).await.unwrap();

        // Subjects 1 and 3 each wrote the provider's single fixture.
        assert_eq!(report.total_written(), 2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].subject_name, "Jonas Brandt");
        assert_eq!(report.subjects_processed, 3);
    }

    #[tokio::test]
    async fn provider_failure_is_contained_per_subject() {
        let orchestrator = SyncOrchestrator::new(
            Arc::new(ErrorProvider::new(
                "test",
                ProviderErrorCode::ServerError,
                "boom",
            )),
            Arc::new(MemoryFixtureStore::new()),
            settings_with_token(),
        )
        .with_pacing(PacingPolicy::none());

        let subjects = [subject("s1", "A", "AAA"), subject("s2", "B", "BBB")];
        let report = orchestrator.run(&subjects, |_| {}).await.unwrap();

        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.subjects_processed, 2);
        assert!(!report.cancelled);
    }

    #[tokio::test]
    async fn subjects_without_profile_are_not_part_of_the_pass() {
        let orchestrator = SyncOrchestrator::new(
            provider_with(1),
            Arc::new(MemoryFixtureStore::new()),
            settings_with_token(),
        )
        .with_pacing(PacingPolicy::none());

        let subjects = [subject("s1", "A", "AAA"), Subject::new("s2", "B")];
        let mut seen = Vec::new();
        let report = orchestrator
            .run(&subjects, |p| seen.push((p.current, p.total)))
            .await
            .unwrap();

        assert_eq!(report.subjects_processed, 1);
        assert_eq!(seen, vec![(1, 1)]);
    }

    #[tokio::test]
    async fn progress_is_dense_and_monotonic() {
        let orchestrator = SyncOrchestrator::new(
            provider_with(1),
            Arc::new(MemoryFixtureStore::new()),
            settings_with_token(),
        )
        .with_pacing(PacingPolicy::none());

        let subjects = [
            subject("s1", "A", "AAA"),
            subject("s2", "B", "BBB"),
            subject("s3", "C", "CCC"),
        ];
        let mut currents = Vec::new();
        orchestrator
            .run(&subjects, |p| currents.push(p.current))
            .await
            .unwrap();

        assert_eq!(currents, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn pacing_spaces_consecutive_subjects() {
        let orchestrator = SyncOrchestrator::new(
            provider_with(1),
            Arc::new(MemoryFixtureStore::new()),
            settings_with_token(),
        );

        let subjects = [
            subject("s1", "A", "AAA"),
            subject("s2", "B", "BBB"),
            subject("s3", "C", "CCC"),
        ];

        let started = tokio::time::Instant::now();
        orchestrator.run(&subjects, |_| {}).await.unwrap();
        let elapsed = started.elapsed();

        // Two gaps of 500ms each between three subjects.
        assert!(elapsed >= std::time::Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn cancellation_stops_at_the_next_subject_boundary() {
        let store = Arc::new(MemoryFixtureStore::new());
        let orchestrator = SyncOrchestrator::new(
            provider_with(1),
            store.clone(),
            settings_with_token(),
        )
        .with_pacing(PacingPolicy::none());
        let cancel = orchestrator.cancel_handle();

        let subjects = [subject("s1", "A", "AAA"), subject("s2", "B", "BBB")];
        let report = orchestrator
            .run(&subjects, |p| {
                if p.current == 1 {
                    cancel.cancel();
                }
            })
            .await
            .unwrap();

        assert!(report.cancelled);
        assert_eq!(report.subjects_processed, 1);
        assert_eq!(store.all().unwrap().len(), 1);
    }

    struct FailingStore;

    impl FixtureStore for FailingStore {
        fn upsert(&self, _fixture: spielplan_core::Fixture) -> StoreResult<UpsertOutcome> {
            Err(StoreError::UnknownFixture("write refused".to_string()))
        }

        fn all(&self) -> StoreResult<Vec<spielplan_core::Fixture>> {
            Ok(Vec::new())
        }

        fn in_window(
            &self,
            _from: NaiveDate,
            _to: NaiveDate,
        ) -> StoreResult<Vec<spielplan_core::Fixture>> {
            Ok(Vec::new())
        }

        fn set_selected(&self, _id: &str, _selected: bool) -> StoreResult<()> {
            Ok(())
        }

        fn delete_before(&self, _cutoff: NaiveDate) -> StoreResult<usize> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn full_pass_from_provider_record_to_calendar_export() {
        use spielplan_core::{
            AgeCategory, AggregationWindow, ExportOptions, aggregate, export_calendar,
        };
        use spielplan_providers::map_record;

        // A record shaped like a real relay payload.
        let record = serde_json::json!({
            "heim": "TSG 1899 Hoffenheim U17",
            "gast": "FC Bayern München U17 2",
            "datum": "25.10.2025",
            "staffel": "B-Junioren Bundesliga"
        });
        let provider = Arc::new(StaticProvider::new(vec![map_record(&record).unwrap()]));

        let store = Arc::new(MemoryFixtureStore::new());
        let orchestrator =
            SyncOrchestrator::new(provider, store.clone(), settings_with_token())
                .with_pacing(PacingPolicy::none());

        let subjects = [Subject::new("s-a", "Lena Meyer")
            .with_profile_url("https://www.fussball.de/verein/x/-/team-id/ABC123")];
        let report = orchestrator.run(&subjects, |_| {}).await.unwrap();
        assert_eq!(report.added, 1);

        let rows = store.all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, date(2025, 10, 25));
        assert!(rows[0].time.is_none());

        store.set_selected(&rows[0].id, true).unwrap();

        let window = AggregationWindow::from_today(date(2025, 10, 1));
        let items = aggregate(&store.all().unwrap(), &window);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, AgeCategory::Youth(17));

        let ics = export_calendar(&items, &subjects, &ExportOptions::default()).unwrap();
        assert!(ics.contains("DTSTART:20251025T120000"));
        assert!(ics.contains("U17 Liga: Hoffenheim - Bayern München U23"));
        assert!(ics.contains("Lena Meyer"));
    }

    #[tokio::test]
    async fn upsert_failures_are_counted_not_fatal() {
        let orchestrator = SyncOrchestrator::new(
            provider_with(2),
            Arc::new(FailingStore),
            settings_with_token(),
        )
        .with_pacing(PacingPolicy::none());

        let report = orchestrator
            .run(&[subject("s1", "A", "AAA")], |_| {})
            .await
            .unwrap();

        assert_eq!(report.failed_upserts, 2);
        assert_eq!(report.total_written(), 0);
        assert_eq!(report.subjects_processed, 1);
    }
}
