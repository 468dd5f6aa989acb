//! FixtureProvider trait and implementations.
//!
//! A provider fetches the next set of upcoming fixtures for one team
//! identifier. Errors are per-team: the orchestrator turns them into
//! warnings and keeps its batch running, so a single team's failure can
//! never abort a sync pass.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::error::{ProviderError, ProviderErrorCode, ProviderResult};
use crate::fields::map_record;
use crate::raw_fixture::ProviderFixture;
use crate::relay::RelayClient;
use crate::team_id::TeamId;

/// A boxed future for object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of upcoming fixtures for a team.
pub trait FixtureProvider: Send + Sync {
    /// Name of this provider for logs and warnings.
    fn name(&self) -> &str;

    /// Fetches upcoming fixtures for one team.
    ///
    /// Records whose date does not normalize are excluded from the
    /// result, never returned partial. Zero fixtures is a valid outcome
    /// (off-season, no scheduled games).
    fn fetch_fixtures<'a>(
        &'a self,
        team: &'a TeamId,
        token: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<ProviderFixture>>>;
}

/// The fussball.de upcoming-games endpoint, addressed through the relay.
const NEXT_GAMES_URL: &str = "https://www.fussball.de/ajax.team.next.games/-/team-id/";

/// Fixture provider backed by fussball.de behind the relay.
#[derive(Debug)]
pub struct FussballProvider {
    relay: RelayClient,
}

impl FussballProvider {
    pub fn new(relay: RelayClient) -> Self {
        Self { relay }
    }

    fn target_url(team: &TeamId) -> String {
        format!("{NEXT_GAMES_URL}{team}")
    }
}

impl FixtureProvider for FussballProvider {
    fn name(&self) -> &str {
        "fussball.de"
    }

    fn fetch_fixtures<'a>(
        &'a self,
        team: &'a TeamId,
        token: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<ProviderFixture>>> {
        Box::pin(async move {
            let records = self
                .relay
                .fetch_records(token, &Self::target_url(team))
                .await?;
            let total = records.len();
            let fixtures: Vec<ProviderFixture> = records.iter().filter_map(map_record).collect();
            if fixtures.len() < total {
                debug!(
                    team = %team,
                    dropped = total - fixtures.len(),
                    "dropped records without usable fields"
                );
            }
            debug!(team = %team, count = fixtures.len(), "fetched fixtures");
            Ok(fixtures)
        })
    }
}

/// Fixed-response provider for tests.
#[derive(Debug, Default)]
pub struct StaticProvider {
    fixtures: Vec<ProviderFixture>,
}

impl StaticProvider {
    pub fn new(fixtures: Vec<ProviderFixture>) -> Self {
        Self { fixtures }
    }
}

impl FixtureProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_fixtures<'a>(
        &'a self,
        _team: &'a TeamId,
        _token: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<ProviderFixture>>> {
        let fixtures = self.fixtures.clone();
        Box::pin(async move { Ok(fixtures) })
    }
}

/// A provider that always fails. Placeholder when construction fails,
/// and a failure double in tests.
#[derive(Debug)]
pub struct ErrorProvider {
    name: String,
    code: ProviderErrorCode,
    message: String,
}

impl ErrorProvider {
    pub fn new(
        name: impl Into<String>,
        code: ProviderErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code,
            message: message.into(),
        }
    }
}

impl FixtureProvider for ErrorProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_fixtures<'a>(
        &'a self,
        _team: &'a TeamId,
        _token: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Vec<ProviderFixture>>> {
        let error = ProviderError::new(self.code, self.message.clone());
        Box::pin(async move { Err(error) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn target_url_embeds_the_team_id() {
        let team = TeamId::new("ABC123");
        assert_eq!(
            FussballProvider::target_url(&team),
            "https://www.fussball.de/ajax.team.next.games/-/team-id/ABC123"
        );
    }

    #[tokio::test]
    async fn static_provider_returns_its_fixtures() {
        let provider = StaticProvider::new(vec![ProviderFixture::new(
            date(2025, 10, 25),
            "SV Nord",
            "FC Süd",
        )]);

        let fixtures = provider
            .fetch_fixtures(&TeamId::new("ABC"), "token")
            .await
            .unwrap();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].home_team, "SV Nord");
    }

    #[tokio::test]
    async fn error_provider_returns_its_error() {
        let provider = ErrorProvider::new(
            "test",
            ProviderErrorCode::NetworkError,
            "connection refused",
        );

        let result = provider.fetch_fixtures(&TeamId::new("ABC"), "token").await;
        let err = result.unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::NetworkError);
        assert!(err.is_retryable());
    }
}
