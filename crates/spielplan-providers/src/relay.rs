//! HTTP client for the provider relay.
//!
//! The relay attaches provider credentials server-side and shields the
//! callers from cross-origin restrictions; this client only needs the
//! relay base URL and the caller's access token. The relay answers with
//! a JSON envelope `{ "success": bool, "data": [...] }`.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use tracing::{trace, warn};
use url::Url;

use crate::error::{ProviderError, ProviderResult};

/// Header carrying the access token to the relay.
pub const TOKEN_HEADER: &str = "X-Api-Token";

/// Relay connection settings.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl RelayConfig {
    /// Creates a config for the given relay base URL.
    pub fn new(base_url: &str) -> ProviderResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ProviderError::configuration(format!("invalid relay URL: {e}")))?;
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(15),
            user_agent: concat!("spielplan/", env!("CARGO_PKG_VERSION")).to_string(),
        })
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method to set the User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The relay base URL.
    pub fn url(&self) -> &Url {
        &self.base_url
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

/// HTTP client for the relay endpoint.
#[derive(Debug)]
pub struct RelayClient {
    http: reqwest::Client,
    config: RelayConfig,
}

impl RelayClient {
    /// Creates a relay client from the given configuration.
    pub fn new(config: RelayConfig) -> ProviderResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ProviderError::network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Fetches the raw records behind `target` through the relay.
    ///
    /// The target provider URL travels as the `url` query parameter; the
    /// token as the [`TOKEN_HEADER`] header.
    pub async fn fetch_records(
        &self,
        token: &str,
        target: &str,
    ) -> ProviderResult<Vec<serde_json::Value>> {
        trace!(target = %target, "relay fetch");
        let response = self
            .http
            .get(self.config.base_url.clone())
            .header(TOKEN_HEADER, token)
            .query(&[("url", target)])
            .send()
            .await
            .map_err(|e| ProviderError::network(format!("relay request failed: {e}")))?;

        let envelope = handle_response(response).await?;
        if !envelope.success {
            return Err(ProviderError::invalid_response(
                "relay reported an unsuccessful fetch",
            ));
        }
        Ok(envelope.data)
    }
}

async fn handle_response(response: Response) -> ProviderResult<Envelope> {
    let status = response.status();
    trace!(status = %status, "relay response");

    match status {
        s if s.is_success() => response
            .json::<Envelope>()
            .await
            .map_err(|e| ProviderError::invalid_response(format!("malformed relay envelope: {e}"))),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::authentication(
            "relay rejected the access token",
        )),
        StatusCode::TOO_MANY_REQUESTS => {
            Err(ProviderError::rate_limited("relay rate limit exceeded"))
        }
        s if s.is_server_error() => {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %s, body = %body, "relay server error");
            Err(ProviderError::server(format!("relay server error ({s})")))
        }
        s => {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %s, body = %body, "unexpected relay status");
            Err(ProviderError::invalid_response(format!(
                "unexpected relay status {s}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_invalid_url() {
        let result = RelayConfig::new("not a url");
        assert!(result.is_err());
    }

    #[test]
    fn config_builder() {
        let config = RelayConfig::new("https://relay.example.test/fetch")
            .unwrap()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent");

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.url().as_str(), "https://relay.example.test/fetch");
    }

    #[test]
    fn client_creation() {
        let config = RelayConfig::new("https://relay.example.test/fetch").unwrap();
        assert!(RelayClient::new(config).is_ok());
    }

    #[test]
    fn envelope_defaults_tolerate_missing_fields() {
        let envelope: Envelope = serde_json::from_str("{}").unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_empty());

        let envelope: Envelope =
            serde_json::from_str(r#"{"success": true, "data": [{"heim": "SV Nord"}]}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.len(), 1);
    }
}
