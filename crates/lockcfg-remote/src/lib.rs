// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! HTTP source for the one-time lock configuration snapshot.
//! One GET per fetch; timeouts and retries are left to the caller.

use lockcfg_core::{ConfigSnapshot, ConfigSource, FetchError};
use tracing::{debug, warn};

/// Endpoint serving the default lock configuration document.
pub const DEFAULT_ENDPOINT: &str =
    "https://run.mocky.io/v3/d5f5d613-474b-49c4-a7b0-7730e8f8f486";

const USER_AGENT: &str = concat!("lockcfg/", env!("CARGO_PKG_VERSION"));

/// [`ConfigSource`] backed by a single HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpConfigSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpConfigSource {
    /// Source for `endpoint` with a default client.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Source for `endpoint` using a caller-configured client.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// URL fetched by this source.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ConfigSource for HttpConfigSource {
    async fn fetch(&self) -> Result<ConfigSnapshot, FetchError> {
        debug!(endpoint = %self.endpoint, "requesting lock configuration");
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, %status, "config endpoint returned an error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
