// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scripted [`ConfigSource`] that counts fetches.

use crate::fixtures::sample_snapshot;
use lockcfg_core::{ConfigSnapshot, ConfigSource, FetchError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Config source returning a fixed snapshot or a fixed error.
///
/// Clones share state; `fetch_count` counts every call, including failed ones.
#[derive(Clone)]
pub struct FakeConfigSource {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    response: Result<ConfigSnapshot, FetchError>,
    delay: Option<Duration>,
    fetch_count: usize,
}

impl Default for FakeConfigSource {
    fn default() -> Self {
        Self::returning(sample_snapshot())
    }
}

impl FakeConfigSource {
    /// Source that yields [`sample_snapshot`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Source that yields `snapshot`.
    pub fn returning(snapshot: ConfigSnapshot) -> Self {
        Self::from_response(Ok(snapshot))
    }

    /// Source that fails with `error`.
    pub fn failing(error: FetchError) -> Self {
        Self::from_response(Err(error))
    }

    fn from_response(response: Result<ConfigSnapshot, FetchError>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                response,
                delay: None,
                fetch_count: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sleep this long inside every fetch (to widen race windows).
    pub fn with_delay(self, delay: Duration) -> Self {
        self.lock().delay = Some(delay);
        self
    }

    /// Replace the scripted response.
    pub fn set_response(&self, response: Result<ConfigSnapshot, FetchError>) {
        self.lock().response = response;
    }

    /// Number of fetches attempted.
    pub fn fetch_count(&self) -> usize {
        self.lock().fetch_count
    }
}

impl ConfigSource for FakeConfigSource {
    async fn fetch(&self) -> Result<ConfigSnapshot, FetchError> {
        let (response, delay) = {
            let mut inner = self.lock();
            inner.fetch_count += 1;
            (inner.response.clone(), inner.delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        response
    }
}
