// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Remote configuration source port.

use crate::params::ConfigSnapshot;
use std::future::Future;
use thiserror::Error;

/// Provider of the one-time configuration snapshot used to seed both doors.
pub trait ConfigSource: Send + Sync {
    /// Fetch one snapshot. Single attempt; no retry.
    fn fetch(&self) -> impl Future<Output = Result<ConfigSnapshot, FetchError>> + Send;
}

/// Remote source unreachable or returned unusable data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Request could not be sent or the body could not be read.
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-success HTTP status.
    #[error("unexpected status {0}")]
    Status(u16),
    /// Body is not a valid snapshot document.
    #[error("malformed config document: {0}")]
    Decode(String),
    /// Document decoded but breaks a snapshot invariant.
    #[error("invalid config: {0}")]
    Invalid(String),
}
