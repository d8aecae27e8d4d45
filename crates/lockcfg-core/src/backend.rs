// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Storage port for raw settings blobs and its error type.

use thiserror::Error;

/// Storage port for raw settings blobs (keyed by slot name).
///
/// Implementations must make `save_raw` atomic: a later `load_raw` sees
/// either the previous blob or the new one, never a mix.
pub trait SettingsBackend: Send + Sync {
    /// Load a raw blob. Returns `NotFound` when the slot was never written.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError>;
    /// Persist a raw blob, replacing any previous contents.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError>;
}

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Slot not present in the backend.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}
