// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-door snapshot store: JSON (de)serialization over a [`SettingsBackend`].

use crate::backend::{SettingsBackend, StoreError};
use crate::door::Door;
use crate::params::{ConfigSnapshot, Parameter, ParseFailure};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure of a field update.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Non-numeric text supplied for a ranged parameter.
    #[error("parse error: {0}")]
    Parse(#[from] ParseFailure),
    /// Backend failed while loading or saving.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Durable storage of one [`ConfigSnapshot`] per [`Door`].
pub struct LockConfigStore<B> {
    backend: B,
}

impl<B> LockConfigStore<B> {
    /// Create a store over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the store and return the backend.
    pub fn into_inner(self) -> B {
        self.backend
    }
}

impl<B> LockConfigStore<B>
where
    B: SettingsBackend,
{
    /// Load the snapshot for `door`. Returns `Ok(None)` if the slot is empty.
    pub fn load(&self, door: Door) -> Result<Option<ConfigSnapshot>, StoreError> {
        match self.backend.load_raw(door.slot_key()) {
            Ok(bytes) => {
                if bytes.is_empty() {
                    return Ok(None);
                }
                let snapshot = serde_json::from_slice(&bytes)?;
                debug!(%door, "loaded lock settings");
                Ok(Some(snapshot))
            }
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Replace the snapshot for `door`.
    pub fn save(&self, snapshot: &ConfigSnapshot, door: Door) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(snapshot)?;
        self.backend.save_raw(door.slot_key(), &data)?;
        debug!(%door, bytes = data.len(), "saved lock settings");
        Ok(())
    }

    /// Set the current value of the parameter called `field_name` on `door`.
    ///
    /// Returns `Ok(None)` when the door has no snapshot. An unknown name is
    /// logged and leaves storage untouched; the current snapshot is returned.
    pub fn update_field(
        &self,
        door: Door,
        field_name: &str,
        raw_value: &str,
    ) -> Result<Option<ConfigSnapshot>, UpdateError> {
        match Parameter::from_name(field_name) {
            Some(parameter) => self.update(door, parameter, raw_value),
            None => {
                warn!(%door, parameter = field_name, "unknown parameter; nothing updated");
                self.load(door).map_err(UpdateError::from)
            }
        }
    }

    /// Typed form of [`update_field`](Self::update_field).
    pub fn update(
        &self,
        door: Door,
        parameter: Parameter,
        raw_value: &str,
    ) -> Result<Option<ConfigSnapshot>, UpdateError> {
        let Some(mut snapshot) = self.load(door)? else {
            debug!(%door, %parameter, "no snapshot to update");
            return Ok(None);
        };
        snapshot.set_default(parameter, raw_value)?;
        self.save(&snapshot, door)?;
        Ok(Some(snapshot))
    }
}
