// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lock settings service: the rules layer callers talk to.
//!
//! Seeds both doors from a [`ConfigSource`] on first use, answers parameter
//! queries by name, applies updates (mirroring `common` parameters to the
//! other door) and validates user input. Read accessors never fail: unknown
//! names, missing snapshots and backend read errors all answer "absent".

use crate::backend::{SettingsBackend, StoreError};
use crate::door::Door;
use crate::params::{ConfigSnapshot, Parameter, Range};
use crate::source::{ConfigSource, FetchError};
use crate::store::{LockConfigStore, UpdateError};
use crate::summary::ParameterSummary;
use crate::validate::{self, ValidationError};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Failure while seeding the doors from the remote source.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Remote fetch failed; nothing was written.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    /// Backend failed while checking or writing the seed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Service over a per-door store and a remote config source.
pub struct LockConfigService<B, R> {
    store: LockConfigStore<B>,
    source: R,
    seed_gate: Mutex<()>,
}

impl<B, R> LockConfigService<B, R> {
    /// Create a service from a storage backend and a remote source.
    pub fn new(backend: B, source: R) -> Self {
        Self {
            store: LockConfigStore::new(backend),
            source,
            seed_gate: Mutex::new(()),
        }
    }

    /// Borrow the per-door store.
    pub fn store(&self) -> &LockConfigStore<B> {
        &self.store
    }

    /// Borrow the remote source.
    pub fn source(&self) -> &R {
        &self.source
    }
}

impl<B, R> LockConfigService<B, R>
where
    B: SettingsBackend,
    R: ConfigSource,
{
    /// Seed both doors from the remote source unless the primary door already
    /// has a snapshot. Concurrent callers are serialized; only the first one
    /// fetches.
    pub async fn ensure_seeded(&self) -> Result<(), SeedError> {
        let _gate = self.seed_gate.lock().await;
        if self.store.load(Door::Primary)?.is_some() {
            debug!("lock settings already seeded");
            return Ok(());
        }

        info!("fetching lock configuration from remote source");
        let fetched = self.source.fetch().await?;
        fetched
            .check()
            .map_err(|e| FetchError::Invalid(e.to_string()))?;

        // Primary goes last: its presence marks a completed seed.
        self.store.save(&fetched, Door::Secondary)?;
        self.store.save(&fetched, Door::Primary)?;
        info!("seeded lock settings for both doors");
        Ok(())
    }
}

impl<B, R> LockConfigService<B, R>
where
    B: SettingsBackend,
{
    /// True when `parameter` is shared by both doors according to the
    /// primary door's snapshot.
    pub fn is_common(&self, parameter: &str) -> bool {
        Parameter::from_name(parameter)
            .filter(|p| p.supports_common())
            .and_then(|p| self.read(Door::Primary).map(|s| s.common(p)))
            .unwrap_or(false)
    }

    /// Permitted values of an enumerated parameter on `door`.
    pub fn get_values(&self, parameter: &str, door: Door) -> Option<Vec<String>> {
        let parameter = Parameter::from_name(parameter)?;
        self.read(door)?.values(parameter).map(<[String]>::to_vec)
    }

    /// Range of a ranged parameter on `door`.
    pub fn get_range(&self, parameter: &str, door: Door) -> Option<Range> {
        let parameter = Parameter::from_name(parameter)?;
        self.read(door)?.range(parameter)
    }

    /// Current value on `door` rendered as a string; empty when unknown.
    pub fn get_default_value(&self, parameter: &str, door: Door) -> String {
        Parameter::from_name(parameter)
            .and_then(|p| self.read(door).map(|s| s.default_string(p)))
            .unwrap_or_default()
    }

    /// Apply `raw_value` to `parameter` on `door`. When the parameter is
    /// common the same write is applied to the other door.
    ///
    /// Both doors are loaded and updated in memory before either is saved.
    /// If the mirror save fails, `door` is restored to its prior snapshot,
    /// so on `Err` neither door has changed.
    ///
    /// Returns the updated snapshot of `door`, or `None` if it is unseeded.
    pub fn update_lock_settings(
        &self,
        parameter: &str,
        raw_value: &str,
        door: Door,
    ) -> Result<Option<ConfigSnapshot>, UpdateError> {
        let Some(kind) = Parameter::from_name(parameter) else {
            return self.store.update_field(door, parameter, raw_value);
        };
        if !self.is_common(parameter) {
            return self.store.update(door, kind, raw_value);
        }

        let other = door.other();
        let Some(prior) = self.store.load(door)? else {
            debug!(%door, %kind, "no snapshot to update");
            return Ok(None);
        };
        let mut updated = prior.clone();
        updated.set_default(kind, raw_value)?;
        let mirrored = match self.store.load(other)? {
            Some(mut snapshot) => {
                snapshot.set_default(kind, raw_value)?;
                Some(snapshot)
            }
            None => {
                warn!(%other, %kind, "other door unseeded; common value not mirrored");
                None
            }
        };

        self.store.save(&updated, door)?;
        if let Some(mirrored) = mirrored {
            debug!(%door, %other, %kind, "mirroring common parameter");
            if let Err(err) = self.store.save(&mirrored, other) {
                if let Err(restore) = self.store.save(&prior, door) {
                    warn!(%door, error = %restore, "failed to restore after mirror failure");
                }
                return Err(err.into());
            }
        }
        Ok(Some(updated))
    }

    /// Validate numeric input against `range`.
    pub fn validate(&self, input: &str, range: Range) -> Option<ValidationError> {
        validate::validate(input, range)
    }

    /// Stored snapshot for `door`.
    pub fn snapshot(&self, door: Door) -> Result<Option<ConfigSnapshot>, StoreError> {
        self.store.load(door)
    }

    /// Listing rows for `door`; empty when unseeded.
    pub fn parameters(&self, door: Door) -> Result<Vec<ParameterSummary>, StoreError> {
        Ok(self
            .store
            .load(door)?
            .map(|s| ParameterSummary::from_snapshot(&s))
            .unwrap_or_default())
    }

    fn read(&self, door: Door) -> Option<ConfigSnapshot> {
        match self.store.load(door) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%door, error = %err, "failed to read lock settings");
                None
            }
        }
    }
}
