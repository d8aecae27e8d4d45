// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory settings backend for testing without filesystem I/O.

use lockcfg_core::{Door, SettingsBackend, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory implementation of [`SettingsBackend`] for testing.
///
/// Clones share state, so a test can hand one clone to a service and keep
/// another to inspect slots, count calls, or inject failures.
///
/// # Example
///
/// ```
/// use lockcfg_core::{Door, LockConfigStore};
/// use lockcfg_dry_tests::{sample_snapshot, InMemoryBackend};
///
/// let backend = InMemoryBackend::new();
/// let store = LockConfigStore::new(backend.clone());
///
/// store.save(&sample_snapshot(), Door::Primary).unwrap();
/// assert_eq!(backend.save_count(), 1);
/// assert!(backend.contains_slot(Door::Primary));
/// assert!(!backend.contains_slot(Door::Secondary));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    slots: HashMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
    fail_on_save_slot: Option<&'static str>,
}

impl InMemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Write raw bytes into a slot without counting a save.
    pub fn put_raw(&self, key: &str, data: &[u8]) {
        self.lock().slots.insert(key.to_owned(), data.to_vec());
    }

    /// Raw bytes stored for `door`, if any. Does not count a load.
    pub fn raw_slot(&self, door: Door) -> Option<Vec<u8>> {
        self.lock().slots.get(door.slot_key()).cloned()
    }

    /// Whether `door`'s slot has been written.
    pub fn contains_slot(&self, door: Door) -> bool {
        self.lock().slots.contains_key(door.slot_key())
    }

    /// Make every subsequent `load_raw` fail.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Make every subsequent `save_raw` fail.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_on_save = fail;
    }

    /// Make subsequent saves to `door`'s slot fail; `None` clears it.
    pub fn set_fail_on_save_to(&self, door: Option<Door>) {
        self.lock().fail_on_save_slot = door.map(Door::slot_key);
    }

    /// Number of `load_raw` calls attempted, including failed ones.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// Number of `save_raw` calls attempted, including failed ones.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }
}

impl SettingsBackend for InMemoryBackend {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let mut inner = self.lock();
        inner.load_count += 1;

        if inner.fail_on_load {
            return Err(StoreError::Other("simulated load failure".into()));
        }

        inner.slots.get(key).cloned().ok_or(StoreError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.save_count += 1;

        if inner.fail_on_save || inner.fail_on_save_slot == Some(key) {
            return Err(StoreError::Other("simulated save failure".into()));
        }

        inner.slots.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}
