// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use lockcfg_core::{Door, LockConfigStore, Parameter, StoreError, UpdateError};
use lockcfg_dry_tests::{sample_snapshot, InMemoryBackend};

fn seeded() -> (InMemoryBackend, LockConfigStore<InMemoryBackend>) {
    let backend = InMemoryBackend::new();
    let store = LockConfigStore::new(backend.clone());
    store.save(&sample_snapshot(), Door::Primary).unwrap();
    store.save(&sample_snapshot(), Door::Secondary).unwrap();
    (backend, store)
}

#[test]
fn never_written_slot_loads_as_absent() {
    let store = LockConfigStore::new(InMemoryBackend::new());
    assert!(store.load(Door::Primary).unwrap().is_none());
    assert!(store.load(Door::Secondary).unwrap().is_none());
}

#[test]
fn empty_slot_loads_as_absent() {
    let backend = InMemoryBackend::new();
    backend.put_raw(Door::Primary.slot_key(), b"");
    let store = LockConfigStore::new(backend);
    assert!(store.load(Door::Primary).unwrap().is_none());
}

#[test]
fn corrupt_slot_is_a_serde_error() {
    let backend = InMemoryBackend::new();
    backend.put_raw(Door::Primary.slot_key(), b"{ not json");
    let store = LockConfigStore::new(backend);
    assert!(matches!(
        store.load(Door::Primary),
        Err(StoreError::Serde(_))
    ));
}

#[test]
fn save_is_scoped_to_one_door() {
    let backend = InMemoryBackend::new();
    let store = LockConfigStore::new(backend.clone());
    store.save(&sample_snapshot(), Door::Secondary).unwrap();
    assert_eq!(store.load(Door::Secondary).unwrap(), Some(sample_snapshot()));
    assert!(store.load(Door::Primary).unwrap().is_none());
    assert!(!backend.contains_slot(Door::Primary));
}

#[test]
fn enumerated_update_sets_value_verbatim() {
    let (_backend, store) = seeded();
    let updated = store
        .update_field(Door::Primary, "lockVoltage", "24V")
        .unwrap()
        .unwrap();
    assert_eq!(updated.lock_voltage.default, "24V");

    let reloaded = store.load(Door::Primary).unwrap().unwrap();
    assert_eq!(reloaded.lock_voltage.default, "24V");
    let other = store.load(Door::Secondary).unwrap().unwrap();
    assert_eq!(other.lock_voltage.default, "No Power");
}

#[test]
fn angle_update_truncates_fractional_input() {
    let (_backend, store) = seeded();
    store
        .update_field(Door::Secondary, "lockAngle", "45.9")
        .unwrap();
    let reloaded = store.load(Door::Secondary).unwrap().unwrap();
    assert_eq!(reloaded.lock_angle.default, 45);

    store.update(Door::Secondary, Parameter::LockAngle, "90").unwrap();
    let reloaded = store.load(Door::Secondary).unwrap().unwrap();
    assert_eq!(reloaded.lock_angle.default, 90);
}

#[test]
fn release_time_accepts_fractional_input() {
    let (_backend, store) = seeded();
    let updated = store
        .update_field(Door::Primary, "lockReleaseTime", "2.5")
        .unwrap()
        .unwrap();
    assert!((updated.lock_release_time.default - 2.5).abs() < f64::EPSILON);
}

#[test]
fn non_numeric_ranged_update_fails_without_writing() {
    let (backend, store) = seeded();
    let before = backend.raw_slot(Door::Primary);
    let saves = backend.save_count();

    let err = store
        .update_field(Door::Primary, "lockReleaseTime", "abc")
        .unwrap_err();
    match err {
        UpdateError::Parse(failure) => {
            assert_eq!(failure.parameter, Parameter::LockReleaseTime);
            assert_eq!(failure.input, "abc");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(backend.save_count(), saves);
    assert_eq!(backend.raw_slot(Door::Primary), before);
}

#[test]
fn update_on_unseeded_door_is_a_no_op() {
    let backend = InMemoryBackend::new();
    let store = LockConfigStore::new(backend.clone());
    let result = store.update_field(Door::Primary, "lockKick", "On").unwrap();
    assert!(result.is_none());
    assert_eq!(backend.save_count(), 0);
}

#[test]
fn unknown_parameter_returns_snapshot_without_saving() {
    let (backend, store) = seeded();
    let saves = backend.save_count();
    let result = store
        .update_field(Door::Primary, "lockColour", "red")
        .unwrap();
    assert_eq!(result, Some(sample_snapshot()));
    assert_eq!(backend.save_count(), saves);
}

#[test]
fn save_failure_propagates_from_update() {
    let (backend, store) = seeded();
    backend.set_fail_on_save(true);
    let err = store
        .update_field(Door::Primary, "lockKick", "On")
        .unwrap_err();
    assert!(matches!(err, UpdateError::Store(StoreError::Other(_))));
    backend.set_fail_on_save(false);
    let reloaded = store.load(Door::Primary).unwrap().unwrap();
    assert_eq!(reloaded.lock_kick.default, "Off");
}
