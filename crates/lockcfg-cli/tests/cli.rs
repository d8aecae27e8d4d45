// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::Command;
use lockcfg_config_fs::FsSettingsBackend;
use lockcfg_core::{Door, LockConfigStore};
use lockcfg_dry_tests::{sample_json, sample_snapshot};
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

// Nothing listens here; seeded directories never reach it.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9/config";

fn seeded_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let store = LockConfigStore::new(FsSettingsBackend::at(dir.path()).unwrap());
    for door in Door::ALL {
        store.save(&sample_snapshot(), door).unwrap();
    }
    dir
}

fn lockcfg(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lockcfg").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg("--config-dir")
        .arg(dir)
        .arg("--endpoint")
        .arg(DEAD_ENDPOINT);
    cmd
}

#[test]
fn get_prints_value_and_range() {
    let dir = seeded_dir();
    lockcfg(dir.path())
        .args(["get", "lockAngle", "--door", "secondary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockAngle (secondary): 45"))
        .stdout(predicate::str::contains("range: [0.0, 360.0]"));
}

#[test]
fn set_truncates_angle_and_persists() {
    let dir = seeded_dir();
    lockcfg(dir.path())
        .args(["set", "lockAngle", "90.7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockAngle = 90 (primary)"));

    let store = LockConfigStore::new(FsSettingsBackend::at(dir.path()).unwrap());
    let primary = store.load(Door::Primary).unwrap().unwrap();
    let secondary = store.load(Door::Secondary).unwrap().unwrap();
    assert_eq!(primary.lock_angle.default, 90);
    assert_eq!(secondary.lock_angle.default, 45);
}

#[test]
fn set_out_of_range_fails_and_keeps_value() {
    let dir = seeded_dir();
    lockcfg(dir.path())
        .args(["set", "lockReleaseTime", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("value out of range"));

    lockcfg(dir.path())
        .args(["get", "lockReleaseTime"])
        .assert()
        .success()
        .stdout(predicate::str::contains(": 5.0"));
}

#[test]
fn set_common_parameter_updates_both_doors() {
    let dir = seeded_dir();
    lockcfg(dir.path())
        .args(["set", "lockRelease", "Always", "--door", "secondary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(both doors)"));

    lockcfg(dir.path())
        .args(["get", "lockRelease", "--door", "primary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockRelease (primary): Always"));
}

#[test]
fn show_filters_rows() {
    let dir = seeded_dir();
    lockcfg(dir.path())
        .args(["show", "--filter", "VOLT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockVoltage"))
        .stdout(predicate::str::contains("lockAngle").not());

    lockcfg(dir.path())
        .args(["show", "--filter", "doorbell"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no parameters match"));
}

#[test]
fn show_with_empty_filter_lists_everything() {
    let dir = seeded_dir();
    lockcfg(dir.path())
        .args(["show", "--filter", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("lockVoltage"))
        .stdout(predicate::str::contains("lockAngle"))
        .stdout(predicate::str::contains("no parameters match").not());
}

#[test]
fn validate_reports_without_writing() {
    let dir = seeded_dir();
    lockcfg(dir.path())
        .args(["validate", "lockKick", "On"])
        .assert()
        .success()
        .stdout(predicate::str::diff("ok\n"));

    lockcfg(dir.path())
        .args(["validate", "lockAngle", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("value required"));

    lockcfg(dir.path())
        .args(["get", "lockKick"])
        .assert()
        .success()
        .stdout(predicate::str::contains(": Off"));
}

#[test]
fn unknown_parameter_is_rejected() {
    let dir = seeded_dir();
    lockcfg(dir.path())
        .args(["get", "lockHinge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown parameter"));
}

#[test]
fn unreachable_endpoint_fails_seed_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    lockcfg(dir.path())
        .arg("seed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("seed lock settings"));
    assert!(!dir.path().join("primaryLockSettings.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn seed_fetches_remote_config_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_json()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let endpoint = format!("{}/config", server.uri());
    let base = dir.path().to_path_buf();
    tokio::task::spawn_blocking(move || {
        for _ in 0..2 {
            Command::cargo_bin("lockcfg")
                .unwrap()
                .arg("--config-dir")
                .arg(&base)
                .arg("--endpoint")
                .arg(&endpoint)
                .arg("seed")
                .assert()
                .success()
                .stdout(predicate::str::contains("lock settings ready"));
        }
    })
    .await
    .unwrap();

    assert!(dir.path().join("primaryLockSettings.json").is_file());
    assert!(dir.path().join("secondaryLockSettings.json").is_file());
}
