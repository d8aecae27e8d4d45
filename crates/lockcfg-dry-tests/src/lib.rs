// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for lockcfg crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`backend`] - In-memory settings backend for testing without filesystem
//! - [`fixtures`] - Sample snapshots and their wire JSON
//! - [`source`] - Scripted config source that counts fetches

pub mod backend;
pub mod fixtures;
pub mod source;

pub use backend::InMemoryBackend;
pub use fixtures::{sample_json, sample_snapshot, snapshot_with_common, SAMPLE_JSON};
pub use source::FakeConfigSource;
