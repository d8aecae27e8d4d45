// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core lock-settings services for a two-door controller.
//! Keeps storage and transport adapters thin: they plug in through
//! [`backend::SettingsBackend`] and [`source::ConfigSource`].

pub mod backend;
pub mod door;
pub mod edit;
pub mod params;
pub mod service;
pub mod source;
pub mod store;
pub mod summary;
pub mod validate;

pub use backend::{SettingsBackend, StoreError};
pub use door::{Door, UnknownDoor};
pub use edit::{DoorView, EditError, EditSession, EditState};
pub use params::{
    CommonEnumeratedParam, CommonIntRangedParam, ConfigSnapshot, EnumeratedParam, Parameter,
    ParameterShape, ParseFailure, Range, RangedParam, ShapeError,
};
pub use service::{LockConfigService, SeedError};
pub use source::{ConfigSource, FetchError};
pub use store::{LockConfigStore, UpdateError};
pub use summary::ParameterSummary;
pub use validate::{validate, validate_choice, ValidationError};
