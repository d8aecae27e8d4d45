// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Edit session for one parameter on one door.
//!
//! `Viewing -> Editing -> Saved`; a submission that fails validation keeps
//! the session in `Editing` with the error attached.

use crate::backend::SettingsBackend;
use crate::door::Door;
use crate::params::{Parameter, Range};
use crate::service::LockConfigService;
use crate::store::UpdateError;
use crate::validate::{validate_choice, ValidationError};
use thiserror::Error;
use tracing::debug;

/// Session state.
#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    /// Showing the current value.
    Viewing,
    /// Accepting input; carries the last validation failure, if any.
    Editing {
        /// Message to show next to the input.
        error: Option<ValidationError>,
    },
    /// Value written. Terminal.
    Saved,
}

/// What the session shows for its door.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorView {
    /// Door being edited.
    pub door: Door,
    /// Current value, rendered.
    pub current: String,
    /// Choices for enumerated parameters.
    pub values: Option<Vec<String>>,
    /// Range for ranged parameters.
    pub range: Option<Range>,
}

/// Misuse of a session or a failed write.
#[derive(Debug, Error)]
pub enum EditError {
    /// `begin` called outside `Viewing`.
    #[error("edit session is not viewing")]
    NotViewing,
    /// `submit` called outside `Editing`.
    #[error("edit session is not editing")]
    NotEditing,
    /// The door has no stored settings to edit.
    #[error("{0} door has no stored settings")]
    Unseeded(Door),
    /// Write failed after validation passed.
    #[error(transparent)]
    Update(#[from] UpdateError),
}

/// Edit workflow for one parameter on one door.
#[derive(Debug, Clone)]
pub struct EditSession {
    parameter: Parameter,
    common: bool,
    view: DoorView,
    state: EditState,
}

impl EditSession {
    /// Open a session in `Viewing`, capturing the door's current state.
    pub fn open<B, R>(service: &LockConfigService<B, R>, parameter: Parameter, door: Door) -> Self
    where
        B: SettingsBackend,
    {
        let name = parameter.name();
        Self {
            parameter,
            common: service.is_common(name),
            view: DoorView {
                door,
                current: service.get_default_value(name, door),
                values: service.get_values(name, door),
                range: service.get_range(name, door),
            },
            state: EditState::Viewing,
        }
    }

    /// Parameter being edited.
    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    /// Whether a save also applies to the other door.
    pub fn is_common(&self) -> bool {
        self.common
    }

    /// Door view captured at open.
    pub fn view(&self) -> &DoorView {
        &self.view
    }

    /// Current state.
    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// `Viewing -> Editing`.
    pub fn begin(&mut self) -> Result<(), EditError> {
        if self.state != EditState::Viewing {
            return Err(EditError::NotViewing);
        }
        self.state = EditState::Editing { error: None };
        Ok(())
    }

    /// Validate `input` and, if it passes, write it through the service.
    ///
    /// Validation failure is not an error: the session stays in `Editing`
    /// with the failure attached.
    pub fn submit<B, R>(
        &mut self,
        service: &LockConfigService<B, R>,
        input: &str,
    ) -> Result<&EditState, EditError>
    where
        B: SettingsBackend,
    {
        if !matches!(self.state, EditState::Editing { .. }) {
            return Err(EditError::NotEditing);
        }
        let door = self.view.door;
        let failure = match (&self.view.values, self.view.range) {
            (Some(values), _) => validate_choice(input, values),
            (None, Some(range)) => service.validate(input, range),
            (None, None) => return Err(EditError::Unseeded(door)),
        };
        if let Some(error) = failure {
            debug!(%door, parameter = %self.parameter, %error, "edit rejected");
            self.state = EditState::Editing { error: Some(error) };
            return Ok(&self.state);
        }

        if service
            .update_lock_settings(self.parameter.name(), input, door)?
            .is_none()
        {
            return Err(EditError::Unseeded(door));
        }
        self.state = EditState::Saved;
        Ok(&self.state)
    }
}
