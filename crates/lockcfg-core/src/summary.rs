// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Listing rows for parameter overview screens.

use crate::params::{ConfigSnapshot, Parameter};

/// One parameter's current state on one door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSummary {
    /// Parameter kind.
    pub parameter: Parameter,
    /// Current value, rendered.
    pub value: String,
    /// Unit label for ranged parameters.
    pub unit: Option<String>,
    /// Stored `common` flag.
    pub common: bool,
}

impl ParameterSummary {
    /// Rows for every parameter of `snapshot`, in display order.
    pub fn from_snapshot(snapshot: &ConfigSnapshot) -> Vec<Self> {
        Parameter::ALL
            .into_iter()
            .map(|parameter| Self {
                parameter,
                value: snapshot.default_string(parameter),
                unit: snapshot.unit(parameter).map(str::to_owned),
                common: snapshot.common(parameter),
            })
            .collect()
    }

    /// Case-insensitive substring match on the name or value.
    /// An empty term matches nothing.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return false;
        }
        let term = term.to_lowercase();
        self.parameter.name().to_lowercase().contains(&term)
            || self.value.to_lowercase().contains(&term)
    }
}
