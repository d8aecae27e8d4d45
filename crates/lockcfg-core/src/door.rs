// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Door identity: the partition key for persisted snapshots.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the two independently configured doors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Door {
    /// Primary door.
    Primary,
    /// Secondary door.
    Secondary,
}

impl Door {
    /// Both doors, primary first.
    pub const ALL: [Self; 2] = [Self::Primary, Self::Secondary];

    /// Storage slot key for this door's snapshot.
    pub const fn slot_key(self) -> &'static str {
        match self {
            Self::Primary => "primaryLockSettings",
            Self::Secondary => "secondaryLockSettings",
        }
    }

    /// The opposite door.
    pub const fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    /// Lowercase label used in logs and on the command line.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Text did not name a door.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown door {0:?} (expected \"primary\" or \"secondary\")")]
pub struct UnknownDoor(pub String);

impl FromStr for Door {
    type Err = UnknownDoor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDoor(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_distinct_and_other_flips() {
        assert_ne!(Door::Primary.slot_key(), Door::Secondary.slot_key());
        assert_eq!(Door::Primary.other(), Door::Secondary);
        assert_eq!(Door::Secondary.other().other(), Door::Secondary);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Primary".parse::<Door>().unwrap(), Door::Primary);
        assert_eq!(" SECONDARY ".parse::<Door>().unwrap(), Door::Secondary);
        assert!("front".parse::<Door>().is_err());
    }
}
