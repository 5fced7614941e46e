// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Motorised video projector position state.

use std::fmt;

use super::WireEnum;

/// Position state of the motorised video projector.
///
/// The producer reserves `0` for "unknown", so [`ProjectorState::Unknown`]
/// is both a real wire value and the fallback for values outside `0..=4`.
///
/// # Examples
///
/// ```
/// use vansync::types::{ProjectorState, WireEnum};
///
/// assert_eq!(ProjectorState::from_wire(3), ProjectorState::Deployed);
/// assert_eq!(ProjectorState::from_wire(999), ProjectorState::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub enum ProjectorState {
    /// Position not known.
    #[default]
    Unknown,
    /// Fully retracted.
    Retracted,
    /// Moving towards retracted.
    Retracting,
    /// Fully deployed.
    Deployed,
    /// Moving towards deployed.
    Deploying,
}

impl ProjectorState {
    /// Returns the wire integer.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Self::Unknown => 0,
            Self::Retracted => 1,
            Self::Retracting => 2,
            Self::Deployed => 3,
            Self::Deploying => 4,
        }
    }

    /// Returns a short human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Retracted => "retracted",
            Self::Retracting => "retracting",
            Self::Deployed => "deployed",
            Self::Deploying => "deploying",
        }
    }

    /// Returns `true` while the motor is running.
    #[must_use]
    pub const fn is_moving(self) -> bool {
        matches!(self, Self::Retracting | Self::Deploying)
    }
}

impl WireEnum for ProjectorState {
    const SENTINEL_WIRE: Option<i64> = Some(0);
    const UNKNOWN: Self = Self::Unknown;

    fn from_wire(raw: i64) -> Self {
        match raw {
            1 => Self::Retracted,
            2 => Self::Retracting,
            3 => Self::Deployed,
            4 => Self::Deploying,
            _ => Self::Unknown,
        }
    }

    fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for ProjectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_table() {
        assert_eq!(ProjectorState::from_wire(0), ProjectorState::Unknown);
        assert_eq!(ProjectorState::from_wire(1), ProjectorState::Retracted);
        assert_eq!(ProjectorState::from_wire(2), ProjectorState::Retracting);
        assert_eq!(ProjectorState::from_wire(4), ProjectorState::Deploying);
    }

    #[test]
    fn unmapped_values_fall_back() {
        assert_eq!(ProjectorState::from_wire(5), ProjectorState::Unknown);
        assert_eq!(ProjectorState::from_wire(999), ProjectorState::Unknown);
        assert_eq!(ProjectorState::from_wire(-1), ProjectorState::Unknown);
    }

    #[test]
    fn value_round_trips_known_states() {
        for state in [
            ProjectorState::Retracted,
            ProjectorState::Retracting,
            ProjectorState::Deployed,
            ProjectorState::Deploying,
        ] {
            assert_eq!(ProjectorState::from_wire(state.value()), state);
        }
    }

    #[test]
    fn moving_states() {
        assert!(ProjectorState::Deploying.is_moving());
        assert!(!ProjectorState::Deployed.is_moving());
    }
}
