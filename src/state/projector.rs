// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Motorised video projector state.

use serde::Serialize;

use crate::types::ProjectorState;

/// Video projector lift. Every field is known or unknown on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projector {
    /// Lift position.
    pub state: Option<ProjectorState>,
    /// Lift controller reachable.
    pub connected: Option<bool>,
    /// Producer timestamp of the last position change.
    pub last_update_time: Option<i64>,
    /// Deployment in percent, 0 fully retracted.
    pub position_percent: Option<f32>,
}

impl Projector {
    /// Returns `true` while the lift is moving.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.state.is_some_and(ProjectorState::is_moving)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_state_is_not_moving() {
        assert!(!Projector::default().is_moving());

        let deploying = Projector {
            state: Some(ProjectorState::Deploying),
            ..Projector::default()
        };
        assert!(deploying.is_moving());
    }
}
