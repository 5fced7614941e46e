// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Charger state shared by the MPPT controllers and both chargers.

wire_enum! {
    /// Charge stage reported by an MPPT controller, the alternator charger or
    /// the inverter/charger.
    ///
    /// | Value | Variant |
    /// |-------|---------|
    /// | 0 | Off |
    /// | 1 | Bulk |
    /// | 2 | Absorption |
    /// | 3 | Float |
    /// | 4 | Equalize |
    /// | 5 | Storage |
    ///
    /// # Examples
    ///
    /// ```
    /// use vansync::types::{ChargeState, WireEnum};
    ///
    /// assert_eq!(ChargeState::from_wire(1), ChargeState::Bulk);
    /// assert_eq!(ChargeState::Bulk.value(), Some(1));
    /// assert_eq!(ChargeState::from_wire(6), ChargeState::Unknown);
    /// ```
    pub enum ChargeState {
        /// Charger idle.
        Off = 0 => "off",
        /// Constant-current stage.
        Bulk = 1 => "bulk",
        /// Constant-voltage stage.
        Absorption = 2 => "absorption",
        /// Maintenance voltage.
        Float = 3 => "float",
        /// Equalisation charge.
        Equalize = 4 => "equalize",
        /// Long-term storage voltage.
        Storage = 5 => "storage",
    }
}

impl ChargeState {
    /// Returns `true` when the charger is actively pushing current.
    #[must_use]
    pub const fn is_charging(self) -> bool {
        matches!(self, Self::Bulk | Self::Absorption | Self::Equalize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WireEnum;

    #[test]
    fn decodes_every_known_value() {
        let expected = [
            ChargeState::Off,
            ChargeState::Bulk,
            ChargeState::Absorption,
            ChargeState::Float,
            ChargeState::Equalize,
            ChargeState::Storage,
        ];
        for (raw, state) in (0_i64..).zip(expected) {
            assert_eq!(ChargeState::from_wire(raw), state);
            assert_eq!(state.value(), Some(raw));
        }
    }

    #[test]
    fn out_of_range_is_unknown() {
        assert!(ChargeState::from_wire(-1).is_unknown());
        assert!(ChargeState::from_wire(6).is_unknown());
        assert_eq!(ChargeState::Unknown.value(), None);
    }

    #[test]
    fn charging_stages() {
        assert!(ChargeState::Bulk.is_charging());
        assert!(!ChargeState::Float.is_charging());
        assert!(!ChargeState::Unknown.is_charging());
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(ChargeState::Absorption.to_string(), "absorption");
        assert_eq!(ChargeState::default().to_string(), "unknown");
    }
}
