// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The van state aggregate.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ParseError, ValueError};
use crate::telemetry::{self, MergeReport};

use super::{
    AlternatorCharger, Battery, Heater, InverterCharger, Leds, Mppt, Projector, Sensors, SlavePcb,
    System,
};

/// Names of the top-level sections of [`VanState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    /// Solar charge controllers.
    Mppt,
    /// Alternator charger.
    AlternatorCharger,
    /// Inverter/charger.
    InverterCharger,
    /// House battery.
    Battery,
    /// Environmental sensors.
    Sensors,
    /// Heater.
    Heater,
    /// LED strips.
    Leds,
    /// Main-PCB system status.
    System,
    /// Secondary PCB.
    SlavePcb,
    /// Video projector lift.
    Projector,
}

impl Section {
    /// Every section, in payload order.
    pub const ALL: [Self; 10] = [
        Self::Mppt,
        Self::AlternatorCharger,
        Self::InverterCharger,
        Self::Battery,
        Self::Sensors,
        Self::Heater,
        Self::Leds,
        Self::System,
        Self::SlavePcb,
        Self::Projector,
    ];

    /// Returns the top-level payload key of the section.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Mppt => "mppt",
            Self::AlternatorCharger => "alternator_charger",
            Self::InverterCharger => "inverter_charger",
            Self::Battery => "battery",
            Self::Sensors => "sensors",
            Self::Heater => "heater",
            Self::Leds => "leds",
            Self::System => "system",
            Self::SlavePcb => "slave_pcb",
            Self::Projector => "videoprojecteur",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.key() == s)
            .ok_or_else(|| ValueError::UnknownSection(s.to_string()))
    }
}

/// Last-known status of the van.
///
/// Every section starts out unknown (`None`) and becomes known the first
/// time a payload carries it. A known section is never reset to unknown by a
/// merge; only [`VanState::clear`] does that.
///
/// # Examples
///
/// ```
/// use vansync::state::{Section, VanState};
///
/// let mut state = VanState::new();
/// assert!(state.battery().is_none());
///
/// let report = state
///     .merge_json(r#"{"battery": {"soc_percent": 87, "voltage_mv": 13250}}"#)
///     .unwrap();
/// assert!(report.is_clean());
///
/// let battery = state.battery().unwrap();
/// assert_eq!(battery.soc_percent, 87);
/// assert!(state.is_known(Section::Battery));
/// assert!(!state.is_known(Section::Heater));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VanState {
    mppt: Option<Mppt>,
    alternator_charger: Option<AlternatorCharger>,
    inverter_charger: Option<InverterCharger>,
    battery: Option<Battery>,
    sensors: Option<Sensors>,
    heater: Option<Heater>,
    leds: Option<Leds>,
    system: Option<System>,
    slave_pcb: Option<SlavePcb>,
    #[serde(rename = "videoprojecteur")]
    projector: Option<Projector>,
}

/// Generates the getter, setter, clearer and crate-internal slot accessor of
/// one section.
macro_rules! section_accessors {
    ($($field:ident, $set:ident, $clear:ident, $slot:ident: $ty:ty;)+) => {
        $(
            #[doc = concat!("Returns the `", stringify!($field), "` section, if known.")]
            #[must_use]
            pub fn $field(&self) -> Option<&$ty> {
                self.$field.as_ref()
            }

            #[doc = concat!("Replaces the `", stringify!($field), "` section.")]
            pub fn $set(&mut self, value: $ty) {
                self.$field = Some(value);
            }

            #[doc = concat!("Marks the `", stringify!($field), "` section as unknown.")]
            pub fn $clear(&mut self) {
                self.$field = None;
            }

            pub(crate) fn $slot(&mut self) -> &mut Option<$ty> {
                &mut self.$field
            }
        )+
    };
}

impl VanState {
    /// Creates a state with every section unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Sections ==========

    section_accessors! {
        mppt, set_mppt, clear_mppt, mppt_slot: Mppt;
        alternator_charger, set_alternator_charger, clear_alternator_charger, alternator_charger_slot: AlternatorCharger;
        inverter_charger, set_inverter_charger, clear_inverter_charger, inverter_charger_slot: InverterCharger;
        battery, set_battery, clear_battery, battery_slot: Battery;
        sensors, set_sensors, clear_sensors, sensors_slot: Sensors;
        heater, set_heater, clear_heater, heater_slot: Heater;
        leds, set_leds, clear_leds, leds_slot: Leds;
        system, set_system, clear_system, system_slot: System;
        slave_pcb, set_slave_pcb, clear_slave_pcb, slave_pcb_slot: SlavePcb;
        projector, set_projector, clear_projector, projector_slot: Projector;
    }

    // ========== Lookup by name ==========

    /// Returns `true` once `section` has been received.
    #[must_use]
    pub fn is_known(&self, section: Section) -> bool {
        match section {
            Section::Mppt => self.mppt.is_some(),
            Section::AlternatorCharger => self.alternator_charger.is_some(),
            Section::InverterCharger => self.inverter_charger.is_some(),
            Section::Battery => self.battery.is_some(),
            Section::Sensors => self.sensors.is_some(),
            Section::Heater => self.heater.is_some(),
            Section::Leds => self.leds.is_some(),
            Section::System => self.system.is_some(),
            Section::SlavePcb => self.slave_pcb.is_some(),
            Section::Projector => self.projector.is_some(),
        }
    }

    /// Returns the sections received so far, in payload order.
    #[must_use]
    pub fn known_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| self.is_known(*section))
            .collect()
    }

    /// Returns a section as a JSON value, or `None` if it is unknown.
    ///
    /// The value uses the field names of the state records, which match the
    /// payload keys except for the two MPPT controllers.
    ///
    /// # Errors
    ///
    /// Returns an error if the section cannot be serialized.
    pub fn section_value(
        &self,
        section: Section,
    ) -> Result<Option<serde_json::Value>, serde_json::Error> {
        fn to_value<T: Serialize>(
            section: Option<&T>,
        ) -> Result<Option<serde_json::Value>, serde_json::Error> {
            section.map(serde_json::to_value).transpose()
        }

        match section {
            Section::Mppt => to_value(self.mppt.as_ref()),
            Section::AlternatorCharger => to_value(self.alternator_charger.as_ref()),
            Section::InverterCharger => to_value(self.inverter_charger.as_ref()),
            Section::Battery => to_value(self.battery.as_ref()),
            Section::Sensors => to_value(self.sensors.as_ref()),
            Section::Heater => to_value(self.heater.as_ref()),
            Section::Leds => to_value(self.leds.as_ref()),
            Section::System => to_value(self.system.as_ref()),
            Section::SlavePcb => to_value(self.slave_pcb.as_ref()),
            Section::Projector => to_value(self.projector.as_ref()),
        }
    }

    // ========== Merging ==========

    /// Merges one telemetry payload into this state.
    ///
    /// Only the sections and fields present in the payload are touched.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] or [`ParseError::NotAnObject`] if the
    /// payload root is malformed; the state is left unchanged in that case.
    /// Errors confined to one section are reported in the returned
    /// [`MergeReport`] instead.
    pub fn merge_json(&mut self, payload: &str) -> Result<MergeReport, ParseError> {
        telemetry::merge_payload(self, payload)
    }

    /// Resets every section to unknown.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LedStrip;

    #[test]
    fn new_state_is_empty() {
        let state = VanState::new();
        assert!(state.known_sections().is_empty());
        for section in Section::ALL {
            assert!(!state.is_known(section));
            assert!(state.section_value(section).unwrap().is_none());
        }
    }

    #[test]
    fn setters_make_sections_known() {
        let mut state = VanState::new();
        state.set_heater(Heater {
            heater_on: true,
            ..Heater::default()
        });
        state.set_projector(Projector::default());

        assert_eq!(
            state.known_sections(),
            vec![Section::Heater, Section::Projector]
        );

        state.clear_heater();
        assert!(!state.is_known(Section::Heater));
    }

    #[test]
    fn clear_resets_state() {
        let mut state = VanState::new();
        state.set_battery(Battery::default());
        state.set_leds(Leds {
            roof1: Some(LedStrip::default()),
            ..Leds::default()
        });

        state.clear();
        assert_eq!(state, VanState::new());
    }

    #[test]
    fn section_value_uses_record_fields() {
        let mut state = VanState::new();
        state.set_battery(Battery {
            soc_percent: 64,
            ..Battery::default()
        });

        let value = state.section_value(Section::Battery).unwrap().unwrap();
        assert_eq!(value["soc_percent"], 64);
        assert_eq!(value["cell_voltage_mv"].as_array().map(Vec::len), Some(16));
    }

    #[test]
    fn section_names_round_trip() {
        for section in Section::ALL {
            assert_eq!(section.key().parse::<Section>(), Ok(section));
        }
        assert_eq!("videoprojecteur".parse::<Section>(), Ok(Section::Projector));
        assert_eq!(
            "projector".parse::<Section>(),
            Err(ValueError::UnknownSection("projector".to_string()))
        );
    }
}
