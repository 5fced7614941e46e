// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cabin sections: environment sensors, heater, lighting and main-PCB system status.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValueError;
use crate::types::FaultFlags;

/// Environmental sensor readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sensors {
    /// Cabin temperature in °C.
    pub cabin_temperature: f32,
    /// Outside temperature in °C.
    pub exterior_temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
    /// CO2 concentration in ppm.
    pub co2_level: u16,
    /// Ambient light level.
    pub light: u16,
    /// Side door open.
    pub door_open: bool,
}

/// Diesel water heater and air heater status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Heater {
    /// Heater running.
    pub heater_on: bool,
    /// Air temperature set point in °C.
    pub target_air_temperature: f32,
    /// Measured air temperature in °C.
    pub actual_air_temperature: f32,
    /// Coolant loop temperature in °C.
    pub antifreeze_temperature: f32,
    /// Fuel level in percent.
    pub fuel_level_percent: u8,
    /// Heater error code.
    pub error_code: u16,
    /// Circulation pump running.
    pub pump_active: bool,
    /// Radiator fan speed in percent.
    pub radiator_fan_speed: u8,
}

/// State of one LED strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LedStrip {
    /// Strip switched on.
    pub enabled: bool,
    /// Active lighting mode, zero-based as numbered by the controller.
    pub current_mode: u8,
    /// Brightness (0-255).
    pub brightness: u8,
}

/// Names of the four independently addressable LED strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StripId {
    /// First roof strip.
    Roof1,
    /// Second roof strip.
    Roof2,
    /// Front exterior strip.
    Av,
    /// Rear exterior strip.
    Ar,
}

impl StripId {
    /// All strips in display order.
    pub const ALL: [Self; 4] = [Self::Roof1, Self::Roof2, Self::Av, Self::Ar];

    /// Returns the JSON key of the strip.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Roof1 => "roof1",
            Self::Roof2 => "roof2",
            Self::Av => "av",
            Self::Ar => "ar",
        }
    }

    /// Returns a display label for the strip.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Roof1 => "Roof 1",
            Self::Roof2 => "Roof 2",
            Self::Av => "Front",
            Self::Ar => "Rear",
        }
    }
}

impl fmt::Display for StripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StripId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| ValueError::UnknownSection(format!("leds.{s}")))
    }
}

/// The four LED strips. Each strip is known or unknown on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Leds {
    /// First roof strip.
    pub roof1: Option<LedStrip>,
    /// Second roof strip.
    pub roof2: Option<LedStrip>,
    /// Front exterior strip.
    pub av: Option<LedStrip>,
    /// Rear exterior strip.
    pub ar: Option<LedStrip>,
}

impl Leds {
    /// Returns the strip named `id`, if known.
    #[must_use]
    pub fn strip(&self, id: StripId) -> Option<&LedStrip> {
        match id {
            StripId::Roof1 => self.roof1.as_ref(),
            StripId::Roof2 => self.roof2.as_ref(),
            StripId::Av => self.av.as_ref(),
            StripId::Ar => self.ar.as_ref(),
        }
    }

    /// Returns the slot of the strip named `id`.
    pub fn strip_mut(&mut self, id: StripId) -> &mut Option<LedStrip> {
        match id {
            StripId::Roof1 => &mut self.roof1,
            StripId::Roof2 => &mut self.roof2,
            StripId::Av => &mut self.av,
            StripId::Ar => &mut self.ar,
        }
    }

    /// Returns `true` if any known strip is switched on.
    #[must_use]
    pub fn any_enabled(&self) -> bool {
        StripId::ALL
            .into_iter()
            .filter_map(|id| self.strip(id))
            .any(|strip| strip.enabled)
    }
}

/// Main-PCB system status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct System {
    /// Uptime in seconds.
    pub uptime: u32,
    /// A system error is present.
    pub system_error: bool,
    /// Global fault bitmask.
    pub error_code: FaultFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_lookup_by_id() {
        let mut leds = Leds::default();
        *leds.strip_mut(StripId::Av) = Some(LedStrip {
            enabled: true,
            current_mode: 2,
            brightness: 128,
        });

        assert!(leds.strip(StripId::Roof1).is_none());
        assert_eq!(leds.strip(StripId::Av).map(|s| s.brightness), Some(128));
        assert!(leds.any_enabled());
    }

    #[test]
    fn strip_id_from_key() {
        assert_eq!("roof2".parse::<StripId>(), Ok(StripId::Roof2));
        assert_eq!("ar".parse::<StripId>(), Ok(StripId::Ar));
        assert!("roof3".parse::<StripId>().is_err());
    }

    #[test]
    fn no_known_strip_is_not_enabled() {
        assert!(!Leds::default().any_enabled());
    }
}
