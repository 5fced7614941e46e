// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only values derived from a [`VanState`] for display.
//!
//! Every function here accepts a state with missing sections and reports
//! them as unknown so the caller can draw a placeholder.
//!
//! # Examples
//!
//! ```
//! use vansync::state::VanState;
//! use vansync::view::{BatteryGauge, GaugeLevel, fault_summary};
//!
//! let mut state = VanState::new();
//! assert_eq!(BatteryGauge::from_state(&state).level(), GaugeLevel::Unknown);
//! assert_eq!(fault_summary(&state), None);
//!
//! state
//!     .merge_json(r#"{"battery": {"soc_percent": 32}, "system": {"error_code": 0}}"#)
//!     .unwrap();
//! assert_eq!(BatteryGauge::from_state(&state).level(), GaugeLevel::Low);
//! assert_eq!(fault_summary(&state).as_deref(), Some("no error"));
//! ```

use serde::Serialize;

use crate::state::{LedStrip, StripId, VanState};

/// Colour band of the battery gauge.
///
/// The 15 % and 40 % boundaries are a fixed choice of this crate. Renderers
/// that blend the gauge colour continuously should use
/// [`BatteryGauge::fraction`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GaugeLevel {
    /// No battery reading yet.
    Unknown,
    /// Below 15 %.
    Critical,
    /// Below 40 %.
    Low,
    /// 40 % or more.
    Normal,
}

/// Battery gauge reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BatteryGauge {
    /// State of charge, clamped to 0..=100.
    pub percent: Option<u8>,
    /// Current flowing into the pack.
    pub charging: Option<bool>,
}

impl BatteryGauge {
    const CRITICAL_BELOW: u8 = 15;
    const LOW_BELOW: u8 = 40;

    /// Reads the gauge from the battery section.
    #[must_use]
    pub fn from_state(state: &VanState) -> Self {
        state.battery().map_or_else(Self::default, |battery| Self {
            percent: Some(battery.soc_percent.min(100)),
            charging: Some(battery.is_charging()),
        })
    }

    /// Returns the charge as a ratio in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> Option<f32> {
        self.percent.map(|p| f32::from(p) / 100.0)
    }

    /// Returns the colour band for the current reading.
    #[must_use]
    pub fn level(&self) -> GaugeLevel {
        match self.percent {
            None => GaugeLevel::Unknown,
            Some(p) if p < Self::CRITICAL_BELOW => GaugeLevel::Critical,
            Some(p) if p < Self::LOW_BELOW => GaugeLevel::Low,
            Some(_) => GaugeLevel::Normal,
        }
    }
}

/// One LED strip as shown in the lighting panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedStripView {
    /// Which strip.
    pub id: StripId,
    /// Its last-known state.
    pub strip: Option<LedStrip>,
}

impl LedStripView {
    /// Display label of the strip.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.id.label()
    }

    /// Returns `true` if the strip is known and switched on.
    #[must_use]
    pub fn is_lit(&self) -> bool {
        self.strip.is_some_and(|strip| strip.enabled)
    }
}

/// Lists the four LED strips in display order.
#[must_use]
pub fn led_strips(state: &VanState) -> Vec<LedStripView> {
    let leds = state.leds();
    StripId::ALL
        .into_iter()
        .map(|id| LedStripView {
            id,
            strip: leds.and_then(|leds| leds.strip(id)).copied(),
        })
        .collect()
}

/// Describes the active system faults, or `None` if the system section is
/// unknown.
#[must_use]
pub fn fault_summary(state: &VanState) -> Option<String> {
    state.system().map(|system| system.error_code.describe())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Battery, Leds, System};
    use crate::types::FaultFlags;

    #[test]
    fn gauge_bands() {
        let gauge = |percent| BatteryGauge {
            percent: Some(percent),
            charging: None,
        };
        assert_eq!(gauge(0).level(), GaugeLevel::Critical);
        assert_eq!(gauge(14).level(), GaugeLevel::Critical);
        assert_eq!(gauge(15).level(), GaugeLevel::Low);
        assert_eq!(gauge(39).level(), GaugeLevel::Low);
        assert_eq!(gauge(40).level(), GaugeLevel::Normal);
        assert_eq!(BatteryGauge::default().level(), GaugeLevel::Unknown);
    }

    #[test]
    fn gauge_fraction() {
        let gauge = BatteryGauge {
            percent: Some(25),
            charging: None,
        };
        assert!(gauge.fraction().is_some_and(|f| (f - 0.25).abs() < f32::EPSILON));
        assert!(BatteryGauge::default().fraction().is_none());
    }

    #[test]
    fn gauge_clamps_percent() {
        let mut state = VanState::new();
        state.set_battery(Battery {
            soc_percent: 140,
            current_ma: 1200,
            ..Battery::default()
        });

        let gauge = BatteryGauge::from_state(&state);
        assert_eq!(gauge.percent, Some(100));
        assert_eq!(gauge.charging, Some(true));
    }

    #[test]
    fn strips_listed_in_display_order() {
        let mut state = VanState::new();
        state.set_leds(Leds {
            ar: Some(LedStrip {
                enabled: true,
                current_mode: 0,
                brightness: 90,
            }),
            ..Leds::default()
        });

        let strips = led_strips(&state);
        let labels: Vec<_> = strips.iter().map(LedStripView::label).collect();
        assert_eq!(labels, vec!["Roof 1", "Roof 2", "Front", "Rear"]);
        assert!(strips[3].is_lit());
        assert!(strips[0].strip.is_none());
    }

    #[test]
    fn strips_without_leds_section() {
        let strips = led_strips(&VanState::new());
        assert_eq!(strips.len(), 4);
        assert!(strips.iter().all(|s| s.strip.is_none()));
    }

    #[test]
    fn fault_summary_lists_faults() {
        let mut state = VanState::new();
        state.set_system(System {
            error_code: FaultFlags::from_bits(0x05),
            ..System::default()
        });
        assert_eq!(
            fault_summary(&state).as_deref(),
            Some("no-fuel heater, sensor comm")
        );
    }
}
