// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Energy sections: solar controllers, chargers and the house battery.

use serde::Serialize;

use crate::types::{BmsProtection, ChargeState, MosfetStatus};

/// Maximum number of cells reported by the BMS.
pub const MAX_CELLS: usize = 16;

/// Maximum number of BMS temperature probes.
pub const MAX_TEMP_SENSORS: usize = 8;

/// Readings of one MPPT solar charge controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MpptController {
    /// Panel power in Watts.
    pub solar_power: f32,
    /// Panel voltage in Volts.
    pub panel_voltage: f32,
    /// Panel current in Amperes.
    pub panel_current: f32,
    /// Battery-side voltage in Volts.
    pub battery_voltage: f32,
    /// Battery-side current in Amperes.
    pub battery_current: f32,
    /// Controller temperature in °C.
    pub temperature: i8,
    /// Charge stage.
    pub state: ChargeState,
    /// Controller error flags.
    pub error_flags: u16,
}

/// The two MPPT controllers of the van.
///
/// On the wire every field carries a suffix naming the controller model:
/// `_100_50` for the primary array and `_70_15` for the secondary one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mppt {
    /// MPPT 100|50 on the main roof array.
    pub primary: MpptController,
    /// MPPT 70|15 on the secondary array.
    pub secondary: MpptController,
}

impl Mppt {
    /// Combined panel power of both controllers in Watts.
    #[must_use]
    pub fn total_solar_power(&self) -> f32 {
        self.primary.solar_power + self.secondary.solar_power
    }
}

/// Alternator (DC-DC) charger status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlternatorCharger {
    /// Charge stage.
    pub state: ChargeState,
    /// Input voltage in Volts.
    pub input_voltage: f32,
    /// Output voltage in Volts.
    pub output_voltage: f32,
    /// Output current in Amperes.
    pub output_current: f32,
}

/// Inverter/charger status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InverterCharger {
    /// Inverter enabled.
    pub enabled: bool,
    /// Shore power voltage in Volts.
    pub ac_input_voltage: f32,
    /// Shore power frequency in Hz.
    pub ac_input_frequency: f32,
    /// Shore power current in Amperes.
    pub ac_input_current: f32,
    /// Shore power in Watts.
    pub ac_input_power: f32,
    /// Inverter output voltage in Volts.
    pub ac_output_voltage: f32,
    /// Inverter output frequency in Hz.
    pub ac_output_frequency: f32,
    /// Inverter output current in Amperes.
    pub ac_output_current: f32,
    /// Inverter output power in Watts.
    pub ac_output_power: f32,
    /// Battery voltage in Volts.
    pub battery_voltage: f32,
    /// Battery current in Amperes.
    pub battery_current: f32,
    /// Inverter temperature in °C.
    pub inverter_temperature: f32,
    /// Charger stage.
    pub charger_state: ChargeState,
    /// Inverter error flags.
    pub error_flags: u16,
}

/// House battery status as reported by the BMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Battery {
    /// Pack voltage in millivolts.
    pub voltage_mv: u16,
    /// Pack current in milliamps, positive while charging.
    pub current_ma: i32,
    /// Remaining capacity in mAh.
    pub capacity_mah: u32,
    /// State of charge in percent.
    pub soc_percent: u8,
    /// Number of cells in series.
    pub cell_count: u8,
    /// Per-cell voltage in millivolts.
    pub cell_voltage_mv: [u16; MAX_CELLS],
    /// Number of temperature probes.
    pub temp_sensor_count: u8,
    /// Probe temperatures in °C.
    pub temperatures_c: [i16; MAX_TEMP_SENSORS],
    /// Full charge cycles.
    pub cycle_count: u16,
    /// Full capacity as currently measured, in mAh.
    pub nominal_capacity_mah: u32,
    /// Factory capacity in mAh.
    pub design_capacity_mah: u32,
    /// Health in percent.
    pub health_percent: u8,
    /// MOSFET output byte.
    pub mosfet_status: u8,
    /// Protection word.
    pub protection_status: u16,
    /// Balancing bitfield, bit `n` for cell `n + 1`.
    pub balance_status: u32,
}

impl Battery {
    /// Pack voltage in Volts.
    #[must_use]
    pub fn voltage(&self) -> f32 {
        f32::from(self.voltage_mv) / 1000.0
    }

    /// Pack current in Amperes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn current(&self) -> f32 {
        self.current_ma as f32 / 1000.0
    }

    /// Returns `true` while current flows into the pack.
    #[must_use]
    pub fn is_charging(&self) -> bool {
        self.current_ma > 0
    }

    /// Voltages of the populated cells.
    #[must_use]
    pub fn cell_voltages(&self) -> &[u16] {
        let count = usize::from(self.cell_count).min(MAX_CELLS);
        &self.cell_voltage_mv[..count]
    }

    /// Temperatures of the populated probes.
    #[must_use]
    pub fn temperatures(&self) -> &[i16] {
        let count = usize::from(self.temp_sensor_count).min(MAX_TEMP_SENSORS);
        &self.temperatures_c[..count]
    }

    /// Spread between the highest and lowest populated cell, in millivolts.
    #[must_use]
    pub fn cell_delta_mv(&self) -> Option<u16> {
        let cells = self.cell_voltages();
        let max = cells.iter().max()?;
        let min = cells.iter().min()?;
        Some(max - min)
    }

    /// Decoded MOSFET outputs.
    #[must_use]
    pub fn mosfets(&self) -> MosfetStatus {
        MosfetStatus::from_bits(self.mosfet_status)
    }

    /// Decoded protection word.
    #[must_use]
    pub fn protections(&self) -> BmsProtection {
        BmsProtection::from_bits(self.protection_status)
    }

    /// 1-based indices of the cells currently balancing.
    #[must_use]
    pub fn balancing_cells(&self) -> Vec<u8> {
        (0_u8..32)
            .filter(|bit| self.balance_status & (1 << bit) != 0)
            .map(|bit| bit + 1)
            .collect()
    }
}
