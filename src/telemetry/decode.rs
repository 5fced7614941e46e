// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Field-by-field decoding of the state records.
//!
//! Each record lists the payload keys it understands. Keys that are absent
//! leave the corresponding field as it was; keys that are not listed are
//! ignored.

use crate::error::ParseError;
use crate::state::{
    AlternatorCharger, Battery, Heater, InverterCharger, LedStrip, Mppt, MpptController, Sensors,
    SlaveErrorEvent, SlaveErrorStats, SlaveHealth, System, WaterTank, WaterTanks,
};
use crate::types::{FaultFlags, SlaveErrorCode};

use super::fields::Fields;

/// A record that can be updated in place from a payload object.
pub(crate) trait MergeFields {
    /// Overwrites every field whose key is present in `fields`.
    ///
    /// On error the record may be partially updated; callers decode into a
    /// copy and discard it.
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError>;
}

// ========== Energy ==========

fn merge_controller(
    controller: &mut MpptController,
    fields: &mut Fields<'_, '_>,
    suffix: &str,
) -> Result<(), ParseError> {
    let key = |name: &str| format!("{name}_{suffix}");

    fields.float(&key("solar_power"), &mut controller.solar_power)?;
    fields.float(&key("panel_voltage"), &mut controller.panel_voltage)?;
    fields.float(&key("panel_current"), &mut controller.panel_current)?;
    fields.float(&key("battery_voltage"), &mut controller.battery_voltage)?;
    fields.float(&key("battery_current"), &mut controller.battery_current)?;
    fields.integer(&key("temperature"), &mut controller.temperature)?;
    fields.wire_enum(&key("state"), &mut controller.state)?;
    fields.integer(&key("error_flags"), &mut controller.error_flags)?;
    Ok(())
}

impl MergeFields for Mppt {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        merge_controller(&mut self.primary, fields, "100_50")?;
        merge_controller(&mut self.secondary, fields, "70_15")
    }
}

impl MergeFields for AlternatorCharger {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        fields.wire_enum("state", &mut self.state)?;
        fields.float("input_voltage", &mut self.input_voltage)?;
        fields.float("output_voltage", &mut self.output_voltage)?;
        fields.float("output_current", &mut self.output_current)?;
        Ok(())
    }
}

impl MergeFields for InverterCharger {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        fields.boolean("enabled", &mut self.enabled)?;
        fields.float("ac_input_voltage", &mut self.ac_input_voltage)?;
        fields.float("ac_input_frequency", &mut self.ac_input_frequency)?;
        fields.float("ac_input_current", &mut self.ac_input_current)?;
        fields.float("ac_input_power", &mut self.ac_input_power)?;
        fields.float("ac_output_voltage", &mut self.ac_output_voltage)?;
        fields.float("ac_output_frequency", &mut self.ac_output_frequency)?;
        fields.float("ac_output_current", &mut self.ac_output_current)?;
        fields.float("ac_output_power", &mut self.ac_output_power)?;
        fields.float("battery_voltage", &mut self.battery_voltage)?;
        fields.float("battery_current", &mut self.battery_current)?;
        fields.float("inverter_temperature", &mut self.inverter_temperature)?;
        fields.wire_enum("charger_state", &mut self.charger_state)?;
        fields.integer("error_flags", &mut self.error_flags)?;
        Ok(())
    }
}

impl MergeFields for Battery {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        fields.integer("voltage_mv", &mut self.voltage_mv)?;
        fields.integer("current_ma", &mut self.current_ma)?;
        fields.integer("capacity_mah", &mut self.capacity_mah)?;
        fields.integer("soc_percent", &mut self.soc_percent)?;
        fields.integer("cell_count", &mut self.cell_count)?;
        fields.integers("cell_voltage_mv", &mut self.cell_voltage_mv)?;
        fields.integer("temp_sensor_count", &mut self.temp_sensor_count)?;
        fields.integers("temperatures_c", &mut self.temperatures_c)?;
        fields.integer("cycle_count", &mut self.cycle_count)?;
        fields.integer("nominal_capacity_mah", &mut self.nominal_capacity_mah)?;
        fields.integer("design_capacity_mah", &mut self.design_capacity_mah)?;
        fields.integer("health_percent", &mut self.health_percent)?;
        fields.integer("mosfet_status", &mut self.mosfet_status)?;
        fields.integer("protection_status", &mut self.protection_status)?;
        fields.integer("balance_status", &mut self.balance_status)?;
        Ok(())
    }
}

// ========== Cabin ==========

impl MergeFields for Sensors {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        fields.float("cabin_temperature", &mut self.cabin_temperature)?;
        fields.float("exterior_temperature", &mut self.exterior_temperature)?;
        fields.float("humidity", &mut self.humidity)?;
        fields.integer("co2_level", &mut self.co2_level)?;
        fields.integer("light", &mut self.light)?;
        fields.boolean("door_open", &mut self.door_open)?;
        Ok(())
    }
}

impl MergeFields for Heater {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        fields.boolean("heater_on", &mut self.heater_on)?;
        fields.float("target_air_temperature", &mut self.target_air_temperature)?;
        fields.float("actual_air_temperature", &mut self.actual_air_temperature)?;
        fields.float("antifreeze_temperature", &mut self.antifreeze_temperature)?;
        fields.integer("fuel_level_percent", &mut self.fuel_level_percent)?;
        fields.integer("error_code", &mut self.error_code)?;
        fields.boolean("pump_active", &mut self.pump_active)?;
        fields.integer("radiator_fan_speed", &mut self.radiator_fan_speed)?;
        Ok(())
    }
}

impl MergeFields for LedStrip {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        fields.boolean("enabled", &mut self.enabled)?;
        fields.integer("current_mode", &mut self.current_mode)?;
        fields.integer("brightness", &mut self.brightness)?;
        Ok(())
    }
}

impl MergeFields for System {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        fields.integer("uptime", &mut self.uptime)?;
        fields.boolean("system_error", &mut self.system_error)?;

        let mut code = self.error_code.bits();
        fields.integer("error_code", &mut code)?;
        self.error_code = FaultFlags::from_bits(code);
        Ok(())
    }
}

// ========== Secondary PCB ==========

impl MergeFields for WaterTank {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        fields.float("level_percentage", &mut self.level_percentage)?;
        fields.float("weight_kg", &mut self.weight_kg)?;
        fields.float("volume_liters", &mut self.volume_liters)?;
        Ok(())
    }
}

impl MergeFields for WaterTanks {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        let tanks = [
            ("tank_a", &mut self.tank_a),
            ("tank_b", &mut self.tank_b),
            ("tank_c", &mut self.tank_c),
            ("tank_d", &mut self.tank_d),
            ("tank_e", &mut self.tank_e),
        ];
        for (key, tank) in tanks {
            if let Some(mut nested) = fields.object(key)? {
                tank.merge_fields(&mut nested)?;
            }
        }
        Ok(())
    }
}

impl MergeFields for SlaveErrorStats {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        fields.integer("total_errors", &mut self.total_errors)?;
        fields.integers("errors_by_severity", &mut self.errors_by_severity)?;
        fields.integers("errors_by_category", &mut self.errors_by_category)?;
        fields.integer("last_error_timestamp", &mut self.last_error_timestamp)?;
        fields.integer("last_error_code", &mut self.last_error_code)?;
        Ok(())
    }
}

impl MergeFields for SlaveErrorEvent {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        let mut code = self.error_code.value();
        fields.integer("error_code", &mut code)?;
        self.error_code = SlaveErrorCode::new(code);

        fields.wire_enum("severity", &mut self.severity)?;
        fields.wire_enum("category", &mut self.category)?;
        fields.integer("timestamp", &mut self.timestamp)?;
        fields.string("module", &mut self.module)?;
        fields.string("description", &mut self.description)?;
        fields.integer("data", &mut self.data)?;
        Ok(())
    }
}

impl MergeFields for SlaveHealth {
    fn merge_fields(&mut self, fields: &mut Fields<'_, '_>) -> Result<(), ParseError> {
        fields.boolean("system_healthy", &mut self.system_healthy)?;
        fields.integer("last_health_check", &mut self.last_health_check)?;
        fields.integer("uptime_seconds", &mut self.uptime_seconds)?;
        fields.integer("free_heap_size", &mut self.free_heap_size)?;
        fields.integer("min_free_heap_size", &mut self.min_free_heap_size)?;
        Ok(())
    }
}
