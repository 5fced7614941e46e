// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Secondary PCB (water management) state.

use serde::Serialize;

use crate::types::{ErrorCategory, ErrorSeverity, HoodState, SlaveErrorCode, SystemCase};

/// Maximum number of error events kept in [`SlaveErrorState::last_errors`].
pub const MAX_ERROR_HISTORY: usize = 10;

/// Number of severity buckets in [`SlaveErrorStats::errors_by_severity`].
pub const SEVERITY_BUCKETS: usize = 4;

/// Number of category buckets in [`SlaveErrorStats::errors_by_category`].
pub const CATEGORY_BUCKETS: usize = 8;

/// Level of one water tank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WaterTank {
    /// Fill level in percent.
    pub level_percentage: f32,
    /// Load-cell weight in kilograms.
    pub weight_kg: f32,
    /// Estimated volume in litres.
    pub volume_liters: f32,
}

/// Levels of the five water tanks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WaterTanks {
    /// Tank A.
    pub tank_a: WaterTank,
    /// Tank B.
    pub tank_b: WaterTank,
    /// Tank C.
    pub tank_c: WaterTank,
    /// Tank D.
    pub tank_d: WaterTank,
    /// Tank E.
    pub tank_e: WaterTank,
}

impl WaterTanks {
    /// Iterates over `(name, tank)` pairs in order A to E.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &WaterTank)> {
        [
            ("tank_a", &self.tank_a),
            ("tank_b", &self.tank_b),
            ("tank_c", &self.tank_c),
            ("tank_d", &self.tank_d),
            ("tank_e", &self.tank_e),
        ]
        .into_iter()
    }

    /// Total estimated water volume in litres.
    #[must_use]
    pub fn total_volume_liters(&self) -> f32 {
        self.iter().map(|(_, tank)| tank.volume_liters).sum()
    }
}

/// One entry of the secondary PCB error history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlaveErrorEvent {
    /// Error code.
    pub error_code: SlaveErrorCode,
    /// Severity.
    pub severity: ErrorSeverity,
    /// Category.
    pub category: ErrorCategory,
    /// Time of the event, in seconds since the secondary PCB booted.
    pub timestamp: u32,
    /// Module that raised the error.
    pub module: String,
    /// Free-text description.
    pub description: String,
    /// Additional error data.
    pub data: u32,
}

impl SlaveErrorEvent {
    /// Returns `true` for an unused history slot.
    ///
    /// The producer always sends a full history buffer and leaves unused
    /// slots zeroed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.error_code.value() == 0 && self.timestamp == 0 && self.module.is_empty()
    }
}

/// Error counters of the secondary PCB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlaveErrorStats {
    /// Errors since boot.
    pub total_errors: u32,
    /// Counters indexed by severity value.
    pub errors_by_severity: [u32; SEVERITY_BUCKETS],
    /// Counters per category bucket.
    pub errors_by_category: [u32; CATEGORY_BUCKETS],
    /// Time of the last error.
    pub last_error_timestamp: u32,
    /// Code of the last error.
    pub last_error_code: u32,
}

/// Error counters and recent history of the secondary PCB.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlaveErrorState {
    /// Counters, unknown until first received.
    pub stats: Option<SlaveErrorStats>,
    /// Recent events in received order, unknown until first received.
    pub last_errors: Option<Vec<SlaveErrorEvent>>,
}

impl SlaveErrorState {
    /// Iterates over the history entries that hold an actual event.
    pub fn recorded_errors(&self) -> impl Iterator<Item = &SlaveErrorEvent> {
        self.last_errors
            .iter()
            .flatten()
            .filter(|event| !event.is_empty())
    }
}

/// Health report of the secondary PCB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlaveHealth {
    /// Overall health flag.
    pub system_healthy: bool,
    /// Time of the last self-check.
    pub last_health_check: u32,
    /// Uptime in seconds.
    pub uptime_seconds: u32,
    /// Free heap in bytes.
    pub free_heap_size: u32,
    /// Lowest free heap since boot, in bytes.
    pub min_free_heap_size: u32,
}

/// Secondary PCB state. Every slot is known or unknown on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlavePcb {
    /// Producer timestamp of the snapshot.
    pub timestamp: Option<i64>,
    /// Active water-routing case.
    pub current_case: Option<SystemCase>,
    /// Extractor hood state.
    pub hood_state: Option<HoodState>,
    /// Tank levels.
    pub tanks_levels: Option<WaterTanks>,
    /// Error counters and history.
    pub error_state: SlaveErrorState,
    /// Health report.
    pub system_health: Option<SlaveHealth>,
}
