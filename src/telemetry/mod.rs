// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Merging of van telemetry payloads into a [`VanState`].
//!
//! A payload is a JSON object whose top-level keys name sections of the
//! state (`mppt`, `battery`, `leds`, `slave_pcb`, `videoprojecteur`, ...).
//! Only the sections and fields present in a payload are touched; everything
//! else keeps its previous value. A JSON `null` counts as absent and unknown
//! keys, including the `start_van_state`/`end_van_state` framing markers, are
//! ignored.
//!
//! # Failure handling
//!
//! - A payload that is not JSON, or whose root is not an object, is rejected
//!   as a whole and nothing is applied.
//! - A payload unit that cannot be decoded is skipped and listed in the
//!   [`MergeReport`]; the other units of the payload are still applied.
//! - An enum value with no known variant is stored as the `Unknown` variant
//!   and listed in the report.
//!
//! A unit is a whole flat section (`battery`, `heater`, ...), one LED strip,
//! one slot of `slave_pcb`, or one field of `videoprojecteur`. Each unit is
//! decoded into a copy and committed only if decoding succeeded.
//!
//! # Examples
//!
//! ```
//! use vansync::state::VanState;
//! use vansync::telemetry::merge_payload;
//!
//! let mut state = VanState::new();
//! merge_payload(&mut state, r#"{"heater": {"heater_on": true, "fuel_level_percent": 70}}"#)
//!     .unwrap();
//!
//! let report = merge_payload(
//!     &mut state,
//!     r#"{"battery": {"soc_percent": 91}, "heater": "broken"}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(report.applied(), &["battery".to_string()]);
//! assert_eq!(report.error_paths().collect::<Vec<_>>(), vec!["heater"]);
//! assert_eq!(state.heater().unwrap().fuel_level_percent, 70);
//! ```

mod decode;
mod fields;
mod report;

pub use report::{MergeReport, SectionError, UnknownEnumValue};

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::state::{
    Leds, MAX_ERROR_HISTORY, Projector, Section, SlaveErrorEvent, SlavePcb, StripId, VanState,
};

use decode::MergeFields;
use fields::{Fields, decode_bool, decode_enum, decode_f32, decode_integer, json_type, present};

/// Parses a payload and checks that its root is a JSON object.
///
/// # Errors
///
/// Returns [`ParseError::Json`] for invalid JSON and
/// [`ParseError::NotAnObject`] for any other root value.
///
/// # Examples
///
/// ```
/// use vansync::telemetry::parse_root;
///
/// let root = parse_root(r#"{"start_van_state": true, "system": {}}"#).unwrap();
/// assert!(root.contains_key("system"));
///
/// assert!(parse_root("[1, 2, 3]").unwrap_err().is_malformed_root());
/// ```
pub fn parse_root(payload: &str) -> Result<Map<String, Value>, ParseError> {
    match serde_json::from_str(payload)? {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::NotAnObject(json_type(&other))),
    }
}

/// Parses `payload` and merges it into `state`.
///
/// # Errors
///
/// Returns an error only if the payload root is malformed, in which case
/// `state` is unchanged. See the [module documentation](self) for how
/// errors inside the payload are handled.
pub fn merge_payload(state: &mut VanState, payload: &str) -> Result<MergeReport, ParseError> {
    let root = parse_root(payload)?;
    Ok(merge_root(state, &root))
}

/// Merges an already parsed payload root into `state`.
pub fn merge_root(state: &mut VanState, root: &Map<String, Value>) -> MergeReport {
    let mut merger = Merger::default();

    for section in Section::ALL {
        let Some(value) = present(root, section.key()) else {
            continue;
        };
        let path = section.key().to_string();
        match section {
            Section::Mppt => {
                merger.section(value, path, state.mppt_slot());
            }
            Section::AlternatorCharger => {
                merger.section(value, path, state.alternator_charger_slot());
            }
            Section::InverterCharger => {
                merger.section(value, path, state.inverter_charger_slot());
            }
            Section::Battery => {
                merger.section(value, path, state.battery_slot());
            }
            Section::Sensors => {
                merger.section(value, path, state.sensors_slot());
            }
            Section::Heater => {
                merger.section(value, path, state.heater_slot());
            }
            Section::System => {
                merger.section(value, path, state.system_slot());
            }
            Section::Leds => merger.leds(value, state.leds_slot()),
            Section::SlavePcb => merger.slave_pcb(value, state.slave_pcb_slot()),
            Section::Projector => merger.projector(value, state.projector_slot()),
        }
    }

    merger.report
}

#[derive(Default)]
struct Merger {
    report: MergeReport,
}

impl Merger {
    /// Decodes one unit into a copy of `slot` and commits it on success.
    ///
    /// Returns `true` if the unit was applied.
    fn apply<T>(
        &mut self,
        path: String,
        slot: &mut Option<T>,
        decode: impl FnOnce(&mut T, &mut Vec<UnknownEnumValue>) -> Result<(), ParseError>,
    ) -> bool
    where
        T: Clone + Default + PartialEq,
    {
        let mut draft = slot.clone().unwrap_or_default();
        let mut unknown = Vec::new();

        match decode(&mut draft, &mut unknown) {
            Ok(()) => {
                for value in &unknown {
                    tracing::warn!(
                        field = %value.field,
                        raw = %value.raw,
                        "Unknown enum value, stored as unknown"
                    );
                }
                let changed = slot.as_ref() != Some(&draft);
                if changed {
                    *slot = Some(draft);
                }
                tracing::debug!(path = %path, changed, "Applied telemetry unit");
                self.report.record_applied(path, changed, unknown);
                true
            }
            Err(error) => {
                tracing::warn!(path = %path, error = %error, "Skipping undecodable telemetry unit");
                self.report.record_error(path, error);
                false
            }
        }
    }

    /// Applies a record unit through its [`MergeFields`] implementation.
    fn section<T>(&mut self, value: &Value, path: String, slot: &mut Option<T>) -> bool
    where
        T: MergeFields + Clone + Default + PartialEq,
    {
        let fields_path = path.clone();
        self.apply(path, slot, |record, unknown| {
            let mut fields = Fields::of(value, fields_path, unknown)?;
            record.merge_fields(&mut fields)
        })
    }

    /// Applies a scalar unit stored under `key` of `map`, if present.
    fn scalar<T>(
        &mut self,
        map: &Map<String, Value>,
        parent: &str,
        key: &str,
        slot: &mut Option<T>,
        decode: impl FnOnce(&Value, &str, &mut Vec<UnknownEnumValue>) -> Result<T, ParseError>,
    ) -> bool
    where
        T: Clone + Default + PartialEq,
    {
        let Some(value) = present(map, key) else {
            return false;
        };
        let path = format!("{parent}.{key}");
        self.apply(path.clone(), slot, |target, unknown| {
            *target = decode(value, &path, unknown)?;
            Ok(())
        })
    }

    /// Opens a section made of independent units, recording an error if it
    /// is not an object.
    fn container<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Map<String, Value>> {
        let map = value.as_object();
        if map.is_none() {
            let error = fields::unexpected(path, "object", value);
            tracing::warn!(path = %path, error = %error, "Skipping undecodable telemetry unit");
            self.report.record_error(path.to_string(), error);
        }
        map
    }

    // ========== Sections with independent units ==========

    fn leds(&mut self, value: &Value, slot: &mut Option<Leds>) {
        let Some(strips) = self.container(value, "leds") else {
            return;
        };

        let mut leds = slot.clone().unwrap_or_default();
        let mut applied = false;
        for id in StripId::ALL {
            if let Some(strip) = present(strips, id.key()) {
                applied |= self.section(strip, format!("leds.{id}"), leds.strip_mut(id));
            }
        }
        if applied {
            *slot = Some(leds);
        }
    }

    fn slave_pcb(&mut self, value: &Value, slot: &mut Option<SlavePcb>) {
        let Some(map) = self.container(value, "slave_pcb") else {
            return;
        };

        let mut pcb = slot.clone().unwrap_or_default();
        let mut applied = false;

        applied |= self.scalar(map, "slave_pcb", "timestamp", &mut pcb.timestamp, |v, p, _| {
            decode_integer(v, p)
        });
        applied |= self.scalar(
            map,
            "slave_pcb",
            "current_case",
            &mut pcb.current_case,
            decode_enum,
        );
        applied |= self.scalar(map, "slave_pcb", "hood_state", &mut pcb.hood_state, decode_enum);

        // `water_tanks` wins when both spellings are present.
        let tanks = ["water_tanks", "tanks_levels"]
            .into_iter()
            .find_map(|key| present(map, key).map(|tanks| (key, tanks)));
        if let Some((key, tanks)) = tanks {
            applied |= self.section(tanks, format!("slave_pcb.{key}"), &mut pcb.tanks_levels);
        }

        if let Some(error_state) = present(map, "error_state")
            && let Some(error_map) = self.container(error_state, "slave_pcb.error_state")
        {
            if let Some(stats) = present(error_map, "stats") {
                applied |= self.section(
                    stats,
                    "slave_pcb.error_state.stats".to_string(),
                    &mut pcb.error_state.stats,
                );
            }
            if present(error_map, "last_errors").is_some() {
                applied |= self.apply(
                    "slave_pcb.error_state.last_errors".to_string(),
                    &mut pcb.error_state.last_errors,
                    |events, unknown| {
                        let mut fields =
                            Fields::of(error_state, "slave_pcb.error_state".to_string(), unknown)?;
                        *events = decode_error_history(&mut fields)?;
                        Ok(())
                    },
                );
            }
        }

        if let Some(health) = present(map, "system_health") {
            applied |= self.section(
                health,
                "slave_pcb.system_health".to_string(),
                &mut pcb.system_health,
            );
        }

        if applied {
            *slot = Some(pcb);
        }
    }

    fn projector(&mut self, value: &Value, slot: &mut Option<Projector>) {
        const PATH: &str = "videoprojecteur";
        let Some(map) = self.container(value, PATH) else {
            return;
        };

        let mut projector = slot.clone().unwrap_or_default();
        let mut applied = false;

        applied |= self.scalar(map, PATH, "state", &mut projector.state, decode_enum);
        applied |= self.scalar(map, PATH, "connected", &mut projector.connected, |v, p, _| {
            decode_bool(v, p)
        });
        applied |= self.scalar(
            map,
            PATH,
            "last_update_time",
            &mut projector.last_update_time,
            |v, p, _| decode_integer(v, p),
        );
        applied |= self.scalar(
            map,
            PATH,
            "position_percent",
            &mut projector.position_percent,
            |v, p, _| decode_f32(v, p),
        );

        if applied {
            *slot = Some(projector);
        }
    }
}

/// Decodes the `last_errors` list of an `error_state` object.
///
/// Received order is kept. Lists longer than [`MAX_ERROR_HISTORY`] keep
/// their most recent (last) entries.
fn decode_error_history(fields: &mut Fields<'_, '_>) -> Result<Vec<SlaveErrorEvent>, ParseError> {
    let items = fields.array("last_errors")?.unwrap_or_default();

    let skip = items.len().saturating_sub(MAX_ERROR_HISTORY);
    if skip > 0 {
        tracing::warn!(
            path = %fields.path(),
            received = items.len(),
            kept = MAX_ERROR_HISTORY,
            "Error history longer than supported, keeping most recent entries"
        );
    }

    let mut events = Vec::with_capacity(items.len() - skip);
    for (index, item) in items.iter().enumerate().skip(skip) {
        let mut event = SlaveErrorEvent::default();
        event.merge_fields(&mut fields.element("last_errors", index, item)?)?;
        events.push(event);
    }
    Ok(events)
}
