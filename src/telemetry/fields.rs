// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-field decoders over `serde_json` values.
//!
//! Every decoder takes the dotted path of the value so that errors name the
//! exact field. A JSON `null` is treated the same as an absent key.

use serde_json::{Map, Number, Value};

use crate::error::ParseError;
use crate::types::WireEnum;

use super::report::UnknownEnumValue;

/// Returns the JSON type name of `value`, as used in error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Looks up `key`, treating `null` as absent.
pub(crate) fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

pub(crate) fn unexpected(path: &str, expected: &'static str, value: &Value) -> ParseError {
    ParseError::UnexpectedType {
        field: path.to_string(),
        expected,
        found: json_type(value),
    }
}

fn invalid(path: &str, message: String) -> ParseError {
    ParseError::InvalidValue {
        field: path.to_string(),
        message,
    }
}

// ========== Scalars ==========

/// Decodes a number into `f32`.
///
/// Numbers beyond the `f32` range are rejected rather than stored as
/// infinity.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn decode_f32(value: &Value, path: &str) -> Result<f32, ParseError> {
    let wide = value
        .as_f64()
        .ok_or_else(|| unexpected(path, "number", value))?;
    let narrowed = wide as f32;
    if wide.is_finite() && !narrowed.is_finite() {
        return Err(invalid(path, format!("{wide} is outside the f32 range")));
    }
    Ok(narrowed)
}

pub(crate) fn decode_bool(value: &Value, path: &str) -> Result<bool, ParseError> {
    value.as_bool().ok_or_else(|| unexpected(path, "boolean", value))
}

pub(crate) fn decode_string(value: &Value, path: &str) -> Result<String, ParseError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| unexpected(path, "string", value))
}

/// Decodes an integer into `T`.
///
/// Floats with no fractional part (`3.0`) are accepted. Values that do not
/// fit in `T` are rejected rather than truncated.
pub(crate) fn decode_integer<T: TryFrom<i64>>(value: &Value, path: &str) -> Result<T, ParseError> {
    let (number, raw) = wide_integer(value, path)?;
    i64::try_from(raw)
        .ok()
        .and_then(|n| T::try_from(n).ok())
        .ok_or_else(|| {
            invalid(
                path,
                format!("{number} does not fit in {}", std::any::type_name::<T>()),
            )
        })
}

fn wide_integer<'v>(value: &'v Value, path: &str) -> Result<(&'v Number, i128), ParseError> {
    let Value::Number(number) = value else {
        return Err(unexpected(path, "integer", value));
    };
    let raw = integral(number)
        .ok_or_else(|| invalid(path, format!("{number} is not an integer")))?;
    Ok((number, raw))
}

/// Returns the integer value of `number`, or `None` if it has a fractional
/// part. Integral floats beyond the `i128` range saturate.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn integral(number: &Number) -> Option<i128> {
    if let Some(n) = number.as_i64() {
        return Some(n.into());
    }
    if let Some(n) = number.as_u64() {
        return Some(n.into());
    }
    let f = number.as_f64()?;
    (f.is_finite() && f.trunc() == f).then_some(f as i128)
}

/// Decodes a wire enum, recording values with no known variant.
///
/// Any integer is accepted, including ones beyond the `i64` range; those
/// decode to the sentinel like any other unmapped value.
pub(crate) fn decode_enum<E: WireEnum>(
    value: &Value,
    path: &str,
    unknown: &mut Vec<UnknownEnumValue>,
) -> Result<E, ParseError> {
    let (_, raw) = wide_integer(value, path)?;
    let decoded = i64::try_from(raw).map_or(E::UNKNOWN, E::from_wire);
    if decoded.is_unknown() && E::SENTINEL_WIRE.map(i128::from) != Some(raw) {
        unknown.push(UnknownEnumValue {
            field: path.to_string(),
            raw,
        });
    }
    Ok(decoded)
}

// ========== Objects ==========

/// Cursor over one JSON object of a payload.
///
/// The `update` style methods overwrite their target only when the key is
/// present, which is what gives the merge its field granularity.
pub(crate) struct Fields<'a, 'u> {
    map: &'a Map<String, Value>,
    path: String,
    unknown: &'u mut Vec<UnknownEnumValue>,
}

impl<'a, 'u> Fields<'a, 'u> {
    /// Opens `value` as an object located at `path`.
    pub(crate) fn of(
        value: &'a Value,
        path: String,
        unknown: &'u mut Vec<UnknownEnumValue>,
    ) -> Result<Self, ParseError> {
        let map = value
            .as_object()
            .ok_or_else(|| unexpected(&path, "object", value))?;
        Ok(Self { map, path, unknown })
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        present(self.map, key)
    }

    fn field_path(&self, key: &str) -> String {
        format!("{}.{key}", self.path)
    }

    pub(crate) fn float(&self, key: &str, target: &mut f32) -> Result<(), ParseError> {
        if let Some(value) = self.get(key) {
            *target = decode_f32(value, &self.field_path(key))?;
        }
        Ok(())
    }

    pub(crate) fn integer<T: TryFrom<i64>>(
        &self,
        key: &str,
        target: &mut T,
    ) -> Result<(), ParseError> {
        if let Some(value) = self.get(key) {
            *target = decode_integer(value, &self.field_path(key))?;
        }
        Ok(())
    }

    pub(crate) fn boolean(&self, key: &str, target: &mut bool) -> Result<(), ParseError> {
        if let Some(value) = self.get(key) {
            *target = decode_bool(value, &self.field_path(key))?;
        }
        Ok(())
    }

    pub(crate) fn string(&self, key: &str, target: &mut String) -> Result<(), ParseError> {
        if let Some(value) = self.get(key) {
            *target = decode_string(value, &self.field_path(key))?;
        }
        Ok(())
    }

    /// Decodes a fixed-capacity integer array.
    ///
    /// A shorter array zero-fills the tail; a longer one is an error.
    pub(crate) fn integers<T, const N: usize>(
        &self,
        key: &str,
        target: &mut [T; N],
    ) -> Result<(), ParseError>
    where
        T: TryFrom<i64> + Copy + Default,
    {
        let Some(items) = self.array(key)? else {
            return Ok(());
        };
        let path = self.field_path(key);
        if items.len() > N {
            return Err(invalid(
                &path,
                format!("expected at most {N} elements, found {}", items.len()),
            ));
        }

        let mut decoded = [T::default(); N];
        for (index, (slot, item)) in decoded.iter_mut().zip(items).enumerate() {
            *slot = decode_integer(item, &format!("{path}[{index}]"))?;
        }
        *target = decoded;
        Ok(())
    }

    pub(crate) fn wire_enum<E: WireEnum>(
        &mut self,
        key: &str,
        target: &mut E,
    ) -> Result<(), ParseError> {
        if let Some(value) = self.get(key) {
            *target = decode_enum(value, &self.field_path(key), self.unknown)?;
        }
        Ok(())
    }

    pub(crate) fn array(&self, key: &str) -> Result<Option<&'a [Value]>, ParseError> {
        self.get(key)
            .map(|value| {
                value
                    .as_array()
                    .map(Vec::as_slice)
                    .ok_or_else(|| unexpected(&self.field_path(key), "array", value))
            })
            .transpose()
    }

    /// Opens the nested object at `key`, if present.
    pub(crate) fn object(&mut self, key: &str) -> Result<Option<Fields<'a, '_>>, ParseError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let path = self.field_path(key);
        Fields::of(value, path, self.unknown).map(Some)
    }

    /// Opens an element of an array read from this object.
    pub(crate) fn element(
        &mut self,
        key: &str,
        index: usize,
        value: &'a Value,
    ) -> Result<Fields<'a, '_>, ParseError> {
        let path = format!("{}[{index}]", self.field_path(key));
        Fields::of(value, path, self.unknown)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{ProjectorState, SystemCase};

    #[test]
    fn integral_floats_are_integers() {
        assert_eq!(decode_integer::<u8>(&json!(3.0), "x").unwrap(), 3);
        assert_eq!(decode_integer::<i64>(&json!(-12), "x").unwrap(), -12);
    }

    #[test]
    fn fractional_numbers_are_rejected() {
        let err = decode_integer::<u16>(&json!(2.5), "heater.error_code").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidValue { ref field, .. } if field == "heater.error_code"
        ));
    }

    #[test]
    fn out_of_range_integers_are_rejected() {
        let err = decode_integer::<u8>(&json!(300), "battery.soc_percent").unwrap_err();
        assert!(err.to_string().contains("does not fit in u8"));
        assert!(decode_integer::<u32>(&json!(-1), "x").is_err());
        assert!(decode_integer::<i64>(&json!(u64::MAX), "x").is_err());
    }

    #[test]
    fn wrong_type_is_unexpected() {
        let err = decode_f32(&json!("12.5"), "sensors.humidity").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedType {
                expected: "number",
                found: "string",
                ..
            }
        ));
    }

    #[test]
    fn null_is_absent() {
        let value = json!({"humidity": null, "light": 7});
        let mut unknown = Vec::new();
        let fields = Fields::of(&value, "sensors".to_string(), &mut unknown).unwrap();

        let mut humidity = 41.0;
        let mut light = 0_u16;
        fields.float("humidity", &mut humidity).unwrap();
        fields.integer("light", &mut light).unwrap();

        assert!((humidity - 41.0).abs() < f32::EPSILON);
        assert_eq!(light, 7);
    }

    #[test]
    fn short_arrays_zero_fill() {
        let value = json!({"cells": [3300, 3310]});
        let mut unknown = Vec::new();
        let fields = Fields::of(&value, "battery".to_string(), &mut unknown).unwrap();

        let mut cells = [9_u16; 4];
        fields.integers("cells", &mut cells).unwrap();
        assert_eq!(cells, [3300, 3310, 0, 0]);
    }

    #[test]
    fn long_arrays_are_rejected_without_mutation() {
        let value = json!({"cells": [1, 2, 3]});
        let mut unknown = Vec::new();
        let fields = Fields::of(&value, "battery".to_string(), &mut unknown).unwrap();

        let mut cells = [9_u16; 2];
        let err = fields.integers("cells", &mut cells).unwrap_err();
        assert!(err.to_string().contains("at most 2 elements"));
        assert_eq!(cells, [9, 9]);
    }

    #[test]
    fn bad_array_element_names_its_index() {
        let value = json!({"temps": [20, "hot"]});
        let mut unknown = Vec::new();
        let fields = Fields::of(&value, "battery".to_string(), &mut unknown).unwrap();

        let mut temps = [0_i16; 4];
        let err = fields.integers("temps", &mut temps).unwrap_err();
        assert!(err.to_string().starts_with("battery.temps[1]"));
    }

    #[test]
    fn floats_beyond_f32_range_are_rejected() {
        let err = decode_f32(&json!(1e39), "sensors.humidity").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidValue { ref field, .. } if field == "sensors.humidity"
        ));
        assert!(decode_f32(&json!(-1e39), "x").is_err());
        assert!(decode_f32(&json!(3.4e38), "x").unwrap().is_finite());
    }

    #[test]
    fn enum_beyond_i64_range_is_unknown() {
        let mut unknown = Vec::new();
        let state: ProjectorState =
            decode_enum(&json!(u64::MAX), "videoprojecteur.state", &mut unknown).unwrap();

        assert_eq!(state, ProjectorState::Unknown);
        assert_eq!(unknown[0].raw, i128::from(u64::MAX));
    }

    #[test]
    fn fractional_enum_value_is_rejected() {
        let mut unknown = Vec::new();
        let result: Result<SystemCase, _> =
            decode_enum(&json!(1.5), "slave_pcb.current_case", &mut unknown);

        assert!(matches!(result, Err(ParseError::InvalidValue { .. })));
        assert!(unknown.is_empty());
    }

    #[test]
    fn unknown_enum_values_are_recorded() {
        let mut unknown = Vec::new();
        let case: SystemCase =
            decode_enum(&json!(12), "slave_pcb.current_case", &mut unknown).unwrap();

        assert_eq!(case, SystemCase::Unknown);
        assert_eq!(
            unknown,
            vec![UnknownEnumValue {
                field: "slave_pcb.current_case".to_string(),
                raw: 12,
            }]
        );
    }

    #[test]
    fn sentinel_wire_value_is_not_reported() {
        let mut unknown = Vec::new();
        let state: ProjectorState =
            decode_enum(&json!(0), "videoprojecteur.state", &mut unknown).unwrap();

        assert_eq!(state, ProjectorState::Unknown);
        assert!(unknown.is_empty());
    }

    #[test]
    fn nested_objects_extend_the_path() {
        let value = json!({"tank_a": {"weight_kg": "heavy"}});
        let mut unknown = Vec::new();
        let mut fields =
            Fields::of(&value, "slave_pcb.water_tanks".to_string(), &mut unknown).unwrap();

        let nested = fields.object("tank_a").unwrap().unwrap();
        assert_eq!(nested.path(), "slave_pcb.water_tanks.tank_a");

        let mut weight = 0.0;
        let err = nested.float("weight_kg", &mut weight).unwrap_err();
        assert!(err.to_string().starts_with("slave_pcb.water_tanks.tank_a.weight_kg"));
    }
}
