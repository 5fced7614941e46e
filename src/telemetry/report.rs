// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outcome of one merge.

use crate::error::ParseError;

/// A payload unit that could not be decoded and was skipped.
///
/// The state value at `path` was left as it was before the merge.
#[derive(Debug)]
pub struct SectionError {
    /// Dotted path of the skipped unit (for example `leds.roof2`).
    pub path: String,
    /// Why decoding failed.
    pub error: ParseError,
}

/// An enum field whose wire value has no known variant.
///
/// The field was stored as its `Unknown` variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEnumValue {
    /// Dotted path of the field.
    pub field: String,
    /// The wire value that was received. Wider than `i64` so that integers
    /// beyond the `i64` range are reported as sent.
    pub raw: i128,
}

/// Result of merging one payload into a [`VanState`](crate::state::VanState).
///
/// A merge never fails because of a single section. Sections that could not
/// be decoded are listed in [`MergeReport::errors`] and the rest of the
/// payload is still applied.
#[derive(Debug, Default)]
pub struct MergeReport {
    applied: Vec<String>,
    errors: Vec<SectionError>,
    unknown_values: Vec<UnknownEnumValue>,
    changed: bool,
}

impl MergeReport {
    /// Paths of the units that were decoded and committed.
    ///
    /// Units are listed in section order (see
    /// [`Section::ALL`](crate::state::Section::ALL)), not in the order their
    /// keys appear in the payload.
    #[must_use]
    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    /// Units that were skipped because they could not be decoded.
    #[must_use]
    pub fn errors(&self) -> &[SectionError] {
        &self.errors
    }

    /// Enum fields that decoded to their `Unknown` variant.
    #[must_use]
    pub fn unknown_values(&self) -> &[UnknownEnumValue] {
        &self.unknown_values
    }

    /// Returns `true` if nothing was skipped and every enum value was known.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.unknown_values.is_empty()
    }

    /// Returns `true` if the merge modified the state.
    ///
    /// Re-applying a payload that is already reflected in the state reports
    /// the same units as applied but no change.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Returns the path of every skipped unit.
    pub fn error_paths(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.path.as_str())
    }

    pub(crate) fn record_applied(
        &mut self,
        path: String,
        changed: bool,
        unknown: Vec<UnknownEnumValue>,
    ) {
        self.applied.push(path);
        self.changed |= changed;
        self.unknown_values.extend(unknown);
    }

    pub(crate) fn record_error(&mut self, path: String, error: ParseError) {
        self.errors.push(SectionError { path, error });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_clean_and_unchanged() {
        let report = MergeReport::default();
        assert!(report.is_clean());
        assert!(!report.changed());
        assert!(report.applied().is_empty());
    }

    #[test]
    fn unknown_values_make_report_unclean() {
        let mut report = MergeReport::default();
        report.record_applied(
            "videoprojecteur.state".to_string(),
            true,
            vec![UnknownEnumValue {
                field: "videoprojecteur.state".to_string(),
                raw: 999,
            }],
        );

        assert!(!report.is_clean());
        assert!(report.changed());
        assert_eq!(report.unknown_values()[0].raw, 999);
    }

    #[test]
    fn errors_are_listed_by_path() {
        let mut report = MergeReport::default();
        report.record_error(
            "heater".to_string(),
            ParseError::UnexpectedType {
                field: "heater".to_string(),
                expected: "object",
                found: "string",
            },
        );

        assert!(!report.is_clean());
        assert_eq!(report.error_paths().collect::<Vec<_>>(), vec!["heater"]);
    }
}
