// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `vansync` library.
//!
//! Three families of failures exist:
//!
//! - [`ParseError`] for telemetry payloads that cannot be decoded, either as a
//!   whole (malformed root) or for a single section or field.
//! - [`ValueError`] for section and strip names that do not exist.
//! - [`PreferencesError`] for the preference file store.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A telemetry payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A name did not match any known value.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Preferences could not be loaded or saved.
    #[error("preferences error: {0}")]
    Preferences(#[from] PreferencesError),
}

/// Errors raised while decoding a telemetry payload.
///
/// [`ParseError::Json`] and [`ParseError::NotAnObject`] are root failures:
/// when they are returned from a merge, nothing was applied. The other
/// variants describe a single section or field and are collected in the
/// merge report instead of aborting the merge.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The payload is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload root is valid JSON but not an object.
    #[error("payload root is not a JSON object (found {0})")]
    NotAnObject(&'static str),

    /// A field holds a JSON value of the wrong type.
    #[error("{field}: expected {expected}, found {found}")]
    UnexpectedType {
        /// Dotted path of the offending field.
        field: String,
        /// The JSON type that was expected.
        expected: &'static str,
        /// The JSON type that was found.
        found: &'static str,
    },

    /// A field has the right JSON type but an unusable value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

impl ParseError {
    /// Returns `true` if this error rejects the whole payload.
    #[must_use]
    pub fn is_malformed_root(&self) -> bool {
        matches!(self, Self::Json(_) | Self::NotAnObject(_))
    }
}

/// Errors for values parsed from names, such as section or strip keys.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A section name did not match any known section.
    #[error("unknown section: {0}")]
    UnknownSection(String),
}

/// Errors from the preference file store.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// Reading or writing the preference file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The preference file could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
