// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error event classification for the secondary PCB.

use std::fmt;

wire_enum! {
    /// Severity of a secondary-PCB error event.
    pub enum ErrorSeverity {
        /// Informational, the system continues normally.
        Info = 0 => "info",
        /// Might need attention.
        Warning = 1 => "warning",
        /// Functionality impacted.
        Error = 2 => "error",
        /// System safety at risk.
        Critical = 3 => "critical",
    }
}

wire_enum! {
    /// Category of a secondary-PCB error event.
    ///
    /// Categories are single-bit values on the wire; combined values do not
    /// occur in events and decode to [`ErrorCategory::Unknown`].
    pub enum ErrorCategory {
        /// No category.
        None = 0 => "none",
        /// Initialisation.
        Init = 1 => "init",
        /// Communication bus.
        Comm = 2 => "communication",
        /// Attached device.
        Device = 4 => "device",
        /// Sensor reading.
        Sensor = 8 => "sensor",
        /// Pump or valve actuator.
        Actuator = 16 => "actuator",
        /// Firmware or system.
        System = 32 => "system",
        /// Water-routing case transition.
        Case = 64 => "case",
        /// Safety limit.
        Safety = 128 => "safety",
    }
}

/// Class of a secondary-PCB error code, taken from its high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum SlaveErrorClass {
    /// Code `0`, no error.
    Ok,
    /// `0x1xxx` initialisation errors.
    Init,
    /// `0x2xxx` communication errors.
    Comm,
    /// `0x3xxx` device errors.
    Device,
    /// `0x4xxx` state or case errors.
    State,
    /// `0x5xxx` safety errors.
    Safety,
    /// Any other code.
    Unknown,
}

/// Error code carried by a secondary-PCB error event.
///
/// # Examples
///
/// ```
/// use vansync::types::{SlaveErrorClass, SlaveErrorCode};
///
/// let code = SlaveErrorCode::new(0x5003);
/// assert_eq!(code.class(), SlaveErrorClass::Safety);
/// assert_eq!(code.name(), Some("overcurrent"));
///
/// let unnamed = SlaveErrorCode::new(0x20FF);
/// assert_eq!(unnamed.class(), SlaveErrorClass::Comm);
/// assert_eq!(unnamed.name(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct SlaveErrorCode(u32);

impl SlaveErrorCode {
    /// Wraps a raw error code.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Returns the raw code.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the class of this code.
    #[must_use]
    pub const fn class(self) -> SlaveErrorClass {
        if self.0 == 0 {
            return SlaveErrorClass::Ok;
        }
        match self.0 >> 12 {
            0x1 => SlaveErrorClass::Init,
            0x2 => SlaveErrorClass::Comm,
            0x3 => SlaveErrorClass::Device,
            0x4 => SlaveErrorClass::State,
            0x5 => SlaveErrorClass::Safety,
            _ => SlaveErrorClass::Unknown,
        }
    }

    /// Returns the name of a known code.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0 => "ok",
            0x1001 => "invalid argument",
            0x1002 => "initialisation failed",
            0x1003 => "out of memory",
            0x2001 => "communication failure",
            0x2002 => "I2C failure",
            0x2003 => "SPI failure",
            0x2004 => "timeout",
            0x3001 => "device not found",
            0x3002 => "device busy",
            0x3003 => "device fault",
            0x4001 => "invalid state",
            0x4002 => "incompatible case",
            0x4003 => "case transition failed",
            0x5001 => "safety limit reached",
            0x5002 => "emergency stop",
            0x5003 => "overcurrent",
            0x5004 => "sensor out of range",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for SlaveErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} (0x{:04X})", self.0),
            None => write!(f, "0x{:04X}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WireEnum;

    #[test]
    fn severity_lookup() {
        assert_eq!(ErrorSeverity::from_wire(0), ErrorSeverity::Info);
        assert_eq!(ErrorSeverity::from_wire(3), ErrorSeverity::Critical);
        assert!(ErrorSeverity::from_wire(4).is_unknown());
    }

    #[test]
    fn category_uses_bit_values() {
        assert_eq!(ErrorCategory::from_wire(0), ErrorCategory::None);
        assert_eq!(ErrorCategory::from_wire(2), ErrorCategory::Comm);
        assert_eq!(ErrorCategory::from_wire(128), ErrorCategory::Safety);
        assert!(ErrorCategory::from_wire(3).is_unknown());
        assert_eq!(ErrorCategory::Case.value(), Some(64));
    }

    #[test]
    fn code_classes() {
        assert_eq!(SlaveErrorCode::new(0).class(), SlaveErrorClass::Ok);
        assert_eq!(SlaveErrorCode::new(0x1003).class(), SlaveErrorClass::Init);
        assert_eq!(SlaveErrorCode::new(0x3002).class(), SlaveErrorClass::Device);
        assert_eq!(SlaveErrorCode::new(0x4002).class(), SlaveErrorClass::State);
        assert_eq!(SlaveErrorCode::new(0x9000).class(), SlaveErrorClass::Unknown);
    }

    #[test]
    fn code_display() {
        assert_eq!(SlaveErrorCode::new(0x2004).to_string(), "timeout (0x2004)");
        assert_eq!(SlaveErrorCode::new(0x2100).to_string(), "0x2100");
    }
}
