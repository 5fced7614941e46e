// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System error-code bitmask.

use std::fmt;

/// Message returned by [`FaultFlags::describe`] when no bit is set.
pub const NO_ERROR: &str = "no error";

/// A single fault of the main-PCB system error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Fault {
    /// Bit 0: the diesel heater ran out of fuel.
    HeaterNoFuel,
    /// Bit 1: MPPT controllers not answering.
    MpptComm,
    /// Bit 2: environmental sensors not answering.
    SensorComm,
    /// Bit 3: secondary PCB not answering.
    SlaveComm,
    /// Bit 4: LED strip driver fault.
    LedStrip,
    /// Bit 5: fan control fault.
    FanControl,
}

impl Fault {
    /// Every fault, in bit order.
    pub const ALL: [Self; 6] = [
        Self::HeaterNoFuel,
        Self::MpptComm,
        Self::SensorComm,
        Self::SlaveComm,
        Self::LedStrip,
        Self::FanControl,
    ];

    /// Returns the bit mask of this fault.
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Self::HeaterNoFuel => 0x01,
            Self::MpptComm => 0x02,
            Self::SensorComm => 0x04,
            Self::SlaveComm => 0x08,
            Self::LedStrip => 0x10,
            Self::FanControl => 0x20,
        }
    }

    /// Returns the human-readable fault name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeaterNoFuel => "no-fuel heater",
            Self::MpptComm => "MPPT comm",
            Self::SensorComm => "sensor comm",
            Self::SlaveComm => "secondary-PCB comm",
            Self::LedStrip => "LED strip",
            Self::FanControl => "fan control",
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bitmask of active system faults.
///
/// Several bits may be set at once; all of them are reported.
///
/// # Examples
///
/// ```
/// use vansync::types::{Fault, FaultFlags};
///
/// let flags = FaultFlags::from_bits(0x05);
/// assert!(flags.contains(Fault::HeaterNoFuel));
/// assert!(flags.contains(Fault::SensorComm));
/// assert_eq!(flags.describe(), "no-fuel heater, sensor comm");
///
/// assert_eq!(FaultFlags::NONE.describe(), "no error");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct FaultFlags(u32);

impl FaultFlags {
    /// No fault.
    pub const NONE: Self = Self(0);

    const KNOWN_MASK: u32 = 0x3F;

    /// Wraps a raw error code.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw error code, unknown bits included.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` when no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `fault` is active.
    #[must_use]
    pub const fn contains(self, fault: Fault) -> bool {
        self.0 & fault.bit() != 0
    }

    /// Returns the bits that do not map to a known fault.
    #[must_use]
    pub const fn unknown_bits(self) -> u32 {
        self.0 & !Self::KNOWN_MASK
    }

    /// Iterates over the active faults in bit order.
    pub fn faults(self) -> impl Iterator<Item = Fault> {
        Fault::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// Renders the active faults as a comma-separated list.
    ///
    /// Bits without a known meaning are left out; they stay available
    /// through [`FaultFlags::bits`]. Returns [`NO_ERROR`] when no known fault
    /// is active.
    #[must_use]
    pub fn describe(self) -> String {
        let parts: Vec<&str> = self.faults().map(Fault::as_str).collect();
        if parts.is_empty() {
            return NO_ERROR.to_string();
        }
        parts.join(", ")
    }
}

impl From<u32> for FaultFlags {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Display for FaultFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Renders a raw system error code as text.
///
/// # Examples
///
/// ```
/// use vansync::types::describe_error_code;
///
/// assert_eq!(describe_error_code(0), "no error");
/// assert_eq!(describe_error_code(0x22), "MPPT comm, fan control");
/// ```
#[must_use]
pub fn describe_error_code(code: u32) -> String {
    FaultFlags::from_bits(code).describe()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_no_error() {
        assert_eq!(describe_error_code(0x00), NO_ERROR);
        assert!(FaultFlags::NONE.is_empty());
        assert_eq!(FaultFlags::NONE.faults().count(), 0);
    }

    #[test]
    fn bits_zero_and_two() {
        let faults: Vec<Fault> = FaultFlags::from_bits(0x05).faults().collect();
        assert_eq!(faults, vec![Fault::HeaterNoFuel, Fault::SensorComm]);
        assert_eq!(describe_error_code(0x05), "no-fuel heater, sensor comm");
    }

    #[test]
    fn every_bit_reported_in_order() {
        assert_eq!(
            describe_error_code(0x3F),
            "no-fuel heater, MPPT comm, sensor comm, secondary-PCB comm, LED strip, fan control"
        );
    }

    #[test]
    fn unknown_bits_are_kept() {
        let flags = FaultFlags::from_bits(0x48);
        assert_eq!(flags.bits(), 0x48);
        assert_eq!(flags.unknown_bits(), 0x40);
        assert_eq!(flags.describe(), "secondary-PCB comm");
    }

    #[test]
    fn unknown_bits_alone_describe_as_no_error() {
        let flags = FaultFlags::from_bits(0x40);
        assert!(!flags.is_empty());
        assert_eq!(flags.faults().count(), 0);
        assert_eq!(flags.describe(), NO_ERROR);
    }

    #[test]
    fn single_bits_match_fault_masks() {
        for fault in Fault::ALL {
            let flags = FaultFlags::from(fault.bit());
            assert_eq!(flags.faults().collect::<Vec<_>>(), vec![fault]);
            assert_eq!(flags.describe(), fault.as_str());
        }
    }
}
