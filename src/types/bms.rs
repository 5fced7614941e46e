// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Battery management system status bitfields (JBD smart BMS).

use std::fmt;

/// A protection reported in the BMS `protection_status` word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Protection {
    /// Bit 0.
    CellOvervoltage,
    /// Bit 1.
    CellUndervoltage,
    /// Bit 2.
    PackOvervoltage,
    /// Bit 3.
    PackUndervoltage,
    /// Bit 4.
    ChargeOverTemperature,
    /// Bit 5.
    ChargeLowTemperature,
    /// Bit 6.
    DischargeOverTemperature,
    /// Bit 7.
    DischargeLowTemperature,
    /// Bit 8.
    ChargeOvercurrent,
    /// Bit 9.
    DischargeOvercurrent,
    /// Bit 10.
    ShortCircuit,
    /// Bit 11.
    FrontEndIcError,
    /// Bit 12.
    SoftwareMosLock,
}

impl Protection {
    /// Every protection, in bit order.
    pub const ALL: [Self; 13] = [
        Self::CellOvervoltage,
        Self::CellUndervoltage,
        Self::PackOvervoltage,
        Self::PackUndervoltage,
        Self::ChargeOverTemperature,
        Self::ChargeLowTemperature,
        Self::DischargeOverTemperature,
        Self::DischargeLowTemperature,
        Self::ChargeOvercurrent,
        Self::DischargeOvercurrent,
        Self::ShortCircuit,
        Self::FrontEndIcError,
        Self::SoftwareMosLock,
    ];

    /// Returns the bit mask of this protection.
    #[must_use]
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Returns a short human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CellOvervoltage => "cell overvoltage",
            Self::CellUndervoltage => "cell undervoltage",
            Self::PackOvervoltage => "pack overvoltage",
            Self::PackUndervoltage => "pack undervoltage",
            Self::ChargeOverTemperature => "charge over-temperature",
            Self::ChargeLowTemperature => "charge low temperature",
            Self::DischargeOverTemperature => "discharge over-temperature",
            Self::DischargeLowTemperature => "discharge low temperature",
            Self::ChargeOvercurrent => "charge overcurrent",
            Self::DischargeOvercurrent => "discharge overcurrent",
            Self::ShortCircuit => "short circuit",
            Self::FrontEndIcError => "front-end IC error",
            Self::SoftwareMosLock => "software MOS lock",
        }
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The BMS protection word. Bits 13..=15 are reserved and ignored.
///
/// # Examples
///
/// ```
/// use vansync::types::{BmsProtection, Protection};
///
/// let status = BmsProtection::from_bits(0b100_0000_0001);
/// let active: Vec<_> = status.active().collect();
/// assert_eq!(active, vec![Protection::CellOvervoltage, Protection::ShortCircuit]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct BmsProtection(u16);

impl BmsProtection {
    /// Wraps a raw protection word.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Returns the raw word.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns `true` if `protection` is active.
    #[must_use]
    pub const fn contains(self, protection: Protection) -> bool {
        self.0 & protection.bit() != 0
    }

    /// Returns `true` if no protection is active.
    #[must_use]
    pub fn is_clear(self) -> bool {
        self.active().next().is_none()
    }

    /// Iterates over active protections in bit order.
    pub fn active(self) -> impl Iterator<Item = Protection> {
        Protection::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

/// The BMS MOSFET output byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct MosfetStatus(u8);

impl MosfetStatus {
    /// Wraps a raw MOSFET byte.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Returns `true` when the charge MOSFET is on (bit 0).
    #[must_use]
    pub const fn charge_enabled(self) -> bool {
        self.0 & 0x01 != 0
    }

    /// Returns `true` when the discharge MOSFET is on (bit 1).
    #[must_use]
    pub const fn discharge_enabled(self) -> bool {
        self.0 & 0x02 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protection_bits_follow_declaration_order() {
        assert_eq!(Protection::CellOvervoltage.bit(), 0x0001);
        assert_eq!(Protection::ChargeOvercurrent.bit(), 0x0100);
        assert_eq!(Protection::SoftwareMosLock.bit(), 0x1000);
    }

    #[test]
    fn reserved_bits_are_ignored() {
        let status = BmsProtection::from_bits(0xE000);
        assert!(status.is_clear());
        assert_eq!(status.bits(), 0xE000);
    }

    #[test]
    fn multiple_protections() {
        let status = BmsProtection::from_bits(0x0210);
        let active: Vec<_> = status.active().collect();
        assert_eq!(
            active,
            vec![Protection::ChargeOverTemperature, Protection::DischargeOvercurrent]
        );
    }

    #[test]
    fn mosfet_bits() {
        let both = MosfetStatus::from_bits(0x03);
        assert!(both.charge_enabled());
        assert!(both.discharge_enabled());

        let discharge_only = MosfetStatus::from_bits(0x02);
        assert!(!discharge_only.charge_enabled());
        assert!(discharge_only.discharge_enabled());
    }
}
