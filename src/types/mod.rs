// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types decoded from van telemetry.
//!
//! Two kinds of types live here:
//!
//! - **Wire enums** ([`ChargeState`], [`SystemCase`], [`HoodState`],
//!   [`ProjectorState`], [`ErrorSeverity`], [`ErrorCategory`]). The producer
//!   sends them as small integers. Every one of them decodes through an
//!   explicit lookup and falls back to an `Unknown` variant, so an
//!   out-of-range value can never fail a decode.
//! - **Bitfields** ([`FaultFlags`], [`BmsProtection`], [`MosfetStatus`]) where
//!   several bits may be set at once and all of them are reported.
//!
//! # Examples
//!
//! ```
//! use vansync::types::{ChargeState, FaultFlags, WireEnum};
//!
//! assert_eq!(ChargeState::from_wire(3), ChargeState::Float);
//! assert!(ChargeState::from_wire(42).is_unknown());
//!
//! let flags = FaultFlags::from_bits(0x05);
//! assert_eq!(flags.describe(), "no-fuel heater, sensor comm");
//! ```

/// Common behaviour of integer-encoded enums.
///
/// Implementors never fail to decode: integers outside the known set map to
/// a sentinel variant for which [`WireEnum::is_unknown`] returns `true`.
pub trait WireEnum: Copy {
    /// Wire value that legitimately encodes the sentinel, if the producer
    /// has one (for example `PROJECTOR_STATE_UNKNOWN = 0`).
    const SENTINEL_WIRE: Option<i64> = None;

    /// The sentinel variant.
    const UNKNOWN: Self;

    /// Decodes a wire integer.
    fn from_wire(raw: i64) -> Self;

    /// Returns `true` for the sentinel variant.
    fn is_unknown(self) -> bool;
}

/// Declares a wire enum with an explicit value table and an `Unknown`
/// fallback variant.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $label:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
            /// Value outside the known set.
            #[default]
            Unknown,
        }

        impl $name {
            /// Returns the wire integer, or `None` for [`Self::Unknown`].
            #[must_use]
            pub const fn value(self) -> Option<i64> {
                match self {
                    $( Self::$variant => Some($value), )+
                    Self::Unknown => None,
                }
            }

            /// Returns a short human-readable label.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::Unknown => "unknown",
                }
            }
        }

        impl $crate::types::WireEnum for $name {
            const UNKNOWN: Self = Self::Unknown;

            fn from_wire(raw: i64) -> Self {
                match raw {
                    $( $value => Self::$variant, )+
                    _ => Self::Unknown,
                }
            }

            fn is_unknown(self) -> bool {
                matches!(self, Self::Unknown)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod bms;
mod charge_state;
mod fault_flags;
mod projector_state;
mod slave_error;
mod system_case;

pub use bms::{BmsProtection, MosfetStatus, Protection};
pub use charge_state::ChargeState;
pub use fault_flags::{Fault, FaultFlags, NO_ERROR, describe_error_code};
pub use projector_state::ProjectorState;
pub use slave_error::{ErrorCategory, ErrorSeverity, SlaveErrorClass, SlaveErrorCode};
pub use system_case::{HoodState, SystemCase};
