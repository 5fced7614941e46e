// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Van state types.
//!
//! [`VanState`] holds the last-known status of every subsystem. Each section
//! is optional: `None` means nothing was received yet, not zero. Sections
//! with independently reported parts ([`Leds`], [`SlavePcb`], [`Projector`])
//! carry their own optional slots.
//!
//! [`SharedVanState`] is the handle passed to both the ingestion path and
//! the UI readers of a session.
//!
//! # Examples
//!
//! ```
//! use vansync::state::{SharedVanState, StripId};
//!
//! let shared = SharedVanState::new();
//! shared
//!     .merge(r#"{"leds": {"roof1": {"enabled": true, "brightness": 200}}}"#)
//!     .unwrap();
//! shared.merge(r#"{"leds": {"roof2": {"enabled": false}}}"#).unwrap();
//!
//! let state = shared.snapshot();
//! let leds = state.leds().unwrap();
//! assert_eq!(leds.strip(StripId::Roof1).map(|s| s.brightness), Some(200));
//! assert_eq!(leds.strip(StripId::Roof2).map(|s| s.enabled), Some(false));
//! ```

mod cabin;
mod energy;
mod projector;
mod session;
mod shared;
mod slave_pcb;
mod van_state;

pub use cabin::{Heater, LedStrip, Leds, Sensors, StripId, System};
pub use energy::{
    AlternatorCharger, Battery, InverterCharger, MAX_CELLS, MAX_TEMP_SENSORS, Mppt,
    MpptController,
};
pub use projector::Projector;
pub use session::SessionId;
pub use shared::SharedVanState;
pub use slave_pcb::{
    CATEGORY_BUCKETS, MAX_ERROR_HISTORY, SEVERITY_BUCKETS, SlaveErrorEvent, SlaveErrorState,
    SlaveErrorStats, SlaveHealth, SlavePcb, WaterTank, WaterTanks,
};
pub use van_state::{Section, VanState};
