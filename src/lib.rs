// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `vansync` - Telemetry state ingestion for a camper van controller.
//!
//! The van's main PCB periodically sends JSON snapshots of its subsystems:
//! solar controllers, chargers, house battery, cabin sensors, heater, LED
//! strips, the water-management secondary PCB and the projector lift. This
//! library keeps the last-known value of each of them and folds every new
//! payload into it, touching only what the payload carries.
//!
//! # Features
//!
//! - **Partial merge**: sections, LED strips, secondary-PCB slots and
//!   projector fields absent from a payload keep their previous value
//! - **Fault isolation**: a malformed section is skipped and reported while
//!   the rest of the payload is applied
//! - **Safe enum decoding**: out-of-range wire values map to an `Unknown`
//!   variant instead of failing
//! - **Shared state**: a lock-guarded handle with change notifications for
//!   UI readers
//! - **Preferences**: a small JSON-backed settings store
//!
//! # Quick Start
//!
//! ```
//! use vansync::{SharedVanState, view::BatteryGauge};
//!
//! fn main() -> vansync::Result<()> {
//!     let state = SharedVanState::new();
//!
//!     let report = state.merge(
//!         r#"{
//!             "start_van_state": 1,
//!             "battery": {"soc_percent": 76, "current_ma": 3200},
//!             "system": {"uptime": 3600, "error_code": 0},
//!             "end_van_state": 1
//!         }"#,
//!     )?;
//!     assert!(report.is_clean());
//!
//!     let gauge = state.read(BatteryGauge::from_state);
//!     assert_eq!(gauge.percent, Some(76));
//!     assert_eq!(gauge.charging, Some(true));
//!     Ok(())
//! }
//! ```
//!
//! ## Watching for changes
//!
//! ```
//! use vansync::SharedVanState;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let state = SharedVanState::new();
//!     let mut revisions = state.subscribe();
//!
//!     state.merge(r#"{"heater": {"heater_on": true}}"#).unwrap();
//!
//!     revisions.changed().await.unwrap();
//!     let heater_on = state.read(|s| s.heater().map(|h| h.heater_on));
//!     assert_eq!(heater_on, Some(true));
//! }
//! ```

pub mod error;
pub mod preferences;
pub mod state;
pub mod telemetry;
pub mod types;
pub mod view;

pub use error::{Error, ParseError, PreferencesError, Result, ValueError};
pub use preferences::{PreferenceStore, Preferences};
pub use state::{Section, SessionId, SharedVanState, VanState};
pub use telemetry::{MergeReport, SectionError, UnknownEnumValue, merge_payload, parse_root};
pub use types::{FaultFlags, WireEnum, describe_error_code};
