// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Water-routing cases and hood state of the secondary PCB.

wire_enum! {
    /// Active water-routing case on the secondary PCB.
    ///
    /// Tanks: EP = clean water, ES = grey water, ER = recovered water,
    /// V = drain. The producer's `CASE_MAX` (12) is a bound, not a case, and
    /// decodes to [`SystemCase::Unknown`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vansync::types::{SystemCase, WireEnum};
    ///
    /// assert_eq!(SystemCase::from_wire(5), SystemCase::D1);
    /// assert!(SystemCase::from_wire(12).is_unknown());
    /// ```
    pub enum SystemCase {
        /// Reset, all valves closed.
        Rst = 0 => "RST",
        /// Sink, clean tank to grey tank.
        E1 = 1 => "E1",
        /// Sink, clean tank to recovery tank.
        E2 = 2 => "E2",
        /// Sink, recovery tank to grey tank.
        E3 = 3 => "E3",
        /// Sink, recovery tank to recovery tank.
        E4 = 4 => "E4",
        /// Shower, clean tank to grey tank.
        D1 = 5 => "D1",
        /// Shower, clean tank to recovery tank.
        D2 = 6 => "D2",
        /// Shower, recovery tank to grey tank.
        D3 = 7 => "D3",
        /// Shower, recovery tank to recovery tank.
        D4 = 8 => "D4",
        /// Drain the grey tank.
        V1 = 9 => "V1",
        /// Drain the recovery tank.
        V2 = 10 => "V2",
        /// Rain collection into the recovery tank.
        P1 = 11 => "P1",
    }
}

impl SystemCase {
    /// Describes the water path of this case.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Rst => "reset",
            Self::E1 => "sink: clean tank → grey tank",
            Self::E2 => "sink: clean tank → recovery tank",
            Self::E3 => "sink: recovery tank → grey tank",
            Self::E4 => "sink: recovery tank → recovery tank",
            Self::D1 => "shower: clean tank → grey tank",
            Self::D2 => "shower: clean tank → recovery tank",
            Self::D3 => "shower: recovery tank → grey tank",
            Self::D4 => "shower: recovery tank → recovery tank",
            Self::V1 => "drain grey tank",
            Self::V2 => "drain recovery tank",
            Self::P1 => "rain → recovery tank",
            Self::Unknown => "unknown",
        }
    }
}

wire_enum! {
    /// Extractor hood state.
    pub enum HoodState {
        /// Hood off.
        Off = 0 => "off",
        /// Hood on.
        On = 1 => "on",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WireEnum;

    #[test]
    fn case_table_matches_producer_order() {
        assert_eq!(SystemCase::from_wire(0), SystemCase::Rst);
        assert_eq!(SystemCase::from_wire(4), SystemCase::E4);
        assert_eq!(SystemCase::from_wire(9), SystemCase::V1);
        assert_eq!(SystemCase::from_wire(11), SystemCase::P1);
        assert_eq!(SystemCase::P1.value(), Some(11));
    }

    #[test]
    fn case_max_and_beyond_are_unknown() {
        assert!(SystemCase::from_wire(12).is_unknown());
        assert!(SystemCase::from_wire(255).is_unknown());
        assert!(SystemCase::from_wire(-3).is_unknown());
    }

    #[test]
    fn case_description() {
        assert_eq!(SystemCase::V2.description(), "drain recovery tank");
        assert_eq!(SystemCase::Unknown.description(), "unknown");
    }

    #[test]
    fn hood_state_lookup() {
        assert_eq!(HoodState::from_wire(0), HoodState::Off);
        assert_eq!(HoodState::from_wire(1), HoodState::On);
        assert!(HoodState::from_wire(2).is_unknown());
        assert_eq!(HoodState::On.to_string(), "on");
    }
}
