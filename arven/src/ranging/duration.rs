// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Echo duration.
//!
//! The edge clock runs at twice the microsecond rate, so a raw capture span is halved exactly once
//! when it becomes an [`EchoDuration`]. Everything downstream of the engine (snapshot, telemetry
//! frame) carries this post-halved unit.

use crate::config::TICKS_PER_US;

/// Round-trip time of one ultrasonic pulse, in microseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EchoDuration(u32);

impl EchoDuration {
    pub const ZERO: Self = Self(0);

    /// Convert a raw edge clock span into a duration.
    #[inline]
    pub const fn from_ticks(ticks: u32) -> Self {
        Self(ticks / TICKS_PER_US)
    }

    #[inline]
    pub const fn from_micros(us: u32) -> Self {
        Self(us)
    }

    #[inline]
    pub const fn as_micros(self) -> u32 {
        self.0
    }

    /// One-way distance to the obstacle in millimeters (343 m/s, halved for the round trip).
    #[inline]
    pub const fn distance_mm(self) -> u32 {
        ((self.0 as u64 * 343) / 2_000) as u32
    }
}
