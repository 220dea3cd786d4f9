// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wheel odometry from a 16-bit quadrature counter.
//!
//! Each call to [`Odometer::update`] takes the current counter value and the edge clock time,
//! and turns the difference since the previous call into a direction and a speed in RPM.

use crate::config::EDGE_CLOCK_HZ;
use crate::sensors::snapshot::MotorReading;

pub struct Odometer {
    counts_per_rev: u32,
    last_count: u16,
    last_tick: u32,
    reading: MotorReading,
    primed: bool,
}

impl Odometer {
    pub const fn new(counts_per_rev: u32) -> Self {
        Self {
            counts_per_rev,
            last_count: 0,
            last_tick: 0,
            reading: MotorReading::STOPPED,
            primed: false,
        }
    }

    /// Feed a new counter sample taken at `now` (edge clock ticks).
    ///
    /// The first sample only establishes the reference point. A stationary wheel keeps its last
    /// direction. Speed saturates at 255 RPM, the widest value the frame can carry.
    pub fn update(&mut self, count: u16, now: u32) -> MotorReading {
        if !self.primed {
            self.primed = true;
            self.last_count = count;
            self.last_tick = now;
            return self.reading;
        }

        let delta = count.wrapping_sub(self.last_count) as i16;
        let elapsed = now.wrapping_sub(self.last_tick);
        self.last_count = count;
        self.last_tick = now;

        if delta != 0 {
            self.reading.forward = delta > 0;
        }

        self.reading.rpm = if elapsed == 0 || self.counts_per_rev == 0 {
            0
        } else {
            let counts = delta.unsigned_abs() as u64;
            let rpm = counts * 60 * EDGE_CLOCK_HZ as u64 / (self.counts_per_rev as u64 * elapsed as u64);
            rpm.min(u8::MAX as u64) as u8
        };

        self.reading
    }
}
