// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Latest-known sensor snapshot.
//!
//! One instance lives for the whole program and is overwritten in place every polling cycle. A
//! field only ever holds a completed measurement: when a ranging attempt fails the previous value
//! is kept, so the telemetry stream degrades to stale-but-valid data instead of stopping.

use crate::ranging::{ChannelId, EchoDuration, RangingError};
use crate::sensors::bump::BumpFlags;

/// IR distance reported before the first successful reading.
pub const IR_NO_READING: u8 = 0xFF;

/// Drive motors, in frame bit order (front-left is bit 5 of the direction byte).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motor {
    FrontLeft = 0,
    FrontRight = 1,
    MiddleLeft = 2,
    MiddleRight = 3,
    BackLeft = 4,
    BackRight = 5,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorReading {
    /// `true` when the wheel turns forward.
    pub forward: bool,
    pub rpm: u8,
}

impl MotorReading {
    pub const STOPPED: Self = Self {
        forward: false,
        rpm: 0,
    };
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSnapshot {
    pub ir_left_mm: u8,
    pub ir_right_mm: u8,
    /// Indexed by [`ChannelId`].
    pub ultrasonic: [EchoDuration; 3],
    pub bump: BumpFlags,
    /// Raw A/D value from the force sensing resistor.
    pub weight: u16,
    pub battery_low: bool,
    /// Indexed by [`Motor`]. Only the front pair is fitted; the rest stay stopped.
    pub motors: [MotorReading; 6],
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSnapshot {
    pub const fn new() -> Self {
        Self {
            ir_left_mm: IR_NO_READING,
            ir_right_mm: IR_NO_READING,
            ultrasonic: [EchoDuration::ZERO; 3],
            bump: BumpFlags {
                left: false,
                right: false,
            },
            weight: 0,
            battery_low: false,
            motors: [MotorReading::STOPPED; 6],
        }
    }

    #[inline]
    pub fn ultrasonic(&self, channel: ChannelId) -> EchoDuration {
        self.ultrasonic[channel.index()]
    }

    #[inline]
    pub fn set_ultrasonic(&mut self, channel: ChannelId, duration: EchoDuration) {
        self.ultrasonic[channel.index()] = duration;
    }

    /// Store a ranging outcome. Failed attempts leave the previous value in place.
    ///
    /// Returns `true` if the field was updated.
    pub fn record_ranging(
        &mut self,
        channel: ChannelId,
        result: Result<EchoDuration, RangingError>,
    ) -> bool {
        match result {
            Ok(duration) => {
                trace!(
                    "snapshot: {} {} us ({} mm)",
                    channel,
                    duration.as_micros(),
                    duration.distance_mm()
                );
                self.set_ultrasonic(channel, duration);
                true
            }
            Err(e) => {
                debug!("snapshot: keeping stale {} reading ({})", channel, e);
                false
            }
        }
    }

    #[inline]
    pub fn motor(&self, motor: Motor) -> MotorReading {
        self.motors[motor as usize]
    }

    #[inline]
    pub fn set_motor(&mut self, motor: Motor, reading: MotorReading) {
        self.motors[motor as usize] = reading;
    }
}
