// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Change mask.
//!
//! One bit per sensor group, set when that group differs from the previous frame. The battery
//! line has no bit. The first frame after reset reports everything as changed.

use crate::ranging::ChannelId;
use crate::sensors::{Motor, SensorSnapshot};

pub const IR_LEFT: u8 = 1 << 7;
pub const IR_RIGHT: u8 = 1 << 6;
pub const US_LEFT: u8 = 1 << 5;
pub const US_CENTER: u8 = 1 << 4;
pub const US_RIGHT: u8 = 1 << 3;
pub const BUMPS: u8 = 1 << 2;
pub const WEIGHT: u8 = 1 << 1;
pub const ENCODERS: u8 = 1 << 0;
pub const ALL: u8 = 0xFF;

const US_BITS: [u8; 3] = [US_LEFT, US_CENTER, US_RIGHT];

/// Bits for every group that differs between `prev` and `next`.
pub fn diff(prev: &SensorSnapshot, next: &SensorSnapshot) -> u8 {
    let mut mask = 0;

    if prev.ir_left_mm != next.ir_left_mm {
        mask |= IR_LEFT;
    }
    if prev.ir_right_mm != next.ir_right_mm {
        mask |= IR_RIGHT;
    }
    for ch in ChannelId::ALL {
        if prev.ultrasonic(ch) != next.ultrasonic(ch) {
            mask |= US_BITS[ch.index()];
        }
    }
    if prev.bump != next.bump {
        mask |= BUMPS;
    }
    if prev.weight != next.weight {
        mask |= WEIGHT;
    }
    if [Motor::FrontLeft, Motor::FrontRight]
        .into_iter()
        .any(|m| prev.motor(m) != next.motor(m))
    {
        mask |= ENCODERS;
    }

    mask
}

/// Remembers the last transmitted snapshot.
pub struct ChangeTracker {
    last: Option<SensorSnapshot>,
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeTracker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Mask for `snapshot` relative to the previous call, then remember it.
    pub fn update(&mut self, snapshot: &SensorSnapshot) -> u8 {
        let mask = match &self.last {
            Some(prev) => diff(prev, snapshot),
            None => ALL,
        };
        self.last = Some(*snapshot);
        mask
    }
}
