// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Telemetry frame layout.
//!
//! ```text
//! $ MM LL RR UUUUU CCCCC VVVVV B WWW P DD FF GG ^
//! ```
//!
//! Every field is upper-case ASCII hex, zero-padded to a fixed width, so the receiver parses by
//! offset. Changing any width is a breaking protocol change.

use crate::sensors::BumpFlags;

/// Sync byte opening every frame.
pub const START_BYTE: u8 = b'$';
/// Terminator closing every frame.
pub const END_BYTE: u8 = b'^';

/// Total frame length including both markers.
pub const FRAME_LEN: usize = 34;
/// Everything between the markers.
pub const BODY_LEN: usize = FRAME_LEN - 2;

pub type Frame = [u8; FRAME_LEN];

// Motor direction byte
pub const DIR_FRONT_LEFT: u8 = 1 << 5;
pub const DIR_FRONT_RIGHT: u8 = 1 << 4;

/// Frame fields in wire order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    ChangeMask,
    IrLeft,
    IrRight,
    UltrasonicLeft,
    UltrasonicCenter,
    UltrasonicRight,
    Bump,
    Weight,
    BatteryLow,
    MotorDirection,
    FrontLeftSpeed,
    FrontRightSpeed,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::ChangeMask,
        Field::IrLeft,
        Field::IrRight,
        Field::UltrasonicLeft,
        Field::UltrasonicCenter,
        Field::UltrasonicRight,
        Field::Bump,
        Field::Weight,
        Field::BatteryLow,
        Field::MotorDirection,
        Field::FrontLeftSpeed,
        Field::FrontRightSpeed,
    ];

    /// Width in characters.
    pub const fn width(self) -> usize {
        match self {
            Field::UltrasonicLeft | Field::UltrasonicCenter | Field::UltrasonicRight => 5,
            Field::Weight => 3,
            Field::Bump | Field::BatteryLow => 1,
            _ => 2,
        }
    }

    /// Offset from the start marker.
    pub const fn offset(self) -> usize {
        match self {
            Field::ChangeMask => 1,
            Field::IrLeft => 3,
            Field::IrRight => 5,
            Field::UltrasonicLeft => 7,
            Field::UltrasonicCenter => 12,
            Field::UltrasonicRight => 17,
            Field::Bump => 22,
            Field::Weight => 23,
            Field::BatteryLow => 26,
            Field::MotorDirection => 27,
            Field::FrontLeftSpeed => 29,
            Field::FrontRightSpeed => 31,
        }
    }

    /// Largest value the field can carry.
    pub const fn max(self) -> u32 {
        match self {
            Field::BatteryLow => 1,
            _ => (1 << (4 * self.width() as u32)) - 1,
        }
    }

    #[inline]
    pub const fn range(self) -> core::ops::Range<usize> {
        self.offset()..self.offset() + self.width()
    }
}

/// Encode the bump pair as one hex digit in `A..=D`.
///
/// The low two bits of the digit are `left << 1 | right`:
///
/// | L | R | digit |
/// |---|---|-------|
/// | 1 | 0 | `A` |
/// | 1 | 1 | `B` |
/// | 0 | 0 | `C` |
/// | 0 | 1 | `D` |
pub const fn bump_digit(flags: BumpFlags) -> u8 {
    let bits = ((flags.left as u8) << 1) | flags.right as u8;
    b'A' + ((bits + 2) & 0b11)
}

/// Inverse of [`bump_digit`]. `None` for anything outside `A..=D`.
pub const fn bump_from_digit(digit: u8) -> Option<BumpFlags> {
    match digit {
        b'A'..=b'D' => {
            // A..D are 0xA..0xD, whose low two bits carry the flags
            let bits = (digit - b'A' + 0xA) & 0b11;
            Some(BumpFlags {
                left: bits & 0b10 != 0,
                right: bits & 0b01 != 0,
            })
        }
        _ => None,
    }
}
