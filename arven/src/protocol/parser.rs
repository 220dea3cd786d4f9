// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Telemetry frame parser.
//!
//! Receiving-side counterpart of [`crate::protocol::encoder`]. Feed bytes one at a time; a start
//! marker anywhere restarts the frame, and anything that isn't an upper-case hex digit inside the
//! body drops the frame and waits for the next `$`.

use heapless::Vec;

use crate::protocol::frame::*;
use crate::ranging::EchoDuration;
use crate::sensors::BumpFlags;

/// Decoded field values of one frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameFields {
    pub change_mask: u8,
    pub ir_left_mm: u8,
    pub ir_right_mm: u8,
    pub ultrasonic: [EchoDuration; 3],
    pub bump: BumpFlags,
    pub weight: u16,
    pub battery_low: bool,
    pub motor_direction: u8,
    pub front_left_rpm: u8,
    pub front_right_rpm: u8,
}

enum State {
    WaitStart,
    Body,
    WaitEnd,
}

pub struct Parser {
    state: State,
    body: Vec<u8, BODY_LEN>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::WaitStart,
            body: Vec::new(),
        }
    }

    fn restart(&mut self) {
        self.body.clear();
        self.state = State::Body;
    }

    /// Process a single incoming byte. Returns `Some(FrameFields)` once a complete, well-formed
    /// frame has been received.
    pub fn push(&mut self, byte: u8) -> Option<FrameFields> {
        if byte == START_BYTE {
            if !matches!(self.state, State::WaitStart) {
                debug!("parser: resync on start marker");
            }
            self.restart();
            return None;
        }

        match self.state {
            State::WaitStart => {}
            State::Body => {
                if !is_hex_digit(byte) || self.body.push(byte).is_err() {
                    self.state = State::WaitStart;
                } else if self.body.is_full() {
                    self.state = State::WaitEnd;
                }
            }
            State::WaitEnd => {
                self.state = State::WaitStart;
                if byte == END_BYTE {
                    return decode_body(&self.body);
                }
            }
        }
        None
    }

    /// Feed a slice, returning the last complete frame in it.
    pub fn push_slice(&mut self, bytes: &[u8]) -> Option<FrameFields> {
        bytes.iter().fold(None, |last, &b| self.push(b).or(last))
    }
}

/// Decode a complete frame including both markers.
pub fn decode_frame(frame: &[u8]) -> Option<FrameFields> {
    match frame {
        [START_BYTE, body @ .., END_BYTE] if body.len() == BODY_LEN => decode_body(body),
        _ => None,
    }
}

fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_digit() || (b'A'..=b'F').contains(&b)
}

fn hex_value(digits: &[u8]) -> Option<u32> {
    digits.iter().try_fold(0u32, |acc, &d| {
        let nibble = match d {
            b'0'..=b'9' => d - b'0',
            b'A'..=b'F' => d - b'A' + 10,
            _ => return None,
        };
        Some((acc << 4) | nibble as u32)
    })
}

fn decode_body(body: &[u8]) -> Option<FrameFields> {
    // Offsets are relative to the start marker
    let get = |f: Field| {
        let r = f.range();
        hex_value(body.get(r.start - 1..r.end - 1)?)
    };

    let battery_low = match get(Field::BatteryLow)? {
        0 => false,
        1 => true,
        _ => return None,
    };

    Some(FrameFields {
        change_mask: get(Field::ChangeMask)? as u8,
        ir_left_mm: get(Field::IrLeft)? as u8,
        ir_right_mm: get(Field::IrRight)? as u8,
        ultrasonic: [
            EchoDuration::from_micros(get(Field::UltrasonicLeft)?),
            EchoDuration::from_micros(get(Field::UltrasonicCenter)?),
            EchoDuration::from_micros(get(Field::UltrasonicRight)?),
        ],
        bump: bump_from_digit(*body.get(Field::Bump.offset() - 1)?)?,
        weight: get(Field::Weight)? as u16,
        battery_low,
        motor_direction: get(Field::MotorDirection)? as u8,
        front_left_rpm: get(Field::FrontLeftSpeed)? as u8,
        front_right_rpm: get(Field::FrontRightSpeed)? as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: &[u8; FRAME_LEN] = b"$A52AFF000FF0000012345A07F0206400^";

    fn expected() -> FrameFields {
        FrameFields {
            change_mask: 0xA5,
            ir_left_mm: 0x2A,
            ir_right_mm: 0xFF,
            ultrasonic: [
                EchoDuration::from_micros(0xFF),
                EchoDuration::ZERO,
                EchoDuration::from_micros(0x1_2345),
            ],
            bump: BumpFlags {
                left: true,
                right: false,
            },
            weight: 0x7F,
            battery_low: false,
            motor_direction: DIR_FRONT_LEFT,
            front_left_rpm: 0x64,
            front_right_rpm: 0,
        }
    }

    #[test]
    fn parses_byte_by_byte() {
        let mut p = Parser::new();
        let (last, head) = FRAME.split_last().unwrap();
        for &b in head {
            assert_eq!(p.push(b), None);
        }
        assert_eq!(p.push(*last), Some(expected()));
    }

    #[test]
    fn skips_leading_noise() {
        let mut p = Parser::new();
        assert_eq!(p.push_slice(b"xx^12"), None);
        assert_eq!(p.push_slice(FRAME), Some(expected()));
    }

    #[test]
    fn resyncs_on_truncated_frame() {
        let mut p = Parser::new();
        p.push_slice(&FRAME[..10]);
        assert_eq!(p.push_slice(FRAME), Some(expected()));
    }

    #[test]
    fn drops_malformed_frames() {
        let mut p = Parser::new();

        let mut lower = *FRAME;
        lower[1] = b'a';
        assert_eq!(p.push_slice(&lower), None);

        let mut bad_bump = *FRAME;
        bad_bump[Field::Bump.offset()] = b'E';
        assert_eq!(p.push_slice(&bad_bump), None);

        let mut bad_battery = *FRAME;
        bad_battery[Field::BatteryLow.offset()] = b'2';
        assert_eq!(p.push_slice(&bad_battery), None);

        let mut no_end = *FRAME;
        no_end[FRAME_LEN - 1] = b'0';
        assert_eq!(p.push_slice(&no_end), None);

        // Still usable afterwards
        assert_eq!(p.push_slice(FRAME), Some(expected()));
    }

    #[test]
    fn decodes_whole_frame() {
        assert_eq!(decode_frame(FRAME), Some(expected()));
        assert_eq!(decode_frame(&FRAME[1..]), None);
    }
}
