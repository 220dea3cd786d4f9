// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Frame encoder.
//!
//! Rendering a snapshot is a pure function: the same snapshot and change mask always produce the
//! same bytes. Values wider than their field are clamped to the field maximum so the frame length
//! never changes.

use crate::protocol::frame::*;
use crate::sensors::{Motor, SensorSnapshot};

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Byte sink for outgoing frames.
pub trait Transport {
    /// Push every byte out before returning.
    fn transmit(&mut self, bytes: &[u8]);
}

/// Capture buffer, handy as a loopback sink. Bytes past capacity are dropped.
impl<const N: usize> Transport for heapless::Vec<u8, N> {
    fn transmit(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if self.push(b).is_err() {
                warn!("transport: capture buffer full");
                return;
            }
        }
    }
}

struct FrameWriter {
    buf: Frame,
    pos: usize,
}

impl FrameWriter {
    fn new() -> Self {
        let mut buf = [0; FRAME_LEN];
        buf[0] = START_BYTE;
        Self { buf, pos: 1 }
    }

    fn hex(&mut self, field: Field, value: u32) {
        debug_assert_eq!(self.pos, field.offset());

        let max = field.max();
        let value = if value > max {
            debug!("frame: {} clamped ({} > {})", field, value, max);
            max
        } else {
            value
        };

        for shift in (0..field.width()).rev() {
            self.buf[self.pos] = HEX[((value >> (4 * shift)) & 0xF) as usize];
            self.pos += 1;
        }
    }

    fn raw(&mut self, field: Field, byte: u8) {
        debug_assert_eq!(self.pos, field.offset());
        self.buf[self.pos] = byte;
        self.pos += 1;
    }

    fn finish(mut self) -> Frame {
        debug_assert_eq!(self.pos, FRAME_LEN - 1);
        self.buf[self.pos] = END_BYTE;
        self.buf
    }
}

/// Direction bits of the fitted drive motors.
pub fn motor_direction(snapshot: &SensorSnapshot) -> u8 {
    let mut bits = 0;
    if snapshot.motor(Motor::FrontLeft).forward {
        bits |= DIR_FRONT_LEFT;
    }
    if snapshot.motor(Motor::FrontRight).forward {
        bits |= DIR_FRONT_RIGHT;
    }
    bits
}

pub fn encode_frame(snapshot: &SensorSnapshot, change_mask: u8) -> Frame {
    use crate::ranging::ChannelId;

    let mut w = FrameWriter::new();
    w.hex(Field::ChangeMask, change_mask as u32);
    w.hex(Field::IrLeft, snapshot.ir_left_mm as u32);
    w.hex(Field::IrRight, snapshot.ir_right_mm as u32);
    w.hex(
        Field::UltrasonicLeft,
        snapshot.ultrasonic(ChannelId::Left).as_micros(),
    );
    w.hex(
        Field::UltrasonicCenter,
        snapshot.ultrasonic(ChannelId::Center).as_micros(),
    );
    w.hex(
        Field::UltrasonicRight,
        snapshot.ultrasonic(ChannelId::Right).as_micros(),
    );
    w.raw(Field::Bump, bump_digit(snapshot.bump));
    w.hex(Field::Weight, snapshot.weight as u32);
    w.hex(Field::BatteryLow, snapshot.battery_low as u32);
    w.hex(Field::MotorDirection, motor_direction(snapshot) as u32);
    w.hex(
        Field::FrontLeftSpeed,
        snapshot.motor(Motor::FrontLeft).rpm as u32,
    );
    w.hex(
        Field::FrontRightSpeed,
        snapshot.motor(Motor::FrontRight).rpm as u32,
    );
    w.finish()
}

/// Encode and transmit one frame. Returns the bytes that were sent.
pub fn send_frame<T: Transport>(tx: &mut T, snapshot: &SensorSnapshot, change_mask: u8) -> Frame {
    let frame = encode_frame(snapshot, change_mask);
    tx.transmit(&frame);
    trace!("frame: sent, mask {=u8:#04x}", change_mask);
    frame
}
