// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Companion computer link.
//!
//! Transmit-only wrapper around a HAL serial port. Telemetry frames are pushed out byte by byte
//! with blocking writes and the FIFO is drained before [`Transport::transmit`] returns, so the
//! next polling cycle never overlaps the previous frame on the wire.

use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

use crate::protocol::Transport;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

impl<U: Instance> Transport for Usart<U> {
    fn transmit(&mut self, bytes: &[u8]) {
        self.write_bytes(bytes);
        self.flush();
    }
}
