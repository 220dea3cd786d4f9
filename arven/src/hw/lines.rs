// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Raw GPIO line access for the ranging engine and the sensor lines.
//!
//! The HAL hands out one typed pin per line, but the engine addresses lines by [`LineId`] from
//! both thread and interrupt context. [`BoardLines`] talks to the port registers directly: reads
//! go through IDR and writes through the atomic set/reset register, so no read-modify-write races
//! with the pins the HAL owns.

use stm32f7xx_hal::pac;

use crate::ranging::{Level, LineId, LineIo, Port};

macro_rules! with_port {
    ($port:expr, |$regs:ident| $body:expr) => {
        match $port {
            Port::A => {
                let $regs = unsafe { &*pac::GPIOA::ptr() };
                $body
            }
            Port::B => {
                let $regs = unsafe { &*pac::GPIOB::ptr() };
                $body
            }
            Port::C => {
                let $regs = unsafe { &*pac::GPIOC::ptr() };
                $body
            }
            Port::D => {
                let $regs = unsafe { &*pac::GPIOD::ptr() };
                $body
            }
            Port::E => {
                let $regs = unsafe { &*pac::GPIOE::ptr() };
                $body
            }
        }
    };
}

/// Register-level line access. Pin modes must already be set up (see [`super::BoardPins`]).
#[derive(Copy, Clone, Default)]
pub struct BoardLines;

impl LineIo for BoardLines {
    fn set_line(&mut self, line: LineId, level: Level) {
        let bits = match level {
            Level::High => line.mask(),
            Level::Low => line.mask() << 16,
        };
        with_port!(line.port, |gpio| gpio.bsrr.write(|w| unsafe { w.bits(bits) }));
    }

    fn read_line(&self, line: LineId) -> Level {
        let idr = with_port!(line.port, |gpio| gpio.idr.read().bits());
        if idr & line.mask() != 0 {
            Level::High
        } else {
            Level::Low
        }
    }
}
