// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! External interrupt routing for the echo and bump lines.
//!
//! Each EXTI line is routed to one GPIO port through SYSCFG and armed for both edges. The two
//! shared vectors are gated through the NVIC, which is what the ranging engine masks while it
//! generates a trigger pulse.

use cortex_m::peripheral::NVIC;
use stm32f7xx_hal::pac::{self, Interrupt};

use crate::ranging::{EdgeInterrupts, IrqGroup, LineId, Port};

/// EXTI lines 5..=9
const GROUP_9_5: u32 = 0x03E0;
/// EXTI lines 10..=15
const GROUP_15_10: u32 = 0xFC00;

const fn port_code(port: Port) -> u32 {
    match port {
        Port::A => 0,
        Port::B => 1,
        Port::C => 2,
        Port::D => 3,
        Port::E => 4,
    }
}

#[inline]
pub const fn vector(group: IrqGroup) -> Interrupt {
    match group {
        IrqGroup::Exti9_5 => Interrupt::EXTI9_5,
        IrqGroup::Exti15_10 => Interrupt::EXTI15_10,
    }
}

/// Route `line` to its EXTI input and arm it for rising and falling edges.
///
/// Does not touch the NVIC; vectors are unmasked through [`EdgeInterrupts::enable`].
pub fn listen_both_edges(line: LineId) {
    let rcc = unsafe { &*pac::RCC::ptr() };
    let syscfg = unsafe { &*pac::SYSCFG::ptr() };
    let exti = unsafe { &*pac::EXTI::ptr() };

    rcc.apb2enr.modify(|_, w| w.syscfgen().set_bit());

    // Four lines per EXTICR register, four bits each
    let shift = 4 * (line.pin as u32 % 4);
    let code = port_code(line.port) << shift;
    let clear = !(0xF << shift);
    match line.pin / 4 {
        0 => syscfg
            .exticr1
            .modify(|r, w| unsafe { w.bits((r.bits() & clear) | code) }),
        1 => syscfg
            .exticr2
            .modify(|r, w| unsafe { w.bits((r.bits() & clear) | code) }),
        2 => syscfg
            .exticr3
            .modify(|r, w| unsafe { w.bits((r.bits() & clear) | code) }),
        _ => syscfg
            .exticr4
            .modify(|r, w| unsafe { w.bits((r.bits() & clear) | code) }),
    }

    let mask = line.mask();
    exti.rtsr.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
    exti.ftsr.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
    exti.pr.write(|w| unsafe { w.bits(mask) });
    exti.imr.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
}

/// Acknowledge every pending line of `group`. Returns the lines that were pending.
pub fn clear_pending(group: IrqGroup) -> u32 {
    let exti = unsafe { &*pac::EXTI::ptr() };
    let lines = match group {
        IrqGroup::Exti9_5 => GROUP_9_5,
        IrqGroup::Exti15_10 => GROUP_15_10,
    };
    let pending = exti.pr.read().bits() & lines;
    // Write-one-to-clear
    exti.pr.write(|w| unsafe { w.bits(pending) });
    pending
}

/// NVIC gate for the two shared EXTI vectors.
#[derive(Copy, Clone, Default)]
pub struct BoardIrqs;

impl EdgeInterrupts for BoardIrqs {
    fn disable(&mut self, group: IrqGroup) {
        NVIC::mask(vector(group));
    }

    fn enable(&mut self, group: IrqGroup) {
        unsafe { NVIC::unmask(vector(group)) };
    }
}
