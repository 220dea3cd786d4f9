// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running edge clock on TIM2.
//!
//! TIM2 is the only 32-bit general purpose timer the board leaves free. It is prescaled to
//! [`EDGE_CLOCK_HZ`] and left counting up over its full range, so every timestamp taken in an
//! interrupt handler can be subtracted with wrapping arithmetic.

use stm32f7xx_hal::pac;

use crate::config::EDGE_CLOCK_HZ;
use crate::ranging::TickSource;

/// Start TIM2 at [`EDGE_CLOCK_HZ`], given the APB1 timer kernel clock.
pub fn start(tim2: pac::TIM2, timer_clock_hz: u32) -> EdgeClock {
    let rcc = unsafe { &*pac::RCC::ptr() };
    rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

    let psc = (timer_clock_hz / EDGE_CLOCK_HZ).saturating_sub(1);
    debug_assert!(psc <= 0xFFFF);

    tim2.cr1.modify(|_, w| w.cen().clear_bit());
    tim2.psc.write(|w| unsafe { w.bits(psc) });
    tim2.arr.write(|w| w.bits(0xFFFF_FFFF));

    // Latch the prescaler now rather than at the first overflow
    tim2.egr.write(|w| w.ug().set_bit());
    tim2.cnt.write(|w| w.bits(0));
    tim2.cr1.modify(|_, w| w.cen().set_bit());

    info!("edge clock: {} Hz from {} Hz", EDGE_CLOCK_HZ, timer_clock_hz);
    EdgeClock
}

/// Reads the TIM2 counter. Meaningful once [`start`] has run.
#[derive(Copy, Clone)]
pub struct EdgeClock;

impl TickSource for EdgeClock {
    #[inline]
    fn now(&self) -> u32 {
        let tim2 = unsafe { &*pac::TIM2::ptr() };
        tim2.cnt.read().bits()
    }
}
