// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Blocking single-channel reads on ADC1, used for the force sensing resistor.

use stm32f7xx_hal::pac;

/// ADC1 in 12-bit, right-aligned, software-triggered mode.
pub struct Adc {
    adc: pac::ADC1,
}

impl Adc {
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        // PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        adc1.cr2.modify(|_, w| w.adon().clear_bit());
        adc1.cr1.modify(|_, w| w.res().bits(0b00));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });
        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    /// Convert one sample from `channel` (0..=9), with the longest sample time.
    pub fn read(&mut self, channel: u8) -> u16 {
        let adc = &self.adc;

        // 3 bits of sample time per channel
        let shift = 3 * (channel as u32 % 10);
        adc.smpr2
            .modify(|r, w| unsafe { w.bits(r.bits() | (0b111 << shift)) });

        // One conversion in the regular sequence
        adc.sqr1.modify(|_, w| w.l().bits(0));
        adc.sqr3
            .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

        adc.cr2.modify(|_, w| w.swstart().set_bit());
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits()
    }
}
