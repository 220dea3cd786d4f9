// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Quadrature wheel encoders on TIM3 (front-left) and TIM4 (front-right).
//!
//! Both timers run in encoder mode 3 over their full 16-bit range. The counter is only ever read;
//! [`crate::sensors::Odometer`] takes care of wraparound.

use stm32f7xx_hal::pac;

pub struct Encoder<TIM> {
    tim: TIM,
}

macro_rules! encoder_16bit {
    ($TIM:ident, $ctor:ident, $en:ident) => {
        impl Encoder<pac::$TIM> {
            /// Enable the timer clock and start counting both edges of both channels.
            pub fn $ctor(tim: pac::$TIM) -> Self {
                let rcc = unsafe { &*pac::RCC::ptr() };
                rcc.apb1enr.modify(|_, w| w.$en().set_bit());

                // Disable counter while configuring
                tim.cr1.modify(|_, w| w.cen().clear_bit());

                tim.arr.write(|w| unsafe { w.bits(0xFFFF) });

                // Encoder mode 3: count on both TI1 and TI2
                tim.smcr.modify(|_, w| w.sms().bits(0b011));
                tim.ccmr1_input().modify(|_, w| w.cc1s().ti1().cc2s().ti2());
                tim.ccer.modify(|_, w| {
                    w.cc1p()
                        .clear_bit()
                        .cc2p()
                        .clear_bit()
                        .cc1e()
                        .set_bit()
                        .cc2e()
                        .set_bit()
                });

                tim.cnt.write(|w| unsafe { w.bits(0) });
                tim.cr1.modify(|_, w| w.cen().set_bit());

                Self { tim }
            }

            /// Raw 16-bit counter value.
            #[inline]
            pub fn count(&self) -> u16 {
                self.tim.cnt.read().bits() as u16
            }
        }
    };
}

encoder_16bit!(TIM3, tim3, tim3en);
encoder_16bit!(TIM4, tim4, tim4en);
