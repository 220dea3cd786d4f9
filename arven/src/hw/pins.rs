// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the Arven sensor board (STM32F777).
//!
//! The typed pins are held here only to put each line into the right mode and keep it there. The
//! ranging engine and sensor code address lines through [`super::BoardLines`] by
//! [`crate::ranging::LineId`].

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, Alternate, Analog, Floating, Input, Output, PullDown, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub usart1: Usart1Pins,
    pub ultrasonic: UltrasonicPins,
    pub bump: BumpPins,
    pub battery_low: gpioc::PC3<Input<Floating>>,
    pub weight: gpioa::PA3<Analog>, // ADC1_IN3
    pub encoder: EncoderPins,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// HC-SR04 trigger outputs and echo inputs
pub struct UltrasonicPins {
    pub trig_left: gpioc::PC0<Output<PushPull>>,
    pub trig_center: gpioc::PC1<Output<PushPull>>,
    pub trig_right: gpioc::PC2<Output<PushPull>>,
    pub echo_left: gpioc::PC6<Input<Floating>>,    // EXTI9_5
    pub echo_center: gpioc::PC10<Input<Floating>>, // EXTI15_10
    pub echo_right: gpioc::PC11<Input<Floating>>,  // EXTI15_10
}

/// Bump switches, high when pressed
pub struct BumpPins {
    pub left: gpioc::PC8<Input<PullDown>>,
    pub right: gpioc::PC9<Input<PullDown>>,
}

/// TIM3/TIM4 quadrature encoder inputs
pub struct EncoderPins {
    pub tim3_ch1: gpioa::PA6<Alternate<2>>,
    pub tim3_ch2: gpioa::PA7<Alternate<2>>,

    pub tim4_ch1: gpiod::PD12<Alternate<2>>,
    pub tim4_ch2: gpiod::PD13<Alternate<2>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();

        Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            ultrasonic: UltrasonicPins {
                trig_left: gpioc.pc0.into_push_pull_output(),
                trig_center: gpioc.pc1.into_push_pull_output(),
                trig_right: gpioc.pc2.into_push_pull_output(),
                echo_left: gpioc.pc6.into_floating_input(),
                echo_center: gpioc.pc10.into_floating_input(),
                echo_right: gpioc.pc11.into_floating_input(),
            },

            bump: BumpPins {
                left: gpioc.pc8.into_pull_down_input(),
                right: gpioc.pc9.into_pull_down_input(),
            },

            battery_low: gpioc.pc3.into_floating_input(),
            weight: gpioa.pa3.into_analog(),

            encoder: EncoderPins {
                tim3_ch1: gpioa.pa6.into_alternate::<2>(),
                tim3_ch2: gpioa.pa7.into_alternate::<2>(),
                tim4_ch1: gpiod.pd12.into_alternate::<2>(),
                tim4_ch2: gpiod.pd13.into_alternate::<2>(),
            },
        }
    }
}
