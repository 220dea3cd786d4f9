// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STM32F777 bindings for the board-agnostic logic in [`crate::ranging`], [`crate::sensors`] and
//! [`crate::protocol`].

pub mod adc;
pub mod delay;
pub mod edge_clock;
pub mod encoder;
pub mod exti;
pub mod lines;
pub mod pins;
pub mod usart;

pub use adc::Adc;
pub use delay::CycleDelay;
pub use edge_clock::EdgeClock;
pub use encoder::Encoder;
pub use exti::BoardIrqs;
pub use lines::BoardLines;
pub use pins::BoardPins;
pub use usart::Usart;
