// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board configuration and timing constants.
//!
//! # Pin Mapping Summary
//!
//! ## Ultrasonic (HC-SR04)
//! - **Left**: trigger PC0, echo PC6 (EXTI9_5)
//! - **Center**: trigger PC1, echo PC10 (EXTI15_10)
//! - **Right**: trigger PC2, echo PC11 (EXTI15_10)
//!
//! ## Other sensors
//! - **Bump left / right**: PC8 / PC9 (EXTI9_5, shared with the left echo line)
//! - **Battery low**: PC3
//! - **Weight (force sensing resistor)**: PA3, ADC1_IN3
//! - **Front-left encoder**: TIM3 CH1/CH2 on PA6/PA7
//! - **Front-right encoder**: TIM4 CH1/CH2 on PD12/PD13
//!
//! ## Companion link
//! - **USART1**: TX PA9, RX PA10

use crate::ranging::{LineId, Port};

/// Rate of the free-running edge clock (TIM2).
pub const EDGE_CLOCK_HZ: u32 = 2_000_000;

/// Edge clock ticks per microsecond. Captured spans are halved once to land in microseconds.
pub const TICKS_PER_US: u32 = EDGE_CLOCK_HZ / 1_000_000;

/// Low time on the trigger line before the pulse.
pub const TRIGGER_SETTLE_US: u32 = 2;

/// Minimum trigger pulse width from the HC-SR04 datasheet.
pub const TRIGGER_PULSE_US: u32 = 10;

/// Upper bound on one echo measurement, counted from the end of the trigger pulse.
///
/// The sensor holds echo high for ~38 ms when nothing is in range.
pub const ECHO_TIMEOUT_US: u32 = 40_000;

/// Same bound expressed in edge clock ticks.
pub const ECHO_TIMEOUT_TICKS: u32 = ECHO_TIMEOUT_US * TICKS_PER_US;

/// Baud rate of the companion computer link.
pub const PICO_BAUD_RATE: u32 = 56_000;

/// Time between two telemetry frames.
pub const POLL_PERIOD_MS: u32 = 1_000;

/// Quadrature counts per output shaft revolution (36GP-555 gearmotor, x4 decoding).
pub const ENCODER_COUNTS_PER_REV: u32 = 4 * 11 * 27;

/// ADC1 channel wired to the force sensing resistor.
pub const WEIGHT_ADC_CHANNEL: u8 = 3;

pub const BUMP_LEFT: LineId = LineId::new(Port::C, 8);
pub const BUMP_RIGHT: LineId = LineId::new(Port::C, 9);
pub const BATTERY_LOW: LineId = LineId::new(Port::C, 3);
