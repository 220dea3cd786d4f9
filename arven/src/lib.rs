// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Arven Sensor Controls
//!
//! Sensor acquisition and telemetry firmware for the Arven mobile robot, written in Rust, targeting
//! an STM32F777 MCU. The board measures obstacle distance with three HC-SR04 echo sensors, gathers
//! bump, weight, battery and wheel-encoder readings, and reports them to the companion computer as
//! a fixed-width ASCII frame over a serial link.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`ranging`] | Echo ranging engine shared by all ultrasonic channels |
//! | [`sensors`] | Snapshot of the latest reading from every sensor source |
//! | [`protocol`] | Telemetry frame encoder, parser and change mask |
//! | [`config`] | Board constants (timing, baud rate, pin identities) |
//! | `hw` | MCU-level wrappers around GPIO, EXTI, timers, ADC and USART (target only) |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test -p arven
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf --features debug
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

// must come first so the logging macros are visible to every other module
#[macro_use]
mod fmt;

pub mod config;
pub mod protocol;
pub mod ranging;
pub mod sensors;

#[cfg(target_os = "none")]
pub mod hw;
