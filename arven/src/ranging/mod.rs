// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Echo Ranging
//!
//! Time-of-flight measurement for the HC-SR04 ultrasonic sensors.
//!
//! ## Modules
//!
//! - [`channel`] - Static registry of the physical sensors and the lines they use.
//! - [`duration`] - Measured echo span in microseconds.
//! - [`engine`] - Trigger / edge-capture state machine shared by every channel.

pub mod channel;
pub mod duration;
pub mod engine;

pub use channel::{ChannelId, IrqGroup, LineId, Port, RangingChannel, CHANNELS};
pub use duration::EchoDuration;
pub use engine::{EchoEngine, EdgeInterrupts, Level, LineIo, Phase, RangingError, TickSource};
