// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Sensor Readings
//!
//! ## Modules
//!
//! - [`snapshot`] - Latest-known value of every reported sensor field.
//! - [`bump`] - Bump switch latch, sampled from the shared edge interrupt.
//! - [`odometry`] - Wheel direction and speed from quadrature counter readings.

pub mod bump;
pub mod odometry;
pub mod snapshot;

pub use bump::{BumpFlags, BumpLatch};
pub use odometry::Odometer;
pub use snapshot::{Motor, MotorReading, SensorSnapshot};
