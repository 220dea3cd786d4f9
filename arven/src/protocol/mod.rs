// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Telemetry Protocol
//!
//! One-way, fixed-width ASCII frames from the sensor board to the companion computer. There is no
//! acknowledgement or retransmission; every frame carries the full snapshot.
//!
//! ## Modules
//!
//! - [`frame`] - Wire layout: markers, field widths and offsets, bump and direction encodings.
//! - [`encoder`] - Renders a snapshot into a frame and hands it to a [`Transport`].
//! - [`parser`] - Byte-at-a-time frame parser for the receiving side.
//! - [`change_mask`] - Change mask computed from successive snapshots.

pub mod change_mask;
pub mod encoder;
pub mod frame;
pub mod parser;

pub use change_mask::ChangeTracker;
pub use encoder::{encode_frame, send_frame, Transport};
pub use frame::{Field, Frame, FRAME_LEN};
pub use parser::{FrameFields, Parser};
