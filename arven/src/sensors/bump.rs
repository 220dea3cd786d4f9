// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bump switches.
//!
//! The two snap-action switches sit on the same edge-interrupt group as the left echo line. The
//! group handler calls [`BumpLatch::sample`] after the ranging engine has had its look, and the
//! polling loop copies the latched flags into the snapshot.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::{BUMP_LEFT, BUMP_RIGHT};
use crate::ranging::{Level, LineIo};

/// `true` means the switch is pressed (obstacle touching).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BumpFlags {
    pub left: bool,
    pub right: bool,
}

pub struct BumpLatch {
    left: AtomicBool,
    right: AtomicBool,
}

impl Default for BumpLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl BumpLatch {
    pub const fn new() -> Self {
        Self {
            left: AtomicBool::new(false),
            right: AtomicBool::new(false),
        }
    }

    /// Re-read both switch lines. Safe to call from interrupt context.
    pub fn sample<IO: LineIo>(&self, io: &IO) {
        self.left
            .store(io.read_line(BUMP_LEFT) == Level::High, Ordering::Relaxed);
        self.right
            .store(io.read_line(BUMP_RIGHT) == Level::High, Ordering::Relaxed);
    }

    #[inline]
    pub fn flags(&self) -> BumpFlags {
        BumpFlags {
            left: self.left.load(Ordering::Relaxed),
            right: self.right.load(Ordering::Relaxed),
        }
    }
}
