// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Ranging channel registry.
//!
//! Each physical HC-SR04 is described by its trigger line, its echo line and the edge-interrupt
//! group the echo line is routed to. Several echo lines can share one group, so the group alone
//! never identifies a sensor.

/// GPIO port identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
}

/// Identity of one digital line (port + pin number).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineId {
    pub port: Port,
    pub pin: u8,
}

impl LineId {
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }

    /// Bit for this line in a 16-bit port register.
    #[inline]
    pub const fn mask(&self) -> u32 {
        1 << self.pin
    }
}

/// Edge-interrupt group. On the STM32F7 these are the shared EXTI vectors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqGroup {
    /// EXTI lines 5..=9
    Exti9_5,
    /// EXTI lines 10..=15
    Exti15_10,
}

/// One physical ultrasonic sensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelId {
    Left = 0,
    Center = 1,
    Right = 2,
}

impl ChannelId {
    pub const ALL: [ChannelId; 3] = [ChannelId::Left, ChannelId::Center, ChannelId::Right];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Static wiring description for this channel.
    #[inline]
    pub fn desc(self) -> &'static RangingChannel {
        &CHANNELS[self.index()]
    }
}

/// Wiring of one ranging sensor. Defined once, never mutated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RangingChannel {
    pub id: ChannelId,
    /// Output driven to start a pulse.
    pub trigger: LineId,
    /// Input held high while the echo is in flight.
    pub echo: LineId,
    pub group: IrqGroup,
}

pub static CHANNELS: [RangingChannel; 3] = [
    RangingChannel {
        id: ChannelId::Left,
        trigger: LineId::new(Port::C, 0),
        echo: LineId::new(Port::C, 6),
        group: IrqGroup::Exti9_5,
    },
    RangingChannel {
        id: ChannelId::Center,
        trigger: LineId::new(Port::C, 1),
        echo: LineId::new(Port::C, 10),
        group: IrqGroup::Exti15_10,
    },
    RangingChannel {
        id: ChannelId::Right,
        trigger: LineId::new(Port::C, 2),
        echo: LineId::new(Port::C, 11),
        group: IrqGroup::Exti15_10,
    },
];
