// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Echo ranging engine.
//!
//! Only one echo may be in flight at a time across all channels, because every sensor is timed
//! against the same free-running edge clock. The engine owns the single active-channel slot:
//!
//! ```text
//! Idle --trigger()--> Triggered --rising edge--> EchoHigh --falling edge--> Idle
//! ```
//!
//! The foreground side calls [`EchoEngine::trigger`] and then busy-waits in
//! [`EchoEngine::wait_for_echo`]. The edge interrupt calls [`EchoEngine::on_edge_interrupt`], which
//! stamps the edge times and, on the falling edge, publishes the span into a single result slot and
//! returns the engine to `Idle`. The two sides share nothing but the state behind the engine's
//! critical-section mutex.
//!
//! An interrupt group spans several lines, so the handler is given the group's pending line bits
//! and ignores the call unless the active channel's echo line is among them. It then re-reads
//! that line and only accepts the level change the current phase expects.

use core::cell::Cell;

use critical_section::Mutex;
use embedded_hal::delay::DelayNs;

use crate::config::{TRIGGER_PULSE_US, TRIGGER_SETTLE_US};
use crate::ranging::channel::{ChannelId, IrqGroup, LineId, CHANNELS};
use crate::ranging::duration::EchoDuration;

/// Logic level of a digital line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Digital line access addressed by line identity.
pub trait LineIo {
    fn set_line(&mut self, line: LineId, level: Level);
    fn read_line(&self, line: LineId) -> Level;
}

/// Per-group edge interrupt masking.
pub trait EdgeInterrupts {
    fn disable(&mut self, group: IrqGroup);
    fn enable(&mut self, group: IrqGroup);
}

/// Free-running, wrapping hardware counter.
pub trait TickSource {
    fn now(&self) -> u32;
}

/// Ranging failures. All of them are recoverable on a later cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangingError {
    /// Another channel holds the engine.
    Busy,
    /// The channel was not triggered, or lost the engine to another channel.
    NotActive,
    /// The echo did not complete before the deadline.
    Timeout,
}

/// Externally observable engine phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Idle,
    /// Pulse sent, waiting for the echo line to rise.
    Triggered(ChannelId),
    /// Echo line is high, waiting for it to fall.
    EchoHigh(ChannelId),
}

impl Phase {
    /// The channel currently mid-measurement, if any.
    #[inline]
    pub fn active(self) -> Option<ChannelId> {
        match self {
            Phase::Idle => None,
            Phase::Triggered(ch) | Phase::EchoHigh(ch) => Some(ch),
        }
    }
}

#[derive(Copy, Clone)]
struct State {
    phase: Phase,
    start_tick: u32,
    end_tick: u32,
    /// Channel whose completed span is waiting to be collected.
    done: Option<ChannelId>,
}

impl State {
    const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            start_tick: 0,
            end_tick: 0,
            done: None,
        }
    }

    fn span(&self) -> EchoDuration {
        EchoDuration::from_ticks(self.end_tick.wrapping_sub(self.start_tick))
    }
}

/// Shared echo ranging engine. Usually lives in a `static` so the edge interrupt can reach it.
pub struct EchoEngine {
    state: Mutex<Cell<State>>,
}

impl Default for EchoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoEngine {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(State::new())),
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        critical_section::with(|cs| self.state.borrow(cs).get().phase)
    }

    #[inline]
    pub fn active_channel(&self) -> Option<ChannelId> {
        self.phase().active()
    }

    /// Last captured `(start, end)` edge clock values.
    pub fn edge_ticks(&self) -> (u32, u32) {
        critical_section::with(|cs| {
            let s = self.state.borrow(cs).get();
            (s.start_tick, s.end_tick)
        })
    }

    /// Drive every trigger line low and enable every channel's edge interrupt group.
    pub fn init_all<IO, IRQ>(&self, io: &mut IO, irq: &mut IRQ)
    where
        IO: LineIo,
        IRQ: EdgeInterrupts,
    {
        for ch in CHANNELS.iter() {
            io.set_line(ch.trigger, Level::Low);
            irq.enable(ch.group);
        }
    }

    /// Claim the engine for `channel` and send the trigger pulse.
    ///
    /// Fails with [`RangingError::Busy`] and no side effects when another channel is active. The
    /// channel's interrupt group is masked while the pulse is generated and the delays are
    /// busy-waits, so the pulse is never shorter than the datasheet minimum.
    pub fn trigger<IO, IRQ, D>(
        &self,
        channel: ChannelId,
        io: &mut IO,
        irq: &mut IRQ,
        delay: &mut D,
    ) -> Result<(), RangingError>
    where
        IO: LineIo,
        IRQ: EdgeInterrupts,
        D: DelayNs,
    {
        let claimed = critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut s = cell.get();
            if s.phase != Phase::Idle {
                return false;
            }
            s.phase = Phase::Triggered(channel);
            s.done = None;
            cell.set(s);
            true
        });

        if !claimed {
            debug!("ranging: {} busy", channel);
            return Err(RangingError::Busy);
        }

        let desc = channel.desc();
        irq.disable(desc.group);

        io.set_line(desc.trigger, Level::Low);
        delay.delay_us(TRIGGER_SETTLE_US);
        io.set_line(desc.trigger, Level::High);
        delay.delay_us(TRIGGER_PULSE_US);
        io.set_line(desc.trigger, Level::Low);

        irq.enable(desc.group);
        Ok(())
    }

    /// Collect the result for `channel` without blocking.
    ///
    /// Returns `WouldBlock` while the channel's echo is still in flight and
    /// [`RangingError::NotActive`] when the channel is neither active nor holding a result.
    pub fn poll_echo(&self, channel: ChannelId) -> nb::Result<EchoDuration, RangingError> {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut s = cell.get();

            if s.done == Some(channel) {
                s.done = None;
                cell.set(s);
                return Ok(s.span());
            }

            if s.phase.active() == Some(channel) {
                Err(nb::Error::WouldBlock)
            } else {
                Err(nb::Error::Other(RangingError::NotActive))
            }
        })
    }

    /// Busy-wait for the echo of `channel`.
    ///
    /// Returns [`RangingError::NotActive`] immediately when `channel` did not win the trigger.
    /// `timeout_ticks` bounds the wait in edge clock ticks; on expiry the engine is returned to
    /// `Idle` and [`RangingError::Timeout`] is reported.
    pub fn wait_for_echo<T: TickSource>(
        &self,
        channel: ChannelId,
        clock: &T,
        timeout_ticks: u32,
    ) -> Result<EchoDuration, RangingError> {
        let started = clock.now();

        loop {
            match self.poll_echo(channel) {
                Ok(duration) => return Ok(duration),
                Err(nb::Error::Other(e)) => return Err(e),
                Err(nb::Error::WouldBlock) => {}
            }

            if clock.now().wrapping_sub(started) >= timeout_ticks {
                return self.abort(channel);
            }

            core::hint::spin_loop();
        }
    }

    /// Trigger `channel` and wait for its echo.
    pub fn measure<IO, IRQ, D, T>(
        &self,
        channel: ChannelId,
        io: &mut IO,
        irq: &mut IRQ,
        delay: &mut D,
        clock: &T,
        timeout_ticks: u32,
    ) -> Result<EchoDuration, RangingError>
    where
        IO: LineIo,
        IRQ: EdgeInterrupts,
        D: DelayNs,
        T: TickSource,
    {
        self.trigger(channel, io, irq, delay)?;
        self.wait_for_echo(channel, clock, timeout_ticks)
    }

    /// Like [`measure`](Self::measure), but a lost trigger yields a zero duration instead of an
    /// error. Timeouts are still reported.
    pub fn get_duration<IO, IRQ, D, T>(
        &self,
        channel: ChannelId,
        io: &mut IO,
        irq: &mut IRQ,
        delay: &mut D,
        clock: &T,
        timeout_ticks: u32,
    ) -> Result<EchoDuration, RangingError>
    where
        IO: LineIo,
        IRQ: EdgeInterrupts,
        D: DelayNs,
        T: TickSource,
    {
        match self.measure(channel, io, irq, delay, clock, timeout_ticks) {
            Err(RangingError::Busy) => Ok(EchoDuration::ZERO),
            other => other,
        }
    }

    /// Edge interrupt entry point, shared by every interrupt group that carries an echo line.
    ///
    /// `pending` holds the line bits (see [`LineId::mask`]) that raised this interrupt. Nothing
    /// happens unless the active channel's echo line is among them, and even then only the level
    /// change the current phase expects is accepted.
    pub fn on_edge_interrupt<IO, T>(&self, pending: u32, io: &IO, clock: &T)
    where
        IO: LineIo,
        T: TickSource,
    {
        let now = clock.now();

        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut s = cell.get();

            let Some(active) = s.phase.active() else {
                trace!("ranging: edge with no active channel");
                return;
            };
            if pending & active.desc().echo.mask() == 0 {
                trace!("ranging: edge on another line ({=u32:#x})", pending);
                return;
            }

            match s.phase {
                Phase::Idle => return,
                Phase::Triggered(ch) => {
                    if io.read_line(ch.desc().echo) != Level::High {
                        return;
                    }
                    s.start_tick = now;
                    s.phase = Phase::EchoHigh(ch);
                }
                Phase::EchoHigh(ch) => {
                    if io.read_line(ch.desc().echo) != Level::Low {
                        return;
                    }
                    s.end_tick = now;
                    s.done = Some(ch);
                    s.phase = Phase::Idle;
                }
            }

            cell.set(s);
        });
    }

    /// Deadline expired: release the engine unless the falling edge got there first.
    fn abort(&self, channel: ChannelId) -> Result<EchoDuration, RangingError> {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut s = cell.get();

            if s.done == Some(channel) {
                s.done = None;
                cell.set(s);
                return Ok(s.span());
            }

            if s.phase.active() != Some(channel) {
                return Err(RangingError::NotActive);
            }

            warn!("ranging: {} echo timeout in {}", channel, s.phase);
            s.phase = Phase::Idle;
            cell.set(s);
            Err(RangingError::Timeout)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BUMP_LEFT, BUMP_RIGHT};
    use core::cell::RefCell;
    use embedded_hal_mock::eh1::delay::NoopDelay;

    /// Line levels shared between the foreground and the simulated interrupt.
    #[derive(Default)]
    struct FakeLines {
        high: RefCell<Vec<LineId>>,
        writes: RefCell<Vec<(LineId, Level)>>,
    }

    impl FakeLines {
        fn drive(&self, line: LineId, level: Level) {
            let mut high = self.high.borrow_mut();
            high.retain(|l| *l != line);
            if level == Level::High {
                high.push(line);
            }
        }
    }

    impl LineIo for &FakeLines {
        fn set_line(&mut self, line: LineId, level: Level) {
            self.writes.borrow_mut().push((line, level));
            self.drive(line, level);
        }

        fn read_line(&self, line: LineId) -> Level {
            if self.high.borrow().contains(&line) {
                Level::High
            } else {
                Level::Low
            }
        }
    }

    #[derive(Default)]
    struct FakeIrqs {
        log: Vec<(IrqGroup, bool)>,
    }

    impl EdgeInterrupts for FakeIrqs {
        fn disable(&mut self, group: IrqGroup) {
            self.log.push((group, false));
        }

        fn enable(&mut self, group: IrqGroup) {
            self.log.push((group, true));
        }
    }

    struct FixedClock(Cell<u32>);

    impl FixedClock {
        fn at(tick: u32) -> Self {
            Self(Cell::new(tick))
        }

        fn set(&self, tick: u32) {
            self.0.set(tick);
        }
    }

    impl TickSource for FixedClock {
        fn now(&self) -> u32 {
            self.0.get()
        }
    }

    /// Records every requested delay in nanoseconds.
    #[derive(Default)]
    struct RecordingDelay(Vec<u32>);

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0.push(ns);
        }

        fn delay_us(&mut self, us: u32) {
            self.0.push(us * 1_000);
        }
    }

    fn trigger(engine: &EchoEngine, lines: &FakeLines, ch: ChannelId) -> Result<(), RangingError> {
        engine.trigger(ch, &mut &*lines, &mut FakeIrqs::default(), &mut NoopDelay)
    }

    fn echo_edge(engine: &EchoEngine, lines: &FakeLines, clock: &FixedClock, ch: ChannelId, level: Level, at: u32) {
        clock.set(at);
        lines.drive(ch.desc().echo, level);
        engine.on_edge_interrupt(ch.desc().echo.mask(), &lines, clock);
    }

    #[test]
    fn trigger_claims_idle_engine() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();

        assert_eq!(trigger(&engine, &lines, ChannelId::Center), Ok(()));
        assert_eq!(engine.phase(), Phase::Triggered(ChannelId::Center));
    }

    #[test]
    fn trigger_pulse_sequence_and_masking() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let mut irqs = FakeIrqs::default();
        let mut delay = RecordingDelay::default();

        engine
            .trigger(ChannelId::Left, &mut &lines, &mut irqs, &mut delay)
            .unwrap();

        let trig = ChannelId::Left.desc().trigger;
        assert_eq!(
            *lines.writes.borrow(),
            vec![(trig, Level::Low), (trig, Level::High), (trig, Level::Low)]
        );
        assert!(delay.0[0] >= 2_000);
        assert!(delay.0[1] >= 10_000);
        assert_eq!(
            irqs.log,
            vec![(IrqGroup::Exti9_5, false), (IrqGroup::Exti9_5, true)]
        );
    }

    #[test]
    fn second_trigger_is_rejected_without_side_effects() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = FixedClock::at(0);

        trigger(&engine, &lines, ChannelId::Left).unwrap();
        echo_edge(&engine, &lines, &clock, ChannelId::Left, Level::High, 100);
        let before = engine.edge_ticks();
        let writes_before = lines.writes.borrow().len();

        for other in [ChannelId::Center, ChannelId::Right] {
            let mut irqs = FakeIrqs::default();
            let result = engine.trigger(other, &mut &lines, &mut irqs, &mut NoopDelay);
            assert_eq!(result, Err(RangingError::Busy));
            assert!(irqs.log.is_empty());
        }

        assert_eq!(engine.phase(), Phase::EchoHigh(ChannelId::Left));
        assert_eq!(engine.edge_ticks(), before);
        assert_eq!(lines.writes.borrow().len(), writes_before);
    }

    #[test]
    fn wait_without_trigger_returns_immediately() {
        let engine = EchoEngine::new();
        let clock = FixedClock::at(0);

        assert_eq!(
            engine.wait_for_echo(ChannelId::Right, &clock, u32::MAX),
            Err(RangingError::NotActive)
        );
    }

    #[test]
    fn wait_for_another_channel_returns_immediately() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = FixedClock::at(0);

        trigger(&engine, &lines, ChannelId::Left).unwrap();
        assert_eq!(
            engine.wait_for_echo(ChannelId::Center, &clock, u32::MAX),
            Err(RangingError::NotActive)
        );
        assert_eq!(engine.active_channel(), Some(ChannelId::Left));
    }

    #[test]
    fn rising_then_falling_edge_yields_half_span() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = FixedClock::at(0);

        trigger(&engine, &lines, ChannelId::Center).unwrap();
        echo_edge(&engine, &lines, &clock, ChannelId::Center, Level::High, 1_000);
        assert_eq!(engine.phase(), Phase::EchoHigh(ChannelId::Center));
        assert!(matches!(
            engine.poll_echo(ChannelId::Center),
            Err(nb::Error::WouldBlock)
        ));

        echo_edge(&engine, &lines, &clock, ChannelId::Center, Level::Low, 1_000 + 0x1FE);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.edge_ticks(), (1_000, 1_000 + 0x1FE));

        assert_eq!(
            engine.wait_for_echo(ChannelId::Center, &clock, 10),
            Ok(EchoDuration::from_micros(0xFF))
        );
        // result slot is single-shot
        assert!(matches!(
            engine.poll_echo(ChannelId::Center),
            Err(nb::Error::Other(RangingError::NotActive))
        ));
    }

    #[test]
    fn span_across_counter_wrap() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = FixedClock::at(0);

        trigger(&engine, &lines, ChannelId::Right).unwrap();
        echo_edge(&engine, &lines, &clock, ChannelId::Right, Level::High, u32::MAX - 9);
        echo_edge(&engine, &lines, &clock, ChannelId::Right, Level::Low, 10);

        assert!(matches!(
            engine.poll_echo(ChannelId::Right),
            Ok(d) if d == EchoDuration::from_micros(10)
        ));
    }

    #[test]
    fn edge_with_no_active_channel_is_ignored() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = FixedClock::at(0);

        echo_edge(&engine, &lines, &clock, ChannelId::Left, Level::High, 50);
        echo_edge(&engine, &lines, &clock, ChannelId::Left, Level::Low, 80);

        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.edge_ticks(), (0, 0));
    }

    #[test]
    fn edge_on_other_line_in_group_is_discarded() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = FixedClock::at(0);

        // Center and Right share EXTI15_10
        trigger(&engine, &lines, ChannelId::Center).unwrap();
        echo_edge(&engine, &lines, &clock, ChannelId::Right, Level::High, 10);
        assert_eq!(engine.phase(), Phase::Triggered(ChannelId::Center));
        assert_eq!(engine.edge_ticks(), (0, 0));

        echo_edge(&engine, &lines, &clock, ChannelId::Center, Level::High, 20);
        echo_edge(&engine, &lines, &clock, ChannelId::Right, Level::Low, 30);
        assert_eq!(engine.phase(), Phase::EchoHigh(ChannelId::Center));
        assert_eq!(engine.edge_ticks(), (20, 0));

        echo_edge(&engine, &lines, &clock, ChannelId::Center, Level::Low, 60);
        assert!(matches!(
            engine.poll_echo(ChannelId::Center),
            Ok(d) if d == EchoDuration::from_micros(20)
        ));
    }

    #[test]
    fn repeated_high_level_does_not_restart_capture() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = FixedClock::at(0);

        trigger(&engine, &lines, ChannelId::Left).unwrap();
        echo_edge(&engine, &lines, &clock, ChannelId::Left, Level::High, 100);
        // a bump switch on the same group fires while echo is still high
        clock.set(150);
        engine.on_edge_interrupt(BUMP_LEFT.mask(), &&lines, &clock);
        // same group, level unchanged, echo bit set by a glitch
        clock.set(160);
        engine.on_edge_interrupt(ChannelId::Left.desc().echo.mask(), &&lines, &clock);

        assert_eq!(engine.edge_ticks(), (100, 0));
    }

    /// Counter that advances on every read and plays the interrupt side at fixed ticks.
    struct ScriptedClock<'a> {
        tick: Cell<u32>,
        engine: &'a EchoEngine,
        lines: &'a FakeLines,
        channel: ChannelId,
        rise_at: u32,
        fall_at: u32,
    }

    impl TickSource for ScriptedClock<'_> {
        fn now(&self) -> u32 {
            let t = self.tick.get();
            self.tick.set(t + 1);
            let echo = self.channel.desc().echo;
            if t == self.rise_at {
                self.lines.drive(echo, Level::High);
                self.engine.on_edge_interrupt(echo.mask(), &self.lines, self);
            } else if t == self.fall_at {
                self.lines.drive(echo, Level::Low);
                self.engine.on_edge_interrupt(echo.mask(), &self.lines, self);
            }
            t
        }
    }

    #[test]
    fn blocking_measure_completes_from_interrupt() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = ScriptedClock {
            tick: Cell::new(0),
            engine: &engine,
            lines: &lines,
            channel: ChannelId::Right,
            rise_at: 5,
            fall_at: 25,
        };

        let result = engine.measure(
            ChannelId::Right,
            &mut &lines,
            &mut FakeIrqs::default(),
            &mut NoopDelay,
            &clock,
            1_000,
        );

        // each handler reads the counter once more after the scripted read
        assert_eq!(engine.edge_ticks(), (6, 26));
        assert_eq!(result, Ok(EchoDuration::from_ticks(20)));
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn stuck_echo_times_out_and_releases_engine() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = ScriptedClock {
            tick: Cell::new(0),
            engine: &engine,
            lines: &lines,
            channel: ChannelId::Left,
            rise_at: 3,
            fall_at: u32::MAX,
        };

        let result = engine.measure(
            ChannelId::Left,
            &mut &lines,
            &mut FakeIrqs::default(),
            &mut NoopDelay,
            &clock,
            100,
        );

        assert_eq!(result, Err(RangingError::Timeout));
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(trigger(&engine, &lines, ChannelId::Center), Ok(()));
    }

    #[test]
    fn falling_edge_on_deadline_read_wins_over_timeout() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = ScriptedClock {
            tick: Cell::new(0),
            engine: &engine,
            lines: &lines,
            channel: ChannelId::Center,
            rise_at: 5,
            fall_at: 100,
        };

        // the read at tick 100 both completes the echo and crosses the deadline
        let result = engine.measure(
            ChannelId::Center,
            &mut &lines,
            &mut FakeIrqs::default(),
            &mut NoopDelay,
            &clock,
            100,
        );

        assert_eq!(engine.edge_ticks(), (6, 101));
        assert_eq!(result, Ok(EchoDuration::from_ticks(95)));
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn stale_high_echo_after_timeout_needs_a_real_edge() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = FixedClock::at(0);

        trigger(&engine, &lines, ChannelId::Left).unwrap();
        echo_edge(&engine, &lines, &clock, ChannelId::Left, Level::High, 10);
        assert_eq!(
            engine.wait_for_echo(ChannelId::Left, &clock, 0),
            Err(RangingError::Timeout)
        );

        // the sensor still holds echo high when the channel is fired again
        trigger(&engine, &lines, ChannelId::Left).unwrap();
        clock.set(500);
        engine.on_edge_interrupt(BUMP_RIGHT.mask(), &&lines, &clock);
        assert_eq!(engine.phase(), Phase::Triggered(ChannelId::Left));
        assert_eq!(engine.edge_ticks(), (10, 0));

        // late fall of the previous pulse, then the real echo
        echo_edge(&engine, &lines, &clock, ChannelId::Left, Level::Low, 600);
        assert_eq!(engine.phase(), Phase::Triggered(ChannelId::Left));
        echo_edge(&engine, &lines, &clock, ChannelId::Left, Level::High, 900);
        echo_edge(&engine, &lines, &clock, ChannelId::Left, Level::Low, 1_000);

        assert_eq!(
            engine.wait_for_echo(ChannelId::Left, &clock, 0),
            Ok(EchoDuration::from_micros(50))
        );
    }

    #[test]
    fn get_duration_reports_zero_on_contention() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let clock = FixedClock::at(0);

        trigger(&engine, &lines, ChannelId::Left).unwrap();
        let result = engine.get_duration(
            ChannelId::Right,
            &mut &lines,
            &mut FakeIrqs::default(),
            &mut NoopDelay,
            &clock,
            100,
        );

        assert_eq!(result, Ok(EchoDuration::ZERO));
        assert_eq!(engine.active_channel(), Some(ChannelId::Left));
    }

    #[test]
    fn init_all_parks_triggers_low() {
        let engine = EchoEngine::new();
        let lines = FakeLines::default();
        let mut irqs = FakeIrqs::default();

        engine.init_all(&mut &lines, &mut irqs);

        for (ch, (line, level)) in CHANNELS.iter().zip(lines.writes.borrow().iter()) {
            assert_eq!(*line, ch.trigger);
            assert_eq!(*level, Level::Low);
        }
        assert_eq!(irqs.log.len(), 3);
        assert!(irqs.log.iter().all(|(_, on)| *on));
    }
}
