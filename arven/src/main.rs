// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m_rt::entry;
#[cfg(not(feature = "debug"))]
use panic_halt as _;
#[cfg(feature = "debug")]
use {defmt_rtt as _, panic_probe as _};

use embedded_hal::delay::DelayNs;
use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use arven::config::{
    BATTERY_LOW, BUMP_LEFT, BUMP_RIGHT, ECHO_TIMEOUT_TICKS, ENCODER_COUNTS_PER_REV,
    PICO_BAUD_RATE, POLL_PERIOD_MS, WEIGHT_ADC_CHANNEL,
};
use arven::hw::{
    edge_clock, exti, Adc, BoardIrqs, BoardLines, BoardPins, CycleDelay, EdgeClock, Encoder, Usart,
};
use arven::protocol::{send_frame, ChangeTracker};
use arven::ranging::{ChannelId, EchoEngine, IrqGroup, Level, LineIo, TickSource, CHANNELS};
use arven::sensors::{BumpLatch, Motor, Odometer, SensorSnapshot};

static ENGINE: EchoEngine = EchoEngine::new();
static BUMPS: BumpLatch = BumpLatch::new();

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);

    // USART1 (companion computer)
    let usart_cfg = Config {
        baud_rate: PICO_BAUD_RATE.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART1,
        (pins.usart1.tx, pins.usart1.rx),
        &clocks,
        usart_cfg,
    );
    let mut link = Usart::new(serial);

    // Timers and converters
    let clock = edge_clock::start(dp.TIM2, clocks.timclk1().raw());
    let mut delay = CycleDelay::new(clocks.sysclk().raw());
    let mut adc = Adc::adc1(dp.ADC1);
    let fl_encoder = Encoder::tim3(dp.TIM3);
    let fr_encoder = Encoder::tim4(dp.TIM4);

    // Edge interrupts
    let mut lines = BoardLines;
    let mut irqs = BoardIrqs;
    for ch in CHANNELS.iter() {
        exti::listen_both_edges(ch.echo);
    }
    exti::listen_both_edges(BUMP_LEFT);
    exti::listen_both_edges(BUMP_RIGHT);
    BUMPS.sample(&lines);
    ENGINE.init_all(&mut lines, &mut irqs);

    #[cfg(feature = "debug")]
    defmt::info!("arven: sensor board up");

    let mut snapshot = SensorSnapshot::new();
    let mut changes = ChangeTracker::new();
    let mut fl_odometer = Odometer::new(ENCODER_COUNTS_PER_REV);
    let mut fr_odometer = Odometer::new(ENCODER_COUNTS_PER_REV);

    loop {
        snapshot.weight = adc.read(WEIGHT_ADC_CHANNEL);

        for ch in ChannelId::ALL {
            let result = ENGINE.measure(
                ch,
                &mut lines,
                &mut irqs,
                &mut delay,
                &clock,
                ECHO_TIMEOUT_TICKS,
            );
            snapshot.record_ranging(ch, result);
        }

        snapshot.bump = BUMPS.flags();
        snapshot.battery_low = lines.read_line(BATTERY_LOW) == Level::High;

        let now = clock.now();
        snapshot.set_motor(Motor::FrontLeft, fl_odometer.update(fl_encoder.count(), now));
        snapshot.set_motor(Motor::FrontRight, fr_odometer.update(fr_encoder.count(), now));

        let mask = changes.update(&snapshot);
        send_frame(&mut link, &snapshot, mask);

        delay.delay_ms(POLL_PERIOD_MS);
    }
}

// PC6 (left echo), PC8/PC9 (bumps)
#[interrupt]
fn EXTI9_5() {
    let pending = exti::clear_pending(IrqGroup::Exti9_5);
    ENGINE.on_edge_interrupt(pending, &BoardLines, &EdgeClock);
    BUMPS.sample(&BoardLines);
}

// PC10 (center echo), PC11 (right echo)
#[interrupt]
fn EXTI15_10() {
    let pending = exti::clear_pending(IrqGroup::Exti15_10);
    ENGINE.on_edge_interrupt(pending, &BoardLines, &EdgeClock);
}
