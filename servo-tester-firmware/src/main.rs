//! Servo Tester - Hobby RC Servo Tester Firmware
//!
//! Main firmware binary for RP2040-based boards. Drives a servo with a
//! 20ms frame: 1.5ms held in Center mode, 1.0-2.0ms following a
//! potentiometer in Manual mode.
//!
//! Bring-up order matters: interrupts stay masked until the output is
//! already producing center pulses, and the servo is held at center for a
//! settling delay before the switch and potentiometer take over.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::Pwm;
use embassy_rp::watchdog::Watchdog;
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use servo_tester_core::config::TesterConfig;
use servo_tester_core::pwm::PulseWidth;
use servo_tester_core::startup::{Phase, StartupEvent};

use crate::components::{servo_config, ModeSwitch, ServoPwm};
use crate::config::{load_config, EMBEDDED_CONFIG};

mod channels;
mod components;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Configuration must live forever for task references
static TESTER_CONFIG: StaticCell<TesterConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Nothing may run until the output is in a known state
    cortex_m::interrupt::disable();

    // Clock setup below retunes the watchdog tick, so a watchdog left armed
    // by a previous image must be off before it runs
    stop_watchdog();

    info!("Servo tester firmware starting...");
    let mut phase = advance(Phase::Reset, StartupEvent::Secured);

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());

    let watchdog = Watchdog::new(p.WATCHDOG);
    info!("Reset reason: {:?}", Debug2Format(&watchdog.reset_reason()));

    let config: &'static TesterConfig = TESTER_CONFIG.init(load_config(EMBEDDED_CONFIG));
    info!(
        "Config: low={} center={} high={} ticks, settle={}ms",
        config.servo.low(),
        config.servo.center(),
        config.servo.high(),
        config.settle_ms
    );

    // Servo PWM: GPIO16, slice 0 channel A, starting at center
    let center = PulseWidth::center(&config.servo);
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, servo_config(&config.timing, center));
    let output = ServoPwm::new(pwm, &config.timing, center);
    phase = advance(phase, StartupEvent::OutputCentered);

    // SAFETY: the servo output is configured and every handler below is
    // bound, so nothing can observe a half-initialized peripheral.
    unsafe { cortex_m::interrupt::enable() };

    // Potentiometer on GPIO26 (ADC0)
    let adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let pot = Channel::new_pin(p.PIN_26, Pull::None);
    spawner.spawn(tasks::sampler_task(adc, pot, config)).unwrap();
    phase = advance(phase, StartupEvent::SamplingStarted);

    // Switch on GPIO2 (pulled up, open = Center) and the on-board LED
    let switch = ModeSwitch::new(Input::new(p.PIN_2, Pull::Up));
    let led = Output::new(p.PIN_25, Level::Low);

    phase = advance(phase, StartupEvent::SettleStarted);
    Timer::after_millis(config.settle_ms as u64).await;
    phase = advance(phase, StartupEvent::SettleElapsed);

    if !phase.controller_allowed() {
        // Park instead of returning: dropping `output` would stop the slice
        error!("Startup sequence out of order, holding center");
        core::future::pending::<()>().await;
    }

    spawner.spawn(tasks::status_task(led)).unwrap();
    spawner
        .spawn(tasks::controller_task(switch, output, config))
        .unwrap();

    info!("All tasks spawned, firmware running");
}

/// Advance the startup phase and log it
fn advance(phase: Phase, event: StartupEvent) -> Phase {
    let next = phase.transition(event);
    info!("Startup: {:?} -> {:?}", phase, next);
    next
}

/// Disable the watchdog in case a previous image left it running
fn stop_watchdog() {
    embassy_rp::pac::WATCHDOG.ctrl().modify(|w| w.set_enable(false));
}
