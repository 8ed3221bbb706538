//! Servo PWM output on an RP2040 PWM slice
//!
//! The slice runs from clk_sys through an integer divider so that one servo
//! tick (8µs) is exactly four hardware ticks. The compare register is
//! double-buffered by the hardware and latched at the end of each frame,
//! so a write never produces a truncated pulse.

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use servo_tester_core::pwm::{PulseWidth, PwmTiming};
use servo_tester_core::traits::PulseOutput;

/// clk_sys frequency the divider is computed for
pub const CLK_SYS_HZ: u32 = 125_000_000;

/// clk_sys divider (125 MHz / 250 = 500 kHz, 2µs per hardware tick)
pub const PWM_DIVIDER: u8 = 250;

/// Hardware ticks per servo tick
pub const HW_TICKS_PER_TICK: u16 = 4;

/// Build the slice configuration for a timing and starting pulse
pub fn servo_config(timing: &PwmTiming, initial: PulseWidth) -> PwmConfig {
    let mut config = PwmConfig::default();
    config.divider = PWM_DIVIDER.into();
    config.top = hw_top(timing);
    config.compare_a = hw_compare(initial);
    config.enable = true;
    config
}

/// Counter wrap value for one frame
fn hw_top(timing: &PwmTiming) -> u16 {
    match timing.scaled_top(HW_TICKS_PER_TICK) {
        Some(top) => top,
        None => {
            warn!("Servo frame does not fit the PWM counter, truncating");
            u16::MAX
        }
    }
}

/// Compare value for a pulse width
fn hw_compare(pulse: PulseWidth) -> u16 {
    pulse.ticks().saturating_mul(HW_TICKS_PER_TICK)
}

/// Servo output on channel A of a PWM slice
pub struct ServoPwm {
    pwm: Pwm<'static>,
    config: PwmConfig,
    pulse: PulseWidth,
}

impl ServoPwm {
    /// Take over a slice that was created with [`servo_config`]
    pub fn new(pwm: Pwm<'static>, timing: &PwmTiming, initial: PulseWidth) -> Self {
        let clk = embassy_rp::clocks::clk_sys_freq();
        if clk != CLK_SYS_HZ {
            warn!("clk_sys is {} Hz, servo frame will be off", clk);
        }

        info!(
            "Servo PWM: top={}, compare={} ({}us)",
            hw_top(timing),
            hw_compare(initial),
            initial.micros(timing)
        );

        Self {
            pwm,
            config: servo_config(timing, initial),
            pulse: initial,
        }
    }
}

impl PulseOutput for ServoPwm {
    fn set_pulse(&mut self, pulse: PulseWidth) {
        self.config.compare_a = hw_compare(pulse);
        self.pwm.set_config(&self.config);
        self.pulse = pulse;
    }

    fn pulse(&self) -> PulseWidth {
        self.pulse
    }
}
