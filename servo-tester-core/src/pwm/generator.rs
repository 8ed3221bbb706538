//! PWM generator model
//!
//! Software model of a free-running single-slope timer channel: the output
//! is high from the start of each frame until the counter reaches the
//! compare value, then low until the frame ends. Compare writes are
//! buffered and only take effect at the next frame boundary, so a write in
//! the middle of a pulse never shortens or stretches that pulse.
//!
//! The firmware drives real hardware that behaves this way; this model is
//! what the host simulation runs.

use crate::traits::PulseOutput;

use super::pulse::PulseWidth;
use super::timing::PwmTiming;

/// One completed output frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Ticks the output spent high
    pub high_ticks: u16,
}

/// Free-running PWM channel with a buffered compare register
#[derive(Debug, Clone)]
pub struct PwmGenerator {
    timing: PwmTiming,
    /// Running counter, `0..period_ticks`
    counter: u16,
    /// High ticks seen so far in the current frame
    high_ticks: u16,
    /// Compare value for the current frame
    active: PulseWidth,
    /// Compare value latched at the next frame boundary
    pending: PulseWidth,
}

impl PwmGenerator {
    /// Start the timer with an initial compare value
    ///
    /// The first frame already uses `initial`; the output is never
    /// unconfigured once the generator exists.
    pub fn new(timing: PwmTiming, initial: PulseWidth) -> Self {
        Self {
            timing,
            counter: 0,
            high_ticks: 0,
            active: initial,
            pending: initial,
        }
    }

    /// Frame timing
    pub fn timing(&self) -> &PwmTiming {
        &self.timing
    }

    /// Current output level
    pub fn level(&self) -> bool {
        self.counter < self.active.ticks()
    }

    /// Current counter value
    pub fn counter(&self) -> u16 {
        self.counter
    }

    /// Compare value in effect for the current frame
    pub fn active(&self) -> PulseWidth {
        self.active
    }

    /// Compare value that the next frame will use
    pub fn pending(&self) -> PulseWidth {
        self.pending
    }

    /// Advance the counter by one tick
    ///
    /// Returns the finished frame when the counter wraps.
    pub fn tick(&mut self) -> Option<Frame> {
        if self.level() {
            self.high_ticks += 1;
        }
        self.counter += 1;

        if self.counter < self.timing.period_ticks() {
            return None;
        }

        let frame = Frame {
            high_ticks: self.high_ticks,
        };
        self.counter = 0;
        self.high_ticks = 0;
        self.active = self.pending;
        Some(frame)
    }
}

impl PulseOutput for PwmGenerator {
    fn set_pulse(&mut self, pulse: PulseWidth) {
        self.pending = pulse;
    }

    fn pulse(&self) -> PulseWidth {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServoConfig;

    fn run_frame(generator: &mut PwmGenerator) -> Frame {
        loop {
            if let Some(frame) = generator.tick() {
                return frame;
            }
        }
    }

    #[test]
    fn test_frame_high_for_compare_ticks() {
        let servo = ServoConfig::DEFAULT;
        let mut generator = PwmGenerator::new(PwmTiming::SERVO_FRAME, PulseWidth::center(&servo));

        assert!(generator.level());
        let frame = run_frame(&mut generator);
        assert_eq!(frame.high_ticks, servo.center());
        assert_eq!(generator.counter(), 0);
    }

    #[test]
    fn test_frame_length() {
        let servo = ServoConfig::DEFAULT;
        let mut generator = PwmGenerator::new(PwmTiming::SERVO_FRAME, PulseWidth::low(&servo));

        let mut ticks = 0u32;
        loop {
            ticks += 1;
            if generator.tick().is_some() {
                break;
            }
        }
        assert_eq!(ticks, 2500);
    }

    #[test]
    fn test_output_falls_at_compare() {
        let servo = ServoConfig::DEFAULT;
        let mut generator = PwmGenerator::new(PwmTiming::SERVO_FRAME, PulseWidth::low(&servo));

        for _ in 0..servo.low() - 1 {
            generator.tick();
        }
        assert!(generator.level());
        generator.tick();
        assert!(!generator.level());
    }

    #[test]
    fn test_update_waits_for_frame_boundary() {
        let servo = ServoConfig::DEFAULT;
        let mut generator = PwmGenerator::new(PwmTiming::SERVO_FRAME, PulseWidth::center(&servo));

        // Write a longer pulse halfway through the current high phase
        for _ in 0..100 {
            generator.tick();
        }
        generator.set_pulse(PulseWidth::high(&servo));
        assert_eq!(generator.active(), PulseWidth::center(&servo));
        assert_eq!(generator.pending(), PulseWidth::high(&servo));

        // Current frame keeps its original width
        assert_eq!(run_frame(&mut generator).high_ticks, servo.center());
        // Next frame uses the new width
        assert_eq!(run_frame(&mut generator).high_ticks, servo.high());
    }

    #[test]
    fn test_last_write_before_boundary_wins() {
        let servo = ServoConfig::DEFAULT;
        let mut generator = PwmGenerator::new(PwmTiming::SERVO_FRAME, PulseWidth::center(&servo));

        generator.set_pulse(PulseWidth::high(&servo));
        generator.set_pulse(PulseWidth::low(&servo));
        run_frame(&mut generator);
        assert_eq!(run_frame(&mut generator).high_ticks, servo.low());
    }
}
