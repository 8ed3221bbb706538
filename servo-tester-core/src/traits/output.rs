//! Pulse output trait
//!
//! Abstracts the compare register of whatever timer drives the servo line.

use crate::pwm::PulseWidth;

/// Servo PWM output channel
///
/// Implementations forward the width to a free-running timer. The write is
/// expected to take effect at the next frame boundary.
pub trait PulseOutput {
    /// Set the pulse width for subsequent frames
    fn set_pulse(&mut self, pulse: PulseWidth);

    /// Most recently written pulse width
    fn pulse(&self) -> PulseWidth;
}
