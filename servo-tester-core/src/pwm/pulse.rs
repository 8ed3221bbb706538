//! Servo pulse width
//!
//! A [`PulseWidth`] is a compare value that is known to lie inside the
//! configured servo limits. Every constructor checks or guarantees this, so
//! an out-of-range width cannot reach the output.

use crate::config::ServoConfig;
use crate::sampler::AnalogSample;

use super::timing::PwmTiming;

/// Compare value in servo ticks, inside `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseWidth(u16);

impl PulseWidth {
    /// Checked construction from a raw tick count
    pub fn new(ticks: u16, servo: &ServoConfig) -> Option<Self> {
        servo.contains(ticks).then_some(Self(ticks))
    }

    /// Rest position
    pub const fn center(servo: &ServoConfig) -> Self {
        Self(servo.center())
    }

    /// Shortest commandable pulse
    pub const fn low(servo: &ServoConfig) -> Self {
        Self(servo.low())
    }

    /// Longest commandable pulse
    pub const fn high(servo: &ServoConfig) -> Self {
        Self(servo.high())
    }

    /// Map a position sample linearly onto `[low, high]`
    ///
    /// Computes `low + sample * range / 255`, truncating toward zero. Integer
    /// division gives the exact floor, so sample 0 maps to `low`, 255 maps to
    /// `high`, and 128 maps to `low + 61` with the default limits.
    pub fn from_sample(sample: AnalogSample, servo: &ServoConfig) -> Self {
        let full_scale = u32::from(AnalogSample::MAX.value());
        let offset = u32::from(sample.value()) * u32::from(servo.range()) / full_scale;
        // offset <= range, so the sum never passes `high`
        Self(servo.low() + offset as u16)
    }

    /// Compare value in ticks
    pub const fn ticks(self) -> u16 {
        self.0
    }

    /// Pulse duration in microseconds
    pub const fn micros(self, timing: &PwmTiming) -> u32 {
        timing.ticks_to_micros(self.0 as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PWM_CENTER, PWM_HIGH, PWM_LOW, PWM_RANGE};
    use proptest::prelude::*;

    fn reference_scale(s: u8) -> u16 {
        // floor(PWM_LOW + s * PWM_RANGE / 255.0), evaluated exactly
        PWM_LOW + ((s as u32 * PWM_RANGE as u32) / 255) as u16
    }

    #[test]
    fn test_scale_endpoints() {
        let servo = ServoConfig::DEFAULT;
        assert_eq!(PulseWidth::from_sample(AnalogSample::MIN, &servo).ticks(), PWM_LOW);
        assert_eq!(PulseWidth::from_sample(AnalogSample::MAX, &servo).ticks(), PWM_HIGH);
    }

    #[test]
    fn test_scale_midpoint_truncates() {
        let servo = ServoConfig::DEFAULT;
        // 128 * 123 / 255 = 61.74 -> 61
        assert_eq!(PulseWidth::from_sample(AnalogSample::new(128), &servo).ticks(), 184);
        // 127 * 123 / 255 = 61.26 -> 61
        assert_eq!(PulseWidth::from_sample(AnalogSample::new(127), &servo).ticks(), 184);
        // 1 * 123 / 255 = 0.48 -> 0
        assert_eq!(PulseWidth::from_sample(AnalogSample::new(1), &servo).ticks(), PWM_LOW);
    }

    #[test]
    fn test_scale_exact_multiples() {
        // Samples that are multiples of 85 land exactly on whole ticks
        let servo = ServoConfig::DEFAULT;
        assert_eq!(PulseWidth::from_sample(AnalogSample::new(85), &servo).ticks(), 123 + 41);
        assert_eq!(PulseWidth::from_sample(AnalogSample::new(170), &servo).ticks(), 123 + 82);
    }

    #[test]
    fn test_scale_matches_reference_for_every_sample() {
        let servo = ServoConfig::DEFAULT;
        for s in 0..=u8::MAX {
            let pulse = PulseWidth::from_sample(AnalogSample::new(s), &servo);
            assert_eq!(pulse.ticks(), reference_scale(s), "sample {s}");
            assert!(servo.contains(pulse.ticks()));
        }
    }

    #[test]
    fn test_scale_is_monotonic() {
        let servo = ServoConfig::DEFAULT;
        let mut prev = PulseWidth::low(&servo);
        for s in 0..=u8::MAX {
            let pulse = PulseWidth::from_sample(AnalogSample::new(s), &servo);
            assert!(pulse >= prev);
            prev = pulse;
        }
    }

    #[test]
    fn test_checked_construction() {
        let servo = ServoConfig::DEFAULT;
        assert_eq!(PulseWidth::new(PWM_CENTER, &servo), Some(PulseWidth::center(&servo)));
        assert!(PulseWidth::new(0, &servo).is_none());
        assert!(PulseWidth::new(PWM_LOW - 1, &servo).is_none());
        assert!(PulseWidth::new(PWM_HIGH + 1, &servo).is_none());
    }

    #[test]
    fn test_center_micros() {
        let servo = ServoConfig::DEFAULT;
        let timing = PwmTiming::SERVO_FRAME;
        assert_eq!(PulseWidth::center(&servo).micros(&timing), 1472);
    }

    proptest! {
        #[test]
        fn prop_scaled_pulse_stays_in_limits(
            low in 1u16..1000,
            span in 1u16..1000,
            sample in any::<u8>(),
        ) {
            let timing = PwmTiming::SERVO_FRAME;
            let high = low + span;
            let servo = ServoConfig::new(low, low, high, &timing).unwrap();
            let pulse = PulseWidth::from_sample(AnalogSample::new(sample), &servo);
            prop_assert!(pulse.ticks() >= low && pulse.ticks() <= high);
            if sample == u8::MAX {
                prop_assert_eq!(pulse.ticks(), high);
            }
        }
    }
}
