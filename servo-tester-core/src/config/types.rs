//! Configuration type definitions
//!
//! Pulse limits are in servo ticks (see [`crate::pwm::PwmTiming`]).

use crate::pwm::PwmTiming;

/// 1.0ms pulse (full counter-clockwise)
pub const PWM_LOW: u16 = 123;

/// 1.5ms pulse (servo center)
pub const PWM_CENTER: u16 = 184;

/// 2.0ms pulse (full clockwise)
pub const PWM_HIGH: u16 = 246;

/// Width of the commandable pulse range; never zero
pub const PWM_RANGE: u16 = PWM_HIGH - PWM_LOW;

const _: () = assert!(PWM_HIGH > PWM_LOW, "servo pulse range must not be empty");
const _: () = assert!(PWM_CENTER >= PWM_LOW && PWM_CENTER <= PWM_HIGH);

/// Time the output is held at center after reset
pub const SETTLE_MS: u32 = 2000;

/// Default interval between analog conversions
pub const SAMPLE_INTERVAL_US: u32 = 500;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// High pulse limit is not above the low limit
    EmptyRange,
    /// Center pulse lies outside [low, high]
    CenterOutOfRange,
    /// High pulse limit does not fit inside the frame
    ExceedsPeriod,
    /// Sampler interval of zero
    ZeroSampleInterval,
}

/// Servo pulse limits
///
/// Only constructible through [`ServoConfig::new`], so `low < high` and
/// `low <= center <= high` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    low: u16,
    center: u16,
    high: u16,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ServoConfig {
    /// Standard 1.0/1.5/2.0ms servo
    pub const DEFAULT: Self = Self {
        low: PWM_LOW,
        center: PWM_CENTER,
        high: PWM_HIGH,
    };

    /// Create validated pulse limits for the given frame timing
    pub fn new(low: u16, center: u16, high: u16, timing: &PwmTiming) -> Result<Self, ConfigError> {
        if high <= low {
            return Err(ConfigError::EmptyRange);
        }
        if center < low || center > high {
            return Err(ConfigError::CenterOutOfRange);
        }
        if high >= timing.period_ticks() {
            return Err(ConfigError::ExceedsPeriod);
        }
        Ok(Self { low, center, high })
    }

    pub const fn low(&self) -> u16 {
        self.low
    }

    pub const fn center(&self) -> u16 {
        self.center
    }

    pub const fn high(&self) -> u16 {
        self.high
    }

    /// Pulse range (`high - low`), always positive
    pub const fn range(&self) -> u16 {
        self.high - self.low
    }

    /// Check whether a compare value lies inside the limits
    pub const fn contains(&self, ticks: u16) -> bool {
        ticks >= self.low && ticks <= self.high
    }
}

/// Complete tester configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TesterConfig {
    /// Pulse limits
    pub servo: ServoConfig,
    /// Frame timing
    pub timing: PwmTiming,
    /// Center hold time after reset (ms)
    pub settle_ms: u32,
    /// Interval between analog conversions (µs)
    pub sample_interval_us: u32,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TesterConfig {
    /// Default configuration
    pub const fn new() -> Self {
        Self {
            servo: ServoConfig::DEFAULT,
            timing: PwmTiming::SERVO_FRAME,
            settle_ms: SETTLE_MS,
            sample_interval_us: SAMPLE_INTERVAL_US,
        }
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.servo.high() >= self.timing.period_ticks() {
            return Err(ConfigError::ExceedsPeriod);
        }
        if self.sample_interval_us == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        Ok(())
    }

    /// Settling time in timer ticks
    pub const fn settle_ticks(&self) -> u32 {
        self.timing.micros_to_ticks(self.settle_ms.saturating_mul(1000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let servo = ServoConfig::default();
        assert_eq!(servo.low(), 123);
        assert_eq!(servo.center(), 184);
        assert_eq!(servo.high(), 246);
        assert_eq!(servo.range(), PWM_RANGE);
        assert_eq!(PWM_RANGE, 123);
    }

    #[test]
    fn test_default_limits_are_1_to_2ms() {
        let timing = PwmTiming::SERVO_FRAME;
        // 8µs ticks: 123 -> 984µs, 184 -> 1472µs, 246 -> 1968µs
        assert_eq!(timing.ticks_to_micros(PWM_LOW as u32), 984);
        assert_eq!(timing.ticks_to_micros(PWM_CENTER as u32), 1472);
        assert_eq!(timing.ticks_to_micros(PWM_HIGH as u32), 1968);
    }

    #[test]
    fn test_rejects_empty_range() {
        let timing = PwmTiming::SERVO_FRAME;
        assert_eq!(
            ServoConfig::new(200, 200, 200, &timing),
            Err(ConfigError::EmptyRange)
        );
        assert_eq!(
            ServoConfig::new(246, 184, 123, &timing),
            Err(ConfigError::EmptyRange)
        );
    }

    #[test]
    fn test_rejects_center_outside_range() {
        let timing = PwmTiming::SERVO_FRAME;
        assert_eq!(
            ServoConfig::new(123, 100, 246, &timing),
            Err(ConfigError::CenterOutOfRange)
        );
        assert_eq!(
            ServoConfig::new(123, 247, 246, &timing),
            Err(ConfigError::CenterOutOfRange)
        );
    }

    #[test]
    fn test_rejects_pulse_longer_than_frame() {
        let timing = PwmTiming::SERVO_FRAME;
        assert_eq!(
            ServoConfig::new(123, 184, 2500, &timing),
            Err(ConfigError::ExceedsPeriod)
        );
    }

    #[test]
    fn test_contains() {
        let servo = ServoConfig::DEFAULT;
        assert!(servo.contains(123));
        assert!(servo.contains(246));
        assert!(!servo.contains(122));
        assert!(!servo.contains(247));
        assert!(!servo.contains(0));
    }

    #[test]
    fn test_settle_ticks() {
        let config = TesterConfig::default();
        // 2s at 125 kHz
        assert_eq!(config.settle_ticks(), 250_000);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_sample_interval_rejected() {
        let config = TesterConfig {
            sample_interval_us: 0,
            ..TesterConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSampleInterval));
    }
}
