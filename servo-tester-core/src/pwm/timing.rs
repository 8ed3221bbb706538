//! Servo frame timing
//!
//! All pulse widths in this crate are expressed in servo ticks. The default
//! tick is 8µs (125 kHz), which gives a 2500-tick 20ms frame and puts the
//! 1.0ms/2.0ms servo limits at 123/246 ticks.

/// Servo tick rate in Hz (8µs per tick)
pub const SERVO_TICK_HZ: u32 = 125_000;

/// Ticks per 20ms servo frame
pub const SERVO_PERIOD_TICKS: u16 = 2500;

/// Timer clock and frame length for the PWM generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Timer tick rate in Hz
    tick_hz: u32,
    /// Frame length in ticks
    period_ticks: u16,
}

impl Default for PwmTiming {
    fn default() -> Self {
        Self::SERVO_FRAME
    }
}

impl PwmTiming {
    /// Standard 20ms hobby servo frame
    pub const SERVO_FRAME: Self = Self {
        tick_hz: SERVO_TICK_HZ,
        period_ticks: SERVO_PERIOD_TICKS,
    };

    /// Create a timing with a custom tick rate and frame length
    ///
    /// Returns `None` for a zero tick rate or an empty frame.
    pub const fn new(tick_hz: u32, period_ticks: u16) -> Option<Self> {
        if tick_hz == 0 || period_ticks == 0 {
            return None;
        }
        Some(Self {
            tick_hz,
            period_ticks,
        })
    }

    /// Timer tick rate in Hz
    pub const fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    /// Frame length in ticks
    pub const fn period_ticks(&self) -> u16 {
        self.period_ticks
    }

    /// Counter TOP value (the counter wraps after reaching it)
    pub const fn top(&self) -> u16 {
        self.period_ticks - 1
    }

    /// TOP for a counter running `factor` times faster than the servo tick
    ///
    /// Returns `None` if the scaled frame does not fit a 16-bit counter.
    pub const fn scaled_top(&self, factor: u16) -> Option<u16> {
        if factor == 0 {
            return None;
        }
        let top = (self.top() as u32 + 1) * factor as u32 - 1;
        if top > u16::MAX as u32 {
            return None;
        }
        Some(top as u16)
    }

    /// Convert a tick count to microseconds (truncating)
    pub const fn ticks_to_micros(&self, ticks: u32) -> u32 {
        ((ticks as u64 * 1_000_000) / self.tick_hz as u64) as u32
    }

    /// Convert microseconds to whole ticks (truncating)
    pub const fn micros_to_ticks(&self, micros: u32) -> u32 {
        ((micros as u64 * self.tick_hz as u64) / 1_000_000) as u32
    }

    /// Frame length in microseconds
    pub const fn period_micros(&self) -> u32 {
        self.ticks_to_micros(self.period_ticks as u32)
    }
}
