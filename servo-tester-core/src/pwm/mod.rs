//! Servo PWM
//!
//! Frame timing, the validated pulse width type, and a software model of
//! the free-running PWM generator.

pub mod generator;
pub mod pulse;
pub mod timing;

pub use generator::{Frame, PwmGenerator};
pub use pulse::PulseWidth;
pub use timing::{PwmTiming, SERVO_PERIOD_TICKS, SERVO_TICK_HZ};
