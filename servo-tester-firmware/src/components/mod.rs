//! Board components
//!
//! Adapters from embassy-rp peripherals to the core's hardware traits.

pub mod mode_switch;
pub mod servo_pwm;

pub use mode_switch::ModeSwitch;
pub use servo_pwm::{servo_config, ServoPwm};
