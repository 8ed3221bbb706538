//! Mode control
//!
//! Maps the switch position and latest sample to a servo pulse width.

pub mod controller;
pub mod mode;

pub use controller::{Command, Iteration, ModeController};
pub use mode::SwitchMode;
