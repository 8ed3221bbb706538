//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic and the
//! board-specific timer and GPIO implementations.

pub mod input;
pub mod output;

pub use input::{FixedLevel, SwitchInput};
pub use output::PulseOutput;
