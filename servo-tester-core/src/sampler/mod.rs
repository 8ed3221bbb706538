//! Analog sampler types
//!
//! Conversion results and the shared register that hands them from the
//! conversion-complete handler to the control loop.

pub mod cell;
pub mod sample;

pub use cell::SampleCell;
pub use sample::AnalogSample;
