//! Host simulation
//!
//! Software stand-ins for the free-running timer and ADC, for exercising
//! the control logic without hardware.

pub mod bench;

pub use bench::{Bench, FrameStats, ADC_BITS, FRAME_HISTORY};
