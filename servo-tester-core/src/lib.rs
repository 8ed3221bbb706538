//! Board-agnostic core logic for the servo tester firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (pulse output, switch input)
//! - Mode controller (Center/Manual decision)
//! - Sample cell shared between the conversion handler and the loop
//! - Pulse width scaling and PWM frame timing
//! - Startup sequence
//! - Configuration types and parser
//! - Host simulation bench

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod control;
pub mod pwm;
pub mod sampler;
pub mod sim;
pub mod startup;
pub mod traits;
