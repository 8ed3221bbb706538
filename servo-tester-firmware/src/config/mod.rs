//! Configuration loading
//!
//! The configuration is compiled into the firmware from tester.toml and
//! parsed at boot by the core's no_std parser.

pub mod loader;

pub use loader::{load_config, EMBEDDED_CONFIG};
