//! Embedded configuration loader
//!
//! Parses the embedded tester.toml, falling back to the built-in defaults
//! if it does not parse. The build script validates the same file, so the
//! fallback only triggers if the two checks ever disagree.

use defmt::*;

use servo_tester_core::config::{parse_config, TesterConfig};

/// Embedded configuration (compiled into firmware)
/// Edit tester.toml and rebuild to customize
pub const EMBEDDED_CONFIG: &str = include_str!("../../tester.toml");

/// Parse a configuration, or return the defaults
pub fn load_config(text: &str) -> TesterConfig {
    match parse_config(text) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            warn!("Using default configuration");
            TesterConfig::default()
        }
    }
}
