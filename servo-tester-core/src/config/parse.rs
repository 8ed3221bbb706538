//! Minimal TOML reader for the tester configuration
//!
//! Handles only the subset the tester needs:
//! - `[section]` headers
//! - `key = integer` pairs
//! - Comments (`# ...`), including trailing comments
//!
//! Keys that are absent keep their defaults.

use super::types::{ConfigError, ServoConfig, TesterConfig};

/// Parse error, with 1-based line numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection { line: usize },
    /// Line is neither a header nor `key = value`
    InvalidLine { line: usize },
    /// Key not recognized in the current section
    UnknownKey { line: usize },
    /// Value is not an integer or does not fit its field
    InvalidValue { line: usize },
    /// Values parsed but are inconsistent
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Servo,
    Sampler,
}

/// Parse TOML text into a validated [`TesterConfig`]
pub fn parse_config(input: &str) -> Result<TesterConfig, ParseError> {
    let mut config = TesterConfig::new();
    let mut low = config.servo.low();
    let mut center = config.servo.center();
    let mut high = config.servo.high();
    let mut section = Section::Root;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = match raw.split_once('#') {
            Some((content, _comment)) => content,
            None => raw,
        }
        .trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            section = match name.trim() {
                "servo" => Section::Servo,
                "sampler" => Section::Sampler,
                _ => return Err(ParseError::InvalidSection { line: line_no }),
            };
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(ParseError::InvalidLine { line: line_no })?;
        let key = key.trim();
        let value: u32 = value
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidValue { line: line_no })?;

        match (section, key) {
            (Section::Servo, "pulse_low") => low = to_ticks(value, line_no)?,
            (Section::Servo, "pulse_center") => center = to_ticks(value, line_no)?,
            (Section::Servo, "pulse_high") => high = to_ticks(value, line_no)?,
            (Section::Servo, "settle_ms") => config.settle_ms = value,
            (Section::Sampler, "interval_us") => config.sample_interval_us = value,
            _ => return Err(ParseError::UnknownKey { line: line_no }),
        }
    }

    config.servo = ServoConfig::new(low, center, high, &config.timing)?;
    config.validate()?;
    Ok(config)
}

fn to_ticks(value: u32, line: usize) -> Result<u16, ParseError> {
    u16::try_from(value).map_err(|_| ParseError::InvalidValue { line })
}
