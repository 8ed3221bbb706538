//! Build script for servo-tester-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates tester.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Ticks in one 20ms servo frame
const PERIOD_TICKS: i64 = 2500;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate tester.toml configuration at compile time
fn validate_config() {
    // Re-run if tester.toml changes
    println!("cargo:rerun-if-changed=tester.toml");

    let config_path = Path::new("tester.toml");

    // Check if config file exists
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: tester.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a tester.toml configuration file.         ║\n\
            ║  Please create one in the servo-tester-firmware directory.       ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    // Read the config file
    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read tester.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in tester.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_required_sections(&config);
    validate_servo(&config);
    validate_sampler(&config);

    println!("cargo:warning=tester.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fail the build with a boxed list of errors
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Validate that only the known sections exist, and both of them
fn validate_required_sections(config: &toml::Value) {
    let mut errors = Vec::new();

    let table = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    for section in ["servo", "sampler"] {
        match table.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("Missing [{}] section", section)),
        }
    }

    for key in table.keys() {
        if key != "servo" && key != "sampler" {
            errors.push(format!("Unknown section [{}]", key));
        }
    }

    report("Invalid sections in tester.toml", &errors);
}

/// Read an optional integer key, recording an error if it has the wrong type
fn integer(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match table.get(key) {
        Some(toml::Value::Integer(v)) => Some(*v),
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
        None => None,
    }
}

/// Reject keys the firmware parser does not know
fn check_keys(table: &toml::value::Table, section: &str, known: &[&str], errors: &mut Vec<String>) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

/// Validate the servo pulse limits
fn validate_servo(config: &toml::Value) {
    let servo = match config.get("servo") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    let mut errors = Vec::new();
    check_keys(
        servo,
        "servo",
        &["pulse_low", "pulse_center", "pulse_high", "settle_ms"],
        &mut errors,
    );

    let low = integer(servo, "servo", "pulse_low", &mut errors).unwrap_or(123);
    let center = integer(servo, "servo", "pulse_center", &mut errors).unwrap_or(184);
    let high = integer(servo, "servo", "pulse_high", &mut errors).unwrap_or(246);

    for (key, value) in [("pulse_low", low), ("pulse_center", center), ("pulse_high", high)] {
        if !(0..PERIOD_TICKS).contains(&value) {
            errors.push(format!("[servo] {} must be 0-{}", key, PERIOD_TICKS - 1));
        }
    }

    if high <= low {
        errors.push("[servo] pulse_high must be greater than pulse_low".to_string());
    }
    if center < low || center > high {
        errors.push("[servo] pulse_center must lie between low and high".to_string());
    }

    if let Some(settle) = integer(servo, "servo", "settle_ms", &mut errors) {
        if !(0..=60_000).contains(&settle) {
            errors.push("[servo] settle_ms must be 0-60000".to_string());
        }
    }

    report("Invalid servo configuration", &errors);
}

/// Validate the sampler interval
fn validate_sampler(config: &toml::Value) {
    let sampler = match config.get("sampler") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    let mut errors = Vec::new();
    check_keys(sampler, "sampler", &["interval_us"], &mut errors);

    if let Some(interval) = integer(sampler, "sampler", "interval_us", &mut errors) {
        if !(1..=1_000_000).contains(&interval) {
            errors.push("[sampler] interval_us must be 1-1000000".to_string());
        }
    }

    report("Invalid sampler configuration", &errors);
}
