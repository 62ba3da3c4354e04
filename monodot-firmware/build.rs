//! Build script for monodot-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

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

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Allowed key, and the accepted value range for integers
enum Key {
    Int(&'static str, i64, i64),
    Bool(&'static str),
}

impl Key {
    fn name(&self) -> &'static str {
        match self {
            Key::Int(name, ..) | Key::Bool(name) => *name,
        }
    }
}

const SECTIONS: &[(&str, &[Key])] = &[
    (
        "panel",
        &[
            Key::Int("contrast", 0, 0x7F),
            Key::Int("temperature_coefficient", 0, 3),
            Key::Int("bias", 0, 7),
            Key::Bool("inverse"),
        ],
    ),
    (
        "timing",
        &[
            Key::Int("clock_half_period_ns", 0, u32::MAX as i64),
            Key::Int("reset_pulse_ns", 0, u32::MAX as i64),
        ],
    ),
    (
        "button",
        &[
            Key::Int("debounce_ms", 1, u32::MAX as i64),
            Key::Int("long_press_ms", 1, u32::MAX as i64),
            Key::Bool("active_low"),
        ],
    ),
    ("power", &[Key::Bool("inverted")]),
];

/// Validate device.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a device.toml configuration file.           ║\n\
            ║  Please create one in the monodot-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
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
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n\
                \n{}\n",
                e
            );
        }
    };

    let mut errors = Vec::new();
    check_sections(&config, &mut errors);
    check_button_thresholds(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid device configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Only known sections and keys, with values of the right type and range
fn check_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".into());
        return;
    };

    for (section, value) in root {
        let Some((_, keys)) = SECTIONS.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in table {
            let Some(allowed) = keys.iter().find(|k| k.name() == key.as_str()) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };

            match (allowed, value) {
                (Key::Int(_, min, max), toml::Value::Integer(v)) => {
                    if v < min || v > max {
                        errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
                    }
                }
                (Key::Bool(_), toml::Value::Boolean(_)) => {}
                (Key::Int(..), _) => {
                    errors.push(format!("[{}] {} must be an integer", section, key));
                }
                (Key::Bool(_), _) => {
                    errors.push(format!("[{}] {} must be true or false", section, key));
                }
            }
        }
    }
}

/// A long press must outlast the debounce window
fn check_button_thresholds(config: &toml::Value, errors: &mut Vec<String>) {
    let button = config.get("button");
    let get = |key: &str, default: i64| {
        button
            .and_then(|b| b.get(key))
            .and_then(|v| v.as_integer())
            .unwrap_or(default)
    };

    let debounce = get("debounce_ms", 100);
    let long_press = get("long_press_ms", 500);
    if long_press <= debounce {
        errors.push(format!(
            "[button] long_press_ms ({}) must exceed debounce_ms ({})",
            long_press, debounce
        ));
    }
}
