//! Device config file parser
//!
//! Minimal parser for the TOML subset used by device config files. It does
//! NOT support the full TOML spec.
//!
//! Supported features:
//! - `key = value` pairs (integer, boolean)
//! - Integers in decimal or `0x` hex, with `_` separators
//! - `[panel]`, `[timing]`, `[button]`, `[power]` section headers
//! - Comments (# ...), whole-line or trailing
//!
//! Missing keys keep their defaults. The parsed config is validated before
//! it is returned.

use super::types::{ConfigError, DeviceConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Line is not `key = value`
    InvalidLine,
    /// Value has the wrong type or does not fit
    InvalidValue,
    /// Values parsed but failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Panel,
    Timing,
    Button,
    Power,
}

/// Parse a device config file
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ParseError::InvalidSection);
            }
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "panel" => Ok(Section::Panel),
        "timing" => Ok(Section::Timing),
        "button" => Ok(Section::Button),
        "power" => Ok(Section::Power),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Panel, "contrast") => config.panel.contrast = parse_int(value)?,
        (Section::Panel, "temperature_coefficient") => {
            config.panel.temperature_coefficient = parse_int(value)?
        }
        (Section::Panel, "bias") => config.panel.bias = parse_int(value)?,
        (Section::Panel, "inverse") => config.panel.inverse = parse_bool(value)?,

        (Section::Timing, "clock_half_period_ns") => {
            config.timing.clock_half_period_ns = parse_int(value)?
        }
        (Section::Timing, "reset_pulse_ns") => config.timing.reset_pulse_ns = parse_int(value)?,

        (Section::Button, "debounce_ms") => config.button.debounce_ms = parse_int(value)?,
        (Section::Button, "long_press_ms") => config.button.long_press_ms = parse_int(value)?,
        (Section::Button, "active_low") => config.button.active_low = parse_bool(value)?,

        (Section::Power, "inverted") => config.power.inverted = parse_bool(value)?,

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Drop a trailing `# comment`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value (decimal or 0x-prefixed hex)
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let mut digits = [0u8; 16];
    let mut len = 0;
    for b in value.bytes().filter(|&b| b != b'_') {
        *digits.get_mut(len).ok_or(ParseError::InvalidValue)? = b;
        len += 1;
    }
    let cleaned = core::str::from_utf8(&digits[..len]).map_err(|_| ParseError::InvalidValue)?;

    let raw = match cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => cleaned.parse::<u32>(),
    }
    .map_err(|_| ParseError::InvalidValue)?;

    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}
