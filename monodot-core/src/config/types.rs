//! Configuration type definitions
//!
//! Defaults reproduce the settings the panel driver has always shipped
//! with: contrast 0x39, temperature coefficient 0, bias 1:48, black on
//! transparent, 100ms debounce and a 500ms long-press threshold.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest contrast (Vop) value accepted by the panel
pub const MAX_CONTRAST: u8 = 0x7F;

/// Highest temperature coefficient selector
pub const MAX_TEMPERATURE_COEFFICIENT: u8 = 3;

/// Highest bias system selector
pub const MAX_BIAS: u8 = 7;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Contrast above `MAX_CONTRAST`
    ContrastOutOfRange(u8),
    /// Temperature coefficient above `MAX_TEMPERATURE_COEFFICIENT`
    TemperatureCoefficientOutOfRange(u8),
    /// Bias selector above `MAX_BIAS`
    BiasOutOfRange(u8),
    /// Debounce window of zero
    ZeroDebounce,
    /// Long-press threshold not longer than the debounce window
    LongPressWithinDebounce,
}

/// Panel controller settings sent during initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Operating voltage (Vop) setting, 0-127
    pub contrast: u8,
    /// Temperature coefficient selector, 0-3
    pub temperature_coefficient: u8,
    /// Bias system selector, 0-7 (3 = 1:48)
    pub bias: u8,
    /// Start in inverse video mode
    pub inverse: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            contrast: 0x39,
            temperature_coefficient: 0,
            bias: 3,
            inverse: false,
        }
    }
}

impl PanelConfig {
    /// Check all values fit their command fields
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contrast > MAX_CONTRAST {
            return Err(ConfigError::ContrastOutOfRange(self.contrast));
        }
        if self.temperature_coefficient > MAX_TEMPERATURE_COEFFICIENT {
            return Err(ConfigError::TemperatureCoefficientOutOfRange(
                self.temperature_coefficient,
            ));
        }
        if self.bias > MAX_BIAS {
            return Err(ConfigError::BiasOutOfRange(self.bias));
        }
        Ok(())
    }
}

/// Minimum pulse widths on the serial bus
///
/// These are datasheet minimums, not computed values. Set them to zero on
/// MCUs where a single GPIO write already takes longer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusTiming {
    /// Half of the serial clock period (ns)
    pub clock_half_period_ns: u32,
    /// Width of the reset pulse (ns)
    pub reset_pulse_ns: u32,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self {
            clock_half_period_ns: 125, // 4 MHz max SCLK
            reset_pulse_ns: 1_000,
        }
    }
}

/// Push button settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Settling time before a release is trusted (ms)
    pub debounce_ms: u32,
    /// Hold time above which a press is long (ms)
    pub long_press_ms: u32,
    /// Line reads low while pressed (switch to ground with pull-up)
    pub active_low: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            long_press_ms: 500,
            active_low: true,
        }
    }
}

impl ButtonConfig {
    /// Check the timing windows are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if self.long_press_ms <= self.debounce_ms {
            return Err(ConfigError::LongPressWithinDebounce);
        }
        Ok(())
    }
}

/// Power line settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerLineConfig {
    /// Line is active-low (on = driven low)
    pub inverted: bool,
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Panel controller settings
    pub panel: PanelConfig,
    /// Serial bus timing
    pub timing: BusTiming,
    /// Push button settings
    pub button: ButtonConfig,
    /// Power line settings
    pub power: PowerLineConfig,
}

impl DeviceConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.panel.validate()?;
        self.button.validate()
    }
}
