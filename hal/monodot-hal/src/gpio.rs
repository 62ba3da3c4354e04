//! GPIO line abstractions
//!
//! Provides traits for digital input and output lines that can be implemented
//! by chip-specific HALs or by simulated lines in tests.

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Level for a boolean (`true` = high)
    pub const fn from_bool(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Digital output line
///
/// Setting a line is a direct electrical operation with no acknowledgment,
/// so none of these methods can fail.
pub trait OutputPin {
    /// Set the line high (logic 1)
    fn set_high(&mut self);

    /// Set the line low (logic 0)
    fn set_low(&mut self);

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool;

    /// Drive the line to a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }
}

/// Digital input line
///
/// Reads take `&mut self` to match `embedded-hal` 1.0, where sampling an
/// input may touch peripheral state.
pub trait InputPin {
    /// Check if the line reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the line reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }

    fn is_set_high(&self) -> bool {
        (**self).is_set_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&mut self) -> bool {
        (**self).is_high()
    }
}
