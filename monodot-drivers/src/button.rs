//! Debounced push button
//!
//! Two states: idle, and tracking a press that started at a recorded time.
//! The first active reading starts tracking. Readings inside the debounce
//! window are ignored, including releases, which are treated as contact
//! bounce. The first inactive reading after the window ends the press,
//! which is classified by its total duration.
//!
//! # Usage
//!
//! ```ignore
//! let mut button = Button::new(pin, clock, &ButtonConfig::default());
//!
//! // In the main loop:
//! match button.poll(500) {
//!     Press::Short => menu.next(),
//!     Press::Long => menu.select(),
//!     Press::None => {}
//! }
//! ```

use monodot_core::config::ButtonConfig;
use monodot_core::traits::{Press, PushButton};
use monodot_hal::{Clock, InputPin, Millis};

/// Debounced momentary switch on one input line
pub struct Button<P, C> {
    pin: P,
    clock: C,
    debounce_ms: u32,
    long_press_ms: u32,
    active_low: bool,
    /// Start of the press being tracked
    pressed_at: Option<Millis>,
}

impl<P: InputPin, C: Clock> Button<P, C> {
    /// Create a button reader
    pub fn new(pin: P, clock: C, config: &ButtonConfig) -> Self {
        Self {
            pin,
            clock,
            debounce_ms: config.debounce_ms,
            long_press_ms: config.long_press_ms,
            active_low: config.active_low,
            pressed_at: None,
        }
    }

    /// Poll using the configured long-press threshold
    pub fn poll_configured(&mut self) -> Press {
        self.poll(self.long_press_ms)
    }

    /// Check if a press is being tracked
    pub fn is_tracking(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Release the input line and clock
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }

    fn is_active(&mut self) -> bool {
        self.pin.is_high() != self.active_low
    }
}

impl<P: InputPin, C: Clock> PushButton for Button<P, C> {
    fn poll(&mut self, long_press_ms: u32) -> Press {
        let Some(start) = self.pressed_at else {
            if self.is_active() {
                self.pressed_at = Some(self.clock.now_ms());
            }
            return Press::None;
        };

        let elapsed = self.clock.elapsed_since(start);
        if elapsed < self.debounce_ms {
            return Press::None;
        }
        if self.is_active() {
            // Still held
            return Press::None;
        }

        self.pressed_at = None;
        let press = if elapsed > long_press_ms {
            Press::Long
        } else {
            Press::Short
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("Button {} after {=u32}ms", press, elapsed);

        press
    }
}
