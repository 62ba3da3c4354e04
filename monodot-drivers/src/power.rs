//! Power line output
//!
//! Drives a load (backlight, sensor supply, relay) through one output line.
//! The line can be active-high (default) or active-low, and every on/off
//! can carry a one-shot timer that flips the state back once it expires.
//! Timers only take effect when [`PowerSwitch::check`] is polled.

use monodot_core::config::PowerLineConfig;
use monodot_core::traits::PowerSwitch;
use monodot_hal::{Clock, Millis, OutputPin};

/// Pending automatic flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Timer {
    started_at: Millis,
    duration_ms: u32,
}

/// Power line with polarity inversion and a revert timer
pub struct PowerLine<P, C> {
    pin: P,
    clock: C,
    /// If true, on = pin LOW
    inverted: bool,
    /// Current logical state (true = on)
    on: bool,
    timer: Option<Timer>,
}

impl<P: OutputPin, C: Clock> PowerLine<P, C> {
    /// Create a power line, initially off
    pub fn new(pin: P, clock: C, config: &PowerLineConfig) -> Self {
        let mut line = Self {
            pin,
            clock,
            inverted: config.inverted,
            on: false,
            timer: None,
        };
        line.set(false, None);
        line
    }

    /// Create an active-high power line
    pub fn new_active_high(pin: P, clock: C) -> Self {
        Self::new(pin, clock, &PowerLineConfig { inverted: false })
    }

    /// Create an active-low power line
    pub fn new_active_low(pin: P, clock: C) -> Self {
        Self::new(pin, clock, &PowerLineConfig { inverted: true })
    }

    /// Check if an automatic flip is pending
    pub fn is_timer_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Milliseconds until the pending flip, or None
    pub fn remaining_ms(&self) -> Option<u32> {
        self.timer.map(|t| {
            t.duration_ms
                .saturating_sub(self.clock.elapsed_since(t.started_at))
        })
    }

    /// Release the output line and clock
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }

    fn set(&mut self, on: bool, duration_ms: Option<u32>) {
        self.on = on;
        self.timer = duration_ms.map(|duration_ms| Timer {
            started_at: self.clock.now_ms(),
            duration_ms,
        });

        if on != self.inverted {
            // Normal: on=true, inverted=false → high
            // Inverted: on=true, inverted=true → low
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }
}

impl<P: OutputPin, C: Clock> PowerSwitch for PowerLine<P, C> {
    fn on(&mut self, duration_ms: Option<u32>) {
        self.set(true, duration_ms);
    }

    fn off(&mut self, duration_ms: Option<u32>) {
        self.set(false, duration_ms);
    }

    fn toggle(&mut self) {
        if self.on {
            self.off(None);
        } else {
            self.on(None);
        }
    }

    fn check(&mut self) -> bool {
        let Some(timer) = self.timer else {
            return false;
        };
        if self.clock.elapsed_since(timer.started_at) < timer.duration_ms {
            return false;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Power timer expired after {=u32}ms", timer.duration_ms);

        // Goes through on()/off() without a duration, so the timer clears
        self.toggle();
        true
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
