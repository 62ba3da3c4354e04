//! `embedded-hal` 1.0 adapters
//!
//! Chip HALs expose their GPIO through the `embedded-hal` digital traits.
//! Only pins whose error type is [`Infallible`] are accepted: the Monodot
//! line model has no error path, and direct GPIO on every supported chip
//! already reports `Infallible`.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital;

use crate::gpio::{InputPin, OutputPin};

/// Output line backed by an `embedded-hal` output pin
///
/// The driven level is tracked locally so read-back does not require
/// `StatefulOutputPin`.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P> EhOutput<P>
where
    P: digital::OutputPin<Error = Infallible>,
{
    /// Wrap a pin, driving it to `initial_high`
    pub fn new(mut pin: P, initial_high: bool) -> Self {
        if initial_high {
            infallible(pin.set_high());
        } else {
            infallible(pin.set_low());
        }
        Self {
            pin,
            high: initial_high,
        }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhOutput<P>
where
    P: digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        infallible(self.pin.set_high());
        self.high = true;
    }

    fn set_low(&mut self) {
        infallible(self.pin.set_low());
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input line backed by an `embedded-hal` input pin
pub struct EhInput<P> {
    pin: P,
}

impl<P> EhInput<P>
where
    P: digital::InputPin<Error = Infallible>,
{
    /// Wrap a pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> InputPin for EhInput<P>
where
    P: digital::InputPin<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high,
            Err(never) => match never {},
        }
    }
}

/// Delay that returns immediately
///
/// For hosts and slow MCUs where a GPIO write already outlasts the panel's
/// minimum pulse width.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn infallible(result: Result<(), Infallible>) {
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}
