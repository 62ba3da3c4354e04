//! Bit-banged serial bus
//!
//! The PCD8544 samples DIN on the rising edge of SCLK while SCE is low,
//! most significant bit first, and latches D/C with the eighth bit. There
//! is no readback and no acknowledgment, so every operation here is
//! fire-and-forget.
//!
//! Idle levels: SCE high, SCLK low, D/C high (data). A command pulls D/C
//! low for exactly one byte and restores it afterwards.

use embedded_hal::delay::DelayNs;
use monodot_core::config::BusTiming;
use monodot_hal::{Level, OutputPin};

/// Serial transmitter plus command/data dispatch
pub struct SerialBus<SCE, DC, DIN, SCLK, D> {
    sce: SCE,
    dc: DC,
    din: DIN,
    sclk: SCLK,
    delay: D,
    half_period_ns: u32,
}

impl<SCE, DC, DIN, SCLK, D> SerialBus<SCE, DC, DIN, SCLK, D>
where
    SCE: OutputPin,
    DC: OutputPin,
    DIN: OutputPin,
    SCLK: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the bus lines and drive them to idle
    pub fn new(sce: SCE, dc: DC, din: DIN, sclk: SCLK, delay: D, timing: &BusTiming) -> Self {
        let mut bus = Self {
            sce,
            dc,
            din,
            sclk,
            delay,
            half_period_ns: timing.clock_half_period_ns,
        };
        // Deselect first so nothing below can be mistaken for a transfer
        bus.sce.set_high();
        bus.sclk.set_low();
        bus.din.set_low();
        bus.dc.set_high();
        bus
    }

    /// Send one instruction byte (D/C low)
    pub fn send_command(&mut self, value: u8) {
        self.dc.set_low();
        self.transmit(value);
        self.dc.set_high();
    }

    /// Send one display RAM byte (D/C high)
    pub fn send_data(&mut self, value: u8) {
        self.dc.set_high();
        self.transmit(value);
    }

    /// Send a run of display RAM bytes with D/C held high
    pub fn send_data_bytes(&mut self, values: &[u8]) {
        self.dc.set_high();
        for &value in values {
            self.transmit(value);
        }
    }

    /// Send the same display RAM byte `count` times
    pub fn send_data_repeated(&mut self, value: u8, count: usize) {
        self.dc.set_high();
        for _ in 0..count {
            self.transmit(value);
        }
    }

    /// Wait for `ns` nanoseconds on the bus delay
    pub fn delay_ns(&mut self, ns: u32) {
        if ns > 0 {
            self.delay.delay_ns(ns);
        }
    }

    /// Release the lines and delay
    pub fn release(self) -> (SCE, DC, DIN, SCLK, D) {
        (self.sce, self.dc, self.din, self.sclk, self.delay)
    }

    /// Frame one byte: select, shift out MSB first, deselect
    fn transmit(&mut self, value: u8) {
        self.sce.set_low();
        for bit in (0..8).rev() {
            self.din.set_level(Level::from_bool(value & (1 << bit) != 0));
            self.delay_ns(self.half_period_ns);
            self.sclk.set_high();
            self.delay_ns(self.half_period_ns);
            self.sclk.set_low();
        }
        self.sce.set_high();
    }
}
