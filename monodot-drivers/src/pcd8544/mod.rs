//! PCD8544 dot-matrix panel driver
//!
//! Drives the 84x48 PCD8544 controller (the "Nokia 5110" LCD) over a
//! bit-banged serial bus and renders ASCII text with the 5x8 font from
//! `monodot-core`.
//!
//! # Layers
//!
//! ```text
//! Pcd8544 (init, clear, text, modes)
//!    │
//!    ├── Cursor          (row/column bookkeeping, address commands)
//!    │
//!    └── SerialBus       (command/data dispatch, byte framing)
//!           │
//!           └── SCE, D/C, DIN, SCLK lines
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let pins = PanelPins { sce, rst, dc, din, sclk };
//! let mut lcd = Pcd8544::new(pins, delay, PanelConfig::default(), BusTiming::default());
//! write!(lcd, "Hello\nworld").ok();
//! lcd.set_inverse();
//! ```

pub mod bus;
pub mod command;
pub mod cursor;
pub mod display;

#[cfg(test)]
pub(crate) mod sim;

pub use bus::SerialBus;
pub use cursor::Cursor;
pub use display::Pcd8544;

use monodot_core::font::CELL_WIDTH;

/// Panel width in pixels
pub const WIDTH: usize = 84;

/// Panel height in pixels
pub const HEIGHT: usize = 48;

/// Number of 8-pixel banks (text rows)
pub const BANKS: u8 = (HEIGHT / 8) as u8;

/// Number of character cells per row
pub const COLUMNS: u8 = (WIDTH / CELL_WIDTH) as u8;

/// Bytes in one full frame of display RAM
pub const FRAME_BYTES: usize = WIDTH * HEIGHT / 8;

/// The five control lines of a panel
///
/// Ownership of every line moves into the driver.
pub struct PanelPins<SCE, RST, DC, DIN, SCLK> {
    /// Chip enable, active low
    pub sce: SCE,
    /// Reset, active low
    pub rst: RST,
    /// Data/command select (low = command)
    pub dc: DC,
    /// Serial data in
    pub din: DIN,
    /// Serial clock
    pub sclk: SCLK,
}
