//! Text cursor
//!
//! The controller keeps its own X/Y write address and increments X after
//! every data byte, wrapping into the next bank at the right edge. The
//! cursor mirrors that at character-cell granularity so the driver can
//! answer "where am I", but the bytes sent never depend on the mirror:
//! glyphs rely on the controller's auto-increment, and line breaks and
//! `home` work from the row of the last explicit move.

use monodot_core::font::CELL_WIDTH;

use super::command;
use super::{BANKS, COLUMNS};

/// Character-cell cursor (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    col: u8,
    row: u8,
    /// Row of the last explicit move
    line: u8,
}

impl Cursor {
    /// Cursor at the top-left cell
    pub const fn new() -> Self {
        Self {
            col: 0,
            row: 0,
            line: 0,
        }
    }

    /// Current character column
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Current row (bank)
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// Address commands for a cell: X in pixels, then Y bank
    ///
    /// Positions past the panel edge are not clipped; the command fields
    /// are masked to their widths.
    pub const fn address(col: u8, row: u8) -> [u8; 2] {
        let pixel_col = col.wrapping_mul(CELL_WIDTH as u8);
        [command::set_x(pixel_col), command::set_y(row)]
    }

    /// Move to a cell, returning the commands that put the controller there
    pub fn move_to(&mut self, col: u8, row: u8) -> [u8; 2] {
        self.col = col;
        self.row = row;
        self.line = row;
        Self::address(col, row)
    }

    /// Row of the last explicit move, ignoring auto-increment wrap
    pub const fn line(&self) -> u8 {
        self.line
    }

    /// Target of a newline: start of the row after the current line,
    /// unchecked
    pub const fn next_line(&self) -> (u8, u8) {
        (0, self.line.wrapping_add(1))
    }

    /// Target of a carriage return: start of the current line
    pub const fn line_start(&self) -> (u8, u8) {
        (0, self.line)
    }

    /// Account for one rendered cell
    ///
    /// Follows the controller: past the last column the address wraps to
    /// column 0 of the next bank, and past the last bank to bank 0. The
    /// line used for newlines stays put.
    pub fn advance(&mut self) {
        self.col = self.col.wrapping_add(1);
        if self.col >= COLUMNS {
            self.col = 0;
            self.row = if self.row.wrapping_add(1) >= BANKS {
                0
            } else {
                self.row + 1
            };
        }
    }
}
