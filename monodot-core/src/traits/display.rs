//! Text display trait

use crate::font::GlyphError;

/// Errors reported by text displays
///
/// Line-level faults are not observable on a write-only bus, so the only
/// failures are characters the font cannot draw and positions the panel
/// cannot address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Character has no glyph; nothing was sent
    UnsupportedCharacter(char),
    /// Text would start outside the panel
    OutOfBounds,
}

impl From<GlyphError> for DisplayError {
    fn from(e: GlyphError) -> Self {
        match e {
            GlyphError::Unsupported(ch) => DisplayError::UnsupportedCharacter(ch),
        }
    }
}

/// Character-cell text display with a write cursor
///
/// Columns are character cells, rows are 8-pixel banks.
pub trait TextDisplay {
    /// Blank the whole frame and move the cursor to (0, 0)
    fn clear(&mut self);

    /// Move the cursor to a character cell
    fn set_position(&mut self, col: u8, row: u8);

    /// Move the cursor to the start of the current row
    fn home(&mut self);

    /// Render one character at the cursor
    ///
    /// `'\n'` moves to the start of the next row and `'\r'` to the start of
    /// the current one.
    fn write_char(&mut self, ch: char) -> Result<(), DisplayError>;

    /// Turn the panel output on or off
    fn set_display_on(&mut self, on: bool);

    /// Select inverse (true) or normal (false) video
    fn set_inverted(&mut self, inverted: bool);

    /// Current cursor as (column, row)
    fn cursor(&self) -> (u8, u8);

    /// Panel size as (columns, rows) in character cells
    fn dimensions(&self) -> (u8, u8);
}

/// Helpers for writing strings
pub trait TextDisplayExt: TextDisplay {
    /// Render every character of `text`
    ///
    /// Stops at the first unsupported character; characters before it have
    /// already been drawn.
    fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
        for ch in text.chars() {
            self.write_char(ch)?;
        }
        Ok(())
    }

    /// Render `text` starting at a character cell
    fn print_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        let (cols, rows) = self.dimensions();
        if col >= cols || row >= rows {
            return Err(DisplayError::OutOfBounds);
        }
        self.set_position(col, row);
        self.write_text(text)
    }

    /// Overwrite a whole row with `text`, padding with spaces
    fn print_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        let (cols, _) = self.dimensions();
        self.print_at(0, row, "")?;
        let mut written = 0u8;
        for ch in text.chars().take(cols as usize) {
            self.write_char(ch)?;
            written += 1;
        }
        for _ in written..cols {
            self.write_char(' ')?;
        }
        Ok(())
    }
}

// Blanket implementation for all TextDisplay types
impl<T: TextDisplay + ?Sized> TextDisplayExt for T {}
