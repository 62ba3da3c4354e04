//! PCD8544 display controller
//!
//! Owns the panel lines, runs the reset and initialization sequence, and
//! renders text cell by cell. All operations block for the duration of the
//! line toggling and never allocate.

use core::fmt;

use embedded_hal::delay::DelayNs;
use monodot_core::config::{BusTiming, ConfigError, PanelConfig};
use monodot_core::config::{MAX_BIAS, MAX_CONTRAST, MAX_TEMPERATURE_COEFFICIENT};
use monodot_core::font::{self, GLYPH_SPACING};
use monodot_core::traits::{DisplayError, TextDisplay};
use monodot_hal::OutputPin;

use super::bus::SerialBus;
use super::command;
use super::cursor::Cursor;
use super::{PanelPins, BANKS, COLUMNS, FRAME_BYTES};

/// PCD8544 text-mode driver
pub struct Pcd8544<SCE, RST, DC, DIN, SCLK, D> {
    bus: SerialBus<SCE, DC, DIN, SCLK, D>,
    rst: RST,
    panel: PanelConfig,
    reset_pulse_ns: u32,
    cursor: Cursor,
    /// Power-down bit of the last function set. Function set also selects
    /// the instruction set, so extended-set round trips must resend it.
    powered: bool,
}

impl<SCE, RST, DC, DIN, SCLK, D> Pcd8544<SCE, RST, DC, DIN, SCLK, D>
where
    SCE: OutputPin,
    RST: OutputPin,
    DC: OutputPin,
    DIN: OutputPin,
    SCLK: OutputPin,
    D: DelayNs,
{
    /// Take the panel lines, reset the controller, configure it and clear
    /// the frame
    ///
    /// Panel values are masked to their command fields; run
    /// [`PanelConfig::validate`] first to reject out-of-range settings.
    pub fn new(
        pins: PanelPins<SCE, RST, DC, DIN, SCLK>,
        delay: D,
        panel: PanelConfig,
        timing: BusTiming,
    ) -> Self {
        let PanelPins {
            sce,
            rst,
            dc,
            din,
            sclk,
        } = pins;

        let mut lcd = Self {
            bus: SerialBus::new(sce, dc, din, sclk, delay, &timing),
            rst,
            panel,
            reset_pulse_ns: timing.reset_pulse_ns,
            cursor: Cursor::new(),
            powered: true,
        };
        lcd.reset();
        lcd
    }

    /// Pulse reset and run the full initialization sequence again
    pub fn reset(&mut self) {
        self.rst.set_low();
        self.bus.delay_ns(self.reset_pulse_ns);
        self.rst.set_high();

        let panel = self.panel;
        self.bus.send_command(command::function_set(true, true));
        self.bus.send_command(command::set_vop(panel.contrast));
        self.bus
            .send_command(command::temperature_control(panel.temperature_coefficient));
        self.bus.send_command(command::bias_system(panel.bias));
        self.bus.send_command(command::function_set(true, false));
        self.bus.send_command(command::display_mode(panel.inverse));
        self.powered = true;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "PCD8544 initialized: contrast={=u8} tc={=u8} bias={=u8}",
            panel.contrast,
            panel.temperature_coefficient,
            panel.bias
        );

        self.clear();
    }

    /// Blank all of display RAM and move the cursor to (0, 0)
    pub fn clear(&mut self) {
        self.bus.send_data_repeated(0x00, FRAME_BYTES);
        self.set_position(0, 0);
    }

    /// Move the write address to a character cell
    pub fn set_position(&mut self, col: u8, row: u8) {
        for cmd in self.cursor.move_to(col, row) {
            self.bus.send_command(cmd);
        }
    }

    /// Move to the start of the row last set by a position change
    pub fn home(&mut self) {
        let (col, row) = self.cursor.line_start();
        self.set_position(col, row);
    }

    /// Render one character at the cursor
    ///
    /// `'\n'` moves to the start of the next row without bounds checking,
    /// `'\r'` to the start of the current row. Other characters send their
    /// five glyph columns and one blank spacing column; characters without
    /// a glyph are rejected before anything is sent.
    pub fn write_character(&mut self, ch: char) -> Result<(), DisplayError> {
        match ch {
            '\n' => {
                let (col, row) = self.cursor.next_line();
                self.set_position(col, row);
            }
            '\r' => {
                let (col, row) = self.cursor.line_start();
                self.set_position(col, row);
            }
            _ => {
                let glyph = font::glyph(ch).map_err(|e| {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("No glyph for {:?}", ch);
                    DisplayError::from(e)
                })?;
                self.bus.send_data_bytes(glyph);
                self.bus.send_data_repeated(0x00, GLYPH_SPACING);
                self.cursor.advance();
            }
        }
        Ok(())
    }

    /// Leave power-down mode
    pub fn set_display(&mut self) {
        self.powered = true;
        self.bus.send_command(command::function_set(true, false));
    }

    /// Enter power-down mode; display RAM is retained
    pub fn no_display(&mut self) {
        self.powered = false;
        self.bus.send_command(command::function_set(false, false));
    }

    /// Inverse video
    pub fn set_inverse(&mut self) {
        self.bus.send_command(command::display_mode(true));
    }

    /// Normal video
    pub fn no_inverse(&mut self) {
        self.bus.send_command(command::display_mode(false));
    }

    /// Change the operating voltage (contrast), 0-127
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), ConfigError> {
        if contrast > MAX_CONTRAST {
            return Err(ConfigError::ContrastOutOfRange(contrast));
        }
        self.panel.contrast = contrast;
        self.send_extended(command::set_vop(contrast));
        Ok(())
    }

    /// Change the temperature coefficient, 0-3
    pub fn set_temperature_coefficient(&mut self, coefficient: u8) -> Result<(), ConfigError> {
        if coefficient > MAX_TEMPERATURE_COEFFICIENT {
            return Err(ConfigError::TemperatureCoefficientOutOfRange(coefficient));
        }
        self.panel.temperature_coefficient = coefficient;
        self.send_extended(command::temperature_control(coefficient));
        Ok(())
    }

    /// Change the bias system, 0-7
    pub fn set_bias(&mut self, bias: u8) -> Result<(), ConfigError> {
        if bias > MAX_BIAS {
            return Err(ConfigError::BiasOutOfRange(bias));
        }
        self.panel.bias = bias;
        self.send_extended(command::bias_system(bias));
        Ok(())
    }

    /// Current cursor as (column, row)
    pub fn cursor(&self) -> (u8, u8) {
        (self.cursor.col(), self.cursor.row())
    }

    /// Panel settings applied on reset
    pub fn panel_config(&self) -> &PanelConfig {
        &self.panel
    }

    /// Release the panel lines and delay
    pub fn release(self) -> (PanelPins<SCE, RST, DC, DIN, SCLK>, D) {
        let (sce, dc, din, sclk, delay) = self.bus.release();
        let pins = PanelPins {
            sce,
            rst: self.rst,
            dc,
            din,
            sclk,
        };
        (pins, delay)
    }

    /// Send one extended-set instruction and return to the basic set
    fn send_extended(&mut self, cmd: u8) {
        self.bus
            .send_command(command::function_set(self.powered, true));
        self.bus.send_command(cmd);
        self.bus
            .send_command(command::function_set(self.powered, false));
    }
}

impl<SCE, RST, DC, DIN, SCLK, D> TextDisplay for Pcd8544<SCE, RST, DC, DIN, SCLK, D>
where
    SCE: OutputPin,
    RST: OutputPin,
    DC: OutputPin,
    DIN: OutputPin,
    SCLK: OutputPin,
    D: DelayNs,
{
    fn clear(&mut self) {
        Pcd8544::clear(self);
    }

    fn set_position(&mut self, col: u8, row: u8) {
        Pcd8544::set_position(self, col, row);
    }

    fn home(&mut self) {
        Pcd8544::home(self);
    }

    fn write_char(&mut self, ch: char) -> Result<(), DisplayError> {
        self.write_character(ch)
    }

    fn set_display_on(&mut self, on: bool) {
        if on {
            self.set_display();
        } else {
            self.no_display();
        }
    }

    fn set_inverted(&mut self, inverted: bool) {
        if inverted {
            self.set_inverse();
        } else {
            self.no_inverse();
        }
    }

    fn cursor(&self) -> (u8, u8) {
        Pcd8544::cursor(self)
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLUMNS, BANKS)
    }
}

impl<SCE, RST, DC, DIN, SCLK, D> fmt::Write for Pcd8544<SCE, RST, DC, DIN, SCLK, D>
where
    SCE: OutputPin,
    RST: OutputPin,
    DC: OutputPin,
    DIN: OutputPin,
    SCLK: OutputPin,
    D: DelayNs,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            self.write_character(ch).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcd8544::sim::{self, Frame, Line, SharedBus, SimLine};
    use core::fmt::Write;
    use monodot_core::font::{FIRST_CHAR, LAST_CHAR};
    use monodot_core::traits::TextDisplayExt;
    use monodot_hal::NoDelay;
    use proptest::prelude::*;
    use std::vec::Vec;

    type TestLcd = Pcd8544<SimLine, SimLine, SimLine, SimLine, SimLine, NoDelay>;

    const INIT_COMMANDS: [u8; 6] = [0x21, 0xB9, 0x04, 0x13, 0x20, 0x0C];

    fn setup_with(panel: PanelConfig) -> (SharedBus, TestLcd) {
        let shared = sim::new_bus();
        let lcd = Pcd8544::new(sim::pins(&shared), NoDelay, panel, BusTiming::default());
        (shared, lcd)
    }

    /// Initialized panel with an empty bus log
    fn setup() -> (SharedBus, TestLcd) {
        let (shared, lcd) = setup_with(PanelConfig::default());
        shared.borrow_mut().clear_log();
        (shared, lcd)
    }

    fn glyph_frames(ch: char) -> Vec<Frame> {
        font::glyph(ch)
            .unwrap()
            .iter()
            .chain(core::iter::once(&0u8))
            .map(|&byte| Frame { data: true, byte })
            .collect()
    }

    #[test]
    fn test_init_sequence() {
        let (shared, lcd) = setup_with(PanelConfig::default());
        let state = shared.borrow();

        assert_eq!(state.resets, 1);
        assert!(state.level(Line::Rst), "reset released");

        // Init commands, full-frame clear, home
        let commands: Vec<Frame> = INIT_COMMANDS
            .iter()
            .map(|&byte| Frame { data: false, byte })
            .collect();
        assert_eq!(state.frames[..6], commands[..]);
        assert!(state.frames[6..6 + FRAME_BYTES]
            .iter()
            .all(|f| *f == Frame { data: true, byte: 0 }));
        assert_eq!(
            state.frames[6 + FRAME_BYTES..],
            [Frame { data: false, byte: 0x80 }, Frame { data: false, byte: 0x40 }]
        );
        assert_eq!(state.frames.len(), 6 + FRAME_BYTES + 2);
        assert_eq!(lcd.cursor(), (0, 0));
    }

    #[test]
    fn test_init_uses_panel_config() {
        let panel = PanelConfig {
            contrast: 0x3F,
            temperature_coefficient: 2,
            bias: 4,
            inverse: true,
        };
        let (shared, _lcd) = setup_with(panel);
        assert_eq!(
            shared.borrow().commands()[..6],
            [0x21, 0xBF, 0x06, 0x14, 0x20, 0x0D]
        );
    }

    #[test]
    fn test_clear_transmits_full_frame() {
        let (shared, mut lcd) = setup();
        lcd.set_position(5, 3);
        shared.borrow_mut().clear_log();

        lcd.clear();

        let state = shared.borrow();
        let data = state.data();
        assert_eq!(data.len(), 84 * 48 / 8);
        assert!(data.iter().all(|&b| b == 0));
        assert_eq!(state.commands(), [0x80, 0x40]);
        assert_eq!(lcd.cursor(), (0, 0));
    }

    #[test]
    fn test_write_character_sends_glyph_and_spacing() {
        let (shared, mut lcd) = setup();
        lcd.write_character('A').unwrap();

        let state = shared.borrow();
        assert_eq!(
            state.data(),
            [0x7E, 0x11, 0x11, 0x11, 0x7E, 0x00]
        );
        assert!(state.commands().is_empty());
        assert_eq!(state.dc_changes_while_selected, 0);
    }

    #[test]
    fn test_newline_moves_to_next_row() {
        let (shared, mut lcd) = setup();
        lcd.set_position(5, 2);
        shared.borrow_mut().clear_log();

        lcd.write_character('\n').unwrap();

        assert_eq!(shared.borrow().commands(), [0x80, 0x43]);
        assert!(shared.borrow().data().is_empty());
        assert_eq!(lcd.cursor(), (0, 3));
    }

    #[test]
    fn test_carriage_return_stays_on_row() {
        let (shared, mut lcd) = setup();
        lcd.set_position(9, 4);
        lcd.write_character('x').unwrap();
        shared.borrow_mut().clear_log();

        lcd.write_character('\r').unwrap();

        assert_eq!(shared.borrow().commands(), [0x80, 0x44]);
        assert_eq!(lcd.cursor(), (0, 4));
    }

    #[test]
    fn test_newline_past_bottom_is_not_wrapped() {
        let (shared, mut lcd) = setup();
        lcd.set_position(0, BANKS - 1);
        shared.borrow_mut().clear_log();

        lcd.write_character('\n').unwrap();

        assert_eq!(shared.borrow().commands(), [0x80, 0x40 | BANKS]);
        assert_eq!(lcd.cursor(), (0, BANKS));
    }

    #[test]
    fn test_home() {
        let (shared, mut lcd) = setup();
        lcd.set_position(3, 4);
        shared.borrow_mut().clear_log();

        lcd.home();

        assert_eq!(shared.borrow().commands(), [0x80, 0x44]);
    }

    #[test]
    fn test_unsupported_character_sends_nothing() {
        let (shared, mut lcd) = setup();

        assert_eq!(
            lcd.write_character('\u{00E9}'),
            Err(DisplayError::UnsupportedCharacter('\u{00E9}'))
        );
        assert_eq!(
            lcd.write_character('\t'),
            Err(DisplayError::UnsupportedCharacter('\t'))
        );
        assert!(shared.borrow().frames.is_empty());
        assert_eq!(lcd.cursor(), (0, 0));
    }

    #[test]
    fn test_cursor_follows_controller_wrap() {
        let (shared, mut lcd) = setup();
        for _ in 0..COLUMNS {
            lcd.write_character('#').unwrap();
        }
        assert_eq!(lcd.cursor(), (0, 1));
        // No address commands while the controller auto-increments
        assert!(shared.borrow().commands().is_empty());
    }

    #[test]
    fn test_newline_after_full_row_uses_positioned_row() {
        let (shared, mut lcd) = setup();
        for _ in 0..COLUMNS {
            lcd.write_character('#').unwrap();
        }

        lcd.write_character('\n').unwrap();

        assert_eq!(shared.borrow().commands(), [0x80, 0x41]);
        assert_eq!(lcd.cursor(), (0, 1));
    }

    #[test]
    fn test_home_after_full_row_returns_to_positioned_row() {
        let (shared, mut lcd) = setup();
        lcd.set_position(0, 3);
        for _ in 0..COLUMNS {
            lcd.write_character('#').unwrap();
        }
        shared.borrow_mut().clear_log();

        lcd.write_character('\r').unwrap();
        lcd.home();

        assert_eq!(shared.borrow().commands(), [0x80, 0x43, 0x80, 0x43]);
        assert_eq!(lcd.cursor(), (0, 3));
    }

    #[test]
    fn test_display_on_off() {
        let (shared, mut lcd) = setup();
        lcd.no_display();
        lcd.set_display();
        assert_eq!(shared.borrow().commands(), [0x24, 0x20]);
    }

    #[test]
    fn test_inverse_round_trip_restores_normal_mode() {
        let (shared, mut lcd) = setup();
        lcd.set_inverse();
        lcd.no_inverse();

        let commands = shared.borrow().commands();
        assert_eq!(commands, [0x0D, 0x0C]);
        // Same display-control state the init sequence leaves
        assert_eq!(commands.last(), INIT_COMMANDS.last());
    }

    #[test]
    fn test_set_contrast() {
        let (shared, mut lcd) = setup();
        lcd.set_contrast(0x3C).unwrap();
        assert_eq!(shared.borrow().commands(), [0x21, 0xBC, 0x20]);
        assert_eq!(lcd.panel_config().contrast, 0x3C);
    }

    #[test]
    fn test_set_contrast_keeps_power_down() {
        let (shared, mut lcd) = setup();
        lcd.no_display();
        shared.borrow_mut().clear_log();

        lcd.set_contrast(0x30).unwrap();

        assert_eq!(shared.borrow().commands(), [0x25, 0xB0, 0x24]);
    }

    #[test]
    fn test_extended_setters_validate() {
        let (shared, mut lcd) = setup();
        assert_eq!(
            lcd.set_contrast(0x80),
            Err(ConfigError::ContrastOutOfRange(0x80))
        );
        assert_eq!(
            lcd.set_temperature_coefficient(4),
            Err(ConfigError::TemperatureCoefficientOutOfRange(4))
        );
        assert_eq!(lcd.set_bias(8), Err(ConfigError::BiasOutOfRange(8)));
        assert!(shared.borrow().frames.is_empty());

        lcd.set_temperature_coefficient(1).unwrap();
        lcd.set_bias(2).unwrap();
        assert_eq!(
            shared.borrow().commands(),
            [0x21, 0x05, 0x20, 0x21, 0x12, 0x20]
        );
    }

    #[test]
    fn test_reset_reapplies_changed_settings() {
        let (shared, mut lcd) = setup();
        lcd.set_contrast(0x40).unwrap();
        shared.borrow_mut().clear_log();

        lcd.reset();

        let state = shared.borrow();
        assert_eq!(state.resets, 1);
        assert_eq!(state.commands()[..6], [0x21, 0xC0, 0x04, 0x13, 0x20, 0x0C]);
    }

    #[test]
    fn test_fmt_write() {
        let (shared, mut lcd) = setup();
        write!(lcd, "Hi\n{}", 7).unwrap();

        let state = shared.borrow();
        let mut expected = glyph_frames('H');
        expected.extend(glyph_frames('i'));
        expected.push(Frame { data: false, byte: 0x80 });
        expected.push(Frame { data: false, byte: 0x41 });
        expected.extend(glyph_frames('7'));
        assert_eq!(state.frames, expected);
    }

    #[test]
    fn test_fmt_write_rejects_unsupported() {
        let (_shared, mut lcd) = setup();
        assert!(write!(lcd, "40\u{00B0}C").is_err());
    }

    #[test]
    fn test_text_display_trait() {
        let (shared, mut lcd) = setup();
        assert_eq!(TextDisplay::dimensions(&lcd), (14, 6));

        lcd.print_at(2, 1, "ok").unwrap();
        lcd.set_display_on(false);
        lcd.set_inverted(true);

        let state = shared.borrow();
        assert_eq!(state.commands(), [0x80 | 12, 0x41, 0x24, 0x0D]);
        assert_eq!(state.data().len(), 12);
        drop(state);
        assert_eq!(TextDisplay::cursor(&lcd), (4, 1));
    }

    #[test]
    fn test_release_returns_lines() {
        let (shared, lcd) = setup();
        let (mut pins, _delay) = lcd.release();
        pins.rst.set_low();
        assert!(!shared.borrow().level(Line::Rst));
    }

    proptest! {
        #[test]
        fn prop_printable_character_is_glyph_plus_spacing(code in FIRST_CHAR..=LAST_CHAR) {
            let (shared, mut lcd) = setup();
            let ch = code as char;
            lcd.write_character(ch).unwrap();

            let state = shared.borrow();
            prop_assert_eq!(state.frames.len(), font::GLYPH_WIDTH + GLYPH_SPACING);
            prop_assert_eq!(&state.frames, &glyph_frames(ch));
            prop_assert_eq!(state.dc_changes_while_selected, 0);
            prop_assert_eq!(state.partial_frames, 0);
        }

        #[test]
        fn prop_line_breaks_ignore_column(col in 0..COLUMNS, row in 0..BANKS - 1) {
            let (_shared, mut lcd) = setup();
            lcd.set_position(col, row);
            lcd.write_character('\r').unwrap();
            prop_assert_eq!(lcd.cursor(), (0, row));

            lcd.set_position(col, row);
            lcd.write_character('\n').unwrap();
            prop_assert_eq!(lcd.cursor(), (0, row + 1));
        }
    }
}
