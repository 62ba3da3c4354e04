//! PCD8544 instruction encodings
//!
//! Every instruction is one byte sent with D/C low. Instructions other than
//! function set, X and Y address are only valid in one of the two
//! instruction sets, selected by the H bit of function set.

/// Function set: `0 0 1 0 0 PD V H`
pub const FUNCTION_SET: u8 = 0x20;
/// Function set flag: chip is powered down
pub const POWER_DOWN: u8 = 0x04;
/// Function set flag: extended instruction set
pub const EXTENDED: u8 = 0x01;

/// Display control (basic set): `0 0 0 0 1 D 0 E`
pub const DISPLAY_CONTROL: u8 = 0x08;
/// Display control: normal video
pub const DISPLAY_NORMAL: u8 = DISPLAY_CONTROL | 0x04;
/// Display control: inverse video
pub const DISPLAY_INVERSE: u8 = DISPLAY_CONTROL | 0x05;

/// Set Y (bank) address (basic set): `0 1 0 0 0 Y2 Y1 Y0`
pub const SET_Y_ADDRESS: u8 = 0x40;
/// Set X (column) address (basic set): `1 X6 .. X0`
pub const SET_X_ADDRESS: u8 = 0x80;

/// Temperature control (extended set): `0 0 0 0 0 1 TC1 TC0`
pub const TEMPERATURE_CONTROL: u8 = 0x04;
/// Bias system (extended set): `0 0 0 1 0 BS2 BS1 BS0`
pub const BIAS_SYSTEM: u8 = 0x10;
/// Set Vop (extended set): `1 Vop6 .. Vop0`
pub const SET_VOP: u8 = 0x80;

/// Function set byte for a power state and instruction set
pub const fn function_set(powered: bool, extended: bool) -> u8 {
    let mut value = FUNCTION_SET;
    if !powered {
        value |= POWER_DOWN;
    }
    if extended {
        value |= EXTENDED;
    }
    value
}

/// Display control byte for a video polarity
pub const fn display_mode(inverse: bool) -> u8 {
    if inverse {
        DISPLAY_INVERSE
    } else {
        DISPLAY_NORMAL
    }
}

/// Set X address to a pixel column (7 bits)
pub const fn set_x(pixel_col: u8) -> u8 {
    SET_X_ADDRESS | (pixel_col & 0x7F)
}

/// Set Y address to a bank (3 bits)
pub const fn set_y(bank: u8) -> u8 {
    SET_Y_ADDRESS | (bank & 0x07)
}

/// Set operating voltage (contrast, 7 bits)
pub const fn set_vop(contrast: u8) -> u8 {
    SET_VOP | (contrast & 0x7F)
}

/// Temperature coefficient (2 bits)
pub const fn temperature_control(coefficient: u8) -> u8 {
    TEMPERATURE_CONTROL | (coefficient & 0x03)
}

/// Bias system (3 bits)
pub const fn bias_system(bias: u8) -> u8 {
    BIAS_SYSTEM | (bias & 0x07)
}
