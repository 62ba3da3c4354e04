//! Board-agnostic core logic for Monodot
//!
//! This crate contains everything that does not touch a line or a clock:
//!
//! - The 5x8 glyph table for printable ASCII
//! - Device traits (text display, push button, power switch)
//! - Configuration type definitions and the config file parser

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod font;
pub mod traits;
