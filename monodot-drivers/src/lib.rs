//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in monodot-core:
//!
//! - PCD8544 dot-matrix panel over a bit-banged serial bus
//! - Debounced push button with short/long press classification
//! - Power line with polarity inversion and a one-shot revert timer

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod button;
pub mod pcd8544;
pub mod power;

pub use button::Button;
pub use pcd8544::{Pcd8544, PanelPins};
pub use power::PowerLine;
