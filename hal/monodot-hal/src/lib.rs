//! Monodot Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware capabilities the Monodot
//! drivers need: digital lines and a monotonic millisecond clock. Protocol
//! logic is written against these traits so it can be exercised on the host
//! against simulated lines.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  monodot-drivers (PCD8544, button, ...) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monodot-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  test doubles │
//! │  chip HALs    │       │   (host)      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`time::Clock`] - Monotonic millisecond time source
//!
//! [`adapter`] wraps any `embedded-hal` 1.0 pin with an infallible error
//! type so chip HALs plug in directly.

#![no_std]
#![deny(unsafe_code)]

pub mod adapter;
pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use adapter::{EhInput, EhOutput, NoDelay};
pub use gpio::{InputPin, Level, OutputPin};
pub use time::{Clock, Millis};
