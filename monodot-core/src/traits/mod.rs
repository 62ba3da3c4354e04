//! Device traits
//!
//! These traits define the interface between application code and the
//! driver implementations in `monodot-drivers`.

pub mod display;
pub mod input;
pub mod power;

pub use display::{DisplayError, TextDisplay, TextDisplayExt};
pub use input::{Press, PushButton, DEFAULT_LONG_PRESS_MS};
pub use power::PowerSwitch;
