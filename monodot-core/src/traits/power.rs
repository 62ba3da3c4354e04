//! Power switch trait

/// Logical on/off output with an optional one-shot revert timer
///
/// Timers are not interrupt driven: [`PowerSwitch::check`] must be called
/// regularly for an expired timer to take effect.
pub trait PowerSwitch {
    /// Switch on; with `Some(ms)`, switch back off once `ms` have elapsed
    fn on(&mut self, duration_ms: Option<u32>);

    /// Switch off; with `Some(ms)`, switch back on once `ms` have elapsed
    fn off(&mut self, duration_ms: Option<u32>);

    /// Flip the current state, cancelling any pending timer
    fn toggle(&mut self);

    /// Apply an expired timer
    ///
    /// Returns true if the state flipped.
    fn check(&mut self) -> bool;

    /// Check if the output is logically on
    fn is_on(&self) -> bool;
}
