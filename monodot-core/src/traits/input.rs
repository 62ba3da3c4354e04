//! Push button trait

/// Default hold time (ms) above which a press counts as long
pub const DEFAULT_LONG_PRESS_MS: u32 = 500;

/// Result of polling a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    /// Nothing to report
    #[default]
    None,
    /// Released before the long-press threshold
    Short,
    /// Released after the long-press threshold
    Long,
}

/// Poll-driven momentary switch
///
/// A press is reported once, on the first poll that sees the release.
pub trait PushButton {
    /// Poll the switch, classifying a completed press against
    /// `long_press_ms`
    fn poll(&mut self, long_press_ms: u32) -> Press;

    /// Poll with the default long-press threshold
    fn poll_default(&mut self) -> Press {
        self.poll(DEFAULT_LONG_PRESS_MS)
    }
}
