//! Monotonic time source
//!
//! Stateful drivers (button debouncing, power timers) read the time on each
//! poll instead of relying on a global tick, so tests can drive them with a
//! fake clock.

/// Milliseconds on a free-running, wrapping counter
pub type Millis = u32;

/// Monotonic millisecond clock
///
/// The counter is allowed to wrap; consumers compare instants with
/// [`Clock::elapsed_since`], which uses wrapping arithmetic.
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> Millis;

    /// Milliseconds elapsed since `start`
    fn elapsed_since(&self, start: Millis) -> Millis {
        self.now_ms().wrapping_sub(start)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FakeClock {
        now: Cell<Millis>,
    }

    impl Clock for FakeClock {
        fn now_ms(&self) -> Millis {
            self.now.get()
        }
    }

    #[test]
    fn test_elapsed_since() {
        let clock = FakeClock { now: Cell::new(1_000) };
        assert_eq!(clock.elapsed_since(400), 600);
    }

    #[test]
    fn test_elapsed_across_wrap() {
        let clock = FakeClock { now: Cell::new(50) };
        // Started 100ms before the counter wrapped
        assert_eq!(clock.elapsed_since(Millis::MAX - 49), 100);
    }

    #[test]
    fn test_reference_is_a_clock() {
        fn read<C: Clock>(clock: C) -> Millis {
            clock.now_ms()
        }

        let clock = FakeClock { now: Cell::new(7) };
        assert_eq!(read(&clock), 7);
        clock.now.set(9);
        assert_eq!(read(&clock), 9);
    }
}
