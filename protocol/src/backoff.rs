//! Reconnect delay schedule for the chat WebSocket.
//!
//! The delay starts at [`INITIAL_DELAY_MS`], grows by a factor of 1.5 after
//! every failed or closed connection, and never exceeds [`MAX_DELAY_MS`]. A
//! successful connection resets it.

#[cfg(test)]
#[path = "backoff_test.rs"]
mod backoff_test;

use std::time::Duration;

/// First reconnect delay, in milliseconds.
pub const INITIAL_DELAY_MS: u64 = 1_000;
/// Upper bound on the reconnect delay, in milliseconds.
pub const MAX_DELAY_MS: u64 = 30_000;

/// Exponential reconnect backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    delay_ms: u64,
}

impl Default for Backoff {
    fn default() -> Self {
        Self { delay_ms: INITIAL_DELAY_MS }
    }
}

impl Backoff {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay that the next call to [`Backoff::next_delay`] will return.
    #[must_use]
    pub fn current(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Return the delay to wait before the next attempt, then grow it.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.delay_ms;
        self.delay_ms = (delay.saturating_mul(3) / 2).min(MAX_DELAY_MS);
        Duration::from_millis(delay)
    }

    /// Back to the initial delay after a successful connection.
    pub fn reset(&mut self) {
        self.delay_ms = INITIAL_DELAY_MS;
    }
}
