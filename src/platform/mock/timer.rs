//! Mock Timer implementation for testing

use crate::platform::{traits::TimerInterface, Result};

/// Mock Timer implementation
///
/// Advances a simulated clock on every delay instead of blocking, so tests
/// of the capture protocol can assert measured durations deterministically.
#[derive(Debug, Default)]
pub struct MockTimer {
    current_us: u64,
}

impl MockTimer {
    /// Create a new mock timer starting at time 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the simulated clock without a delay call
    pub fn advance(&mut self, us: u64) {
        self.current_us = self.current_us.wrapping_add(us);
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.current_us = self.current_us.wrapping_add(us as u64);
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.current_us
    }
}
