//! Timer interface trait
//!
//! Blocking microsecond delays and a monotonic clock. The capture protocol
//! busy-waits through these delays, so a tick blocks for the full capture
//! duration; implementations must not yield to other tasks mid-delay.

use crate::platform::Result;

/// Timer interface trait
pub trait TimerInterface {
    /// Block for the given number of microseconds.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay cannot be programmed.
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Block for the given number of milliseconds.
    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    /// Current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Current time in milliseconds since system start.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
