//! Platform abstraction layer
//!
//! This module provides the hardware capabilities the control core needs
//! injected: the clock/sync latches and analog data line of the linescan
//! sensor, and a microsecond timer for its busy-wait delays. Platform
//! implementations live outside this crate; only the trait layer and the
//! test mocks are defined here.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{AdcInterface, GpioInterface, TimerInterface};
