//! GPIO interface trait
//!
//! The control core drives exactly two digital output latches: the linescan
//! sensor's clock and sync lines, toggled in timed sequences during capture.
//!
//! # Safety Invariants
//!
//! - GPIO pin must be initialized (and configured as an output for the
//!   latch pins) before being handed to this crate
//! - Only one owner per GPIO pin instance
//! - No concurrent access to the same pin from multiple contexts

use crate::platform::Result;

/// GPIO interface trait
///
/// Platform implementations must provide this interface for the digital
/// lines injected into [`crate::devices::linescan::LinescanCamera`].
pub trait GpioInterface {
    /// Set pin high (logic level 1)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::NotOutput)` if the pin is
    /// not configured as an output.
    fn set_high(&mut self) -> Result<()>;

    /// Set pin low (logic level 0)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::NotOutput)` if the pin is
    /// not configured as an output.
    fn set_low(&mut self) -> Result<()>;

    /// Read the current pin state
    ///
    /// Returns `true` if the pin is high, `false` if low. For output pins
    /// this reads back the driven level.
    fn read(&self) -> bool;
}
