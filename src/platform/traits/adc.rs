//! ADC interface trait
//!
//! One `AdcInterface` instance represents a single analog channel already
//! routed to a pin (the linescan sensor's data line). The per-tick sensor
//! samples arrive pre-converted from the transport; this trait exists for
//! the one channel the core must sample itself, 128 times per capture.

use crate::platform::Result;

/// ADC interface trait
///
/// Platform implementations wrap their HAL's one-shot conversion for a
/// fixed channel.
pub trait AdcInterface {
    /// Perform one conversion and return the sample.
    ///
    /// Samples are 10-bit right-aligned (0..=1023) on the reference
    /// hardware; implementations with wider converters should scale down.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Adc` if the conversion fails.
    fn sample(&mut self) -> Result<u16>;
}
