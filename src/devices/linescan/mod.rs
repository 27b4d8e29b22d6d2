//! Linescan sensor capture
//!
//! Bit-banged readout of a 128-pixel linear image sensor over three
//! injected lines: a clock latch, a sync (SI) latch, and the analog data
//! channel. The protocol is synchronous and blocks for its full duration
//! (the exposure hold plus 128 settle-and-sample cycles), so the capture
//! must fit inside the transport's tick period.
//!
//! ## Protocol
//!
//! 1. Pulse sync while pulsing the clock once: opens the exposure window.
//!    The start timestamp is latched here.
//! 2. Toggle the clock 128 times to prime the sensor's internal shift
//!    register.
//! 3. Hold for the configured exposure time.
//! 4. Pulse sync/clock again: closes the window. The measured (not the
//!    configured) duration is what the scan reports.
//! 5. For each of the 128 pixels: settle, sample the analog line, clock
//!    once to shift the next pixel out.
//!
//! A malformed read is not detectable at this layer; there are no retries.

use crate::platform::{AdcInterface, GpioInterface, Result, TimerInterface};

/// Pixels per scan, fixed by the sensor's shift register length
pub const SCAN_PIXELS: usize = 128;

/// Settle time before each pixel sample, microseconds
const SETTLE_US: u32 = 20;

/// Default exposure hold, microseconds
pub const DEFAULT_EXPOSURE_US: u32 = 1000;

/// One complete intensity scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineScan {
    /// Intensity samples in pixel order
    pub pixels: [u16; SCAN_PIXELS],
    /// Measured exposure duration, microseconds
    pub exposure_us: u32,
}

impl LineScan {
    /// All-dark scan with zero exposure
    pub const fn empty() -> Self {
        Self {
            pixels: [0; SCAN_PIXELS],
            exposure_us: 0,
        }
    }

    /// Center pixel intensity, the value reported on the diagnostic line
    pub fn center(&self) -> u16 {
        self.pixels[SCAN_PIXELS / 2]
    }

    /// Render the per-capture diagnostic line
    pub fn diagnostic(&self) -> heapless::String<48> {
        let mut line = heapless::String::new();
        let _ = core::fmt::write(
            &mut line,
            format_args!("linescan center={} exposure={}us", self.center(), self.exposure_us),
        );
        line
    }
}

impl Default for LineScan {
    fn default() -> Self {
        Self::empty()
    }
}

/// Linescan sensor driver over injected clock/sync/data capabilities
#[derive(Debug)]
pub struct LinescanCamera<CLK, SI, ADC, T> {
    clock: CLK,
    sync: SI,
    data: ADC,
    timer: T,
    exposure_us: u32,
}

impl<CLK, SI, ADC, T> LinescanCamera<CLK, SI, ADC, T>
where
    CLK: GpioInterface,
    SI: GpioInterface,
    ADC: AdcInterface,
    T: TimerInterface,
{
    /// Create a driver with the default exposure hold
    pub fn new(clock: CLK, sync: SI, data: ADC, timer: T) -> Self {
        Self::with_exposure(clock, sync, data, timer, DEFAULT_EXPOSURE_US)
    }

    /// Create a driver with an explicit exposure hold in microseconds
    pub fn with_exposure(clock: CLK, sync: SI, data: ADC, timer: T, exposure_us: u32) -> Self {
        Self {
            clock,
            sync,
            data,
            timer,
            exposure_us,
        }
    }

    /// Configured exposure hold, microseconds
    pub fn exposure_us(&self) -> u32 {
        self.exposure_us
    }

    /// Run one full capture. Blocks for the exposure hold plus the
    /// 128-pixel readout; every call overwrites the whole scan.
    pub fn capture(&mut self) -> Result<LineScan> {
        let mut scan = LineScan::empty();

        // Open the exposure window
        self.clock.set_low()?;
        self.sync.set_high()?;
        self.clock.set_high()?;
        self.sync.set_low()?;
        let start_us = self.timer.now_us();
        self.clock.set_low()?;

        // Prime the shift register
        for _ in 0..SCAN_PIXELS {
            self.clock.set_high()?;
            self.clock.set_low()?;
        }

        self.timer.delay_us(self.exposure_us)?;

        // Close the window; the measured duration is what we report
        self.sync.set_high()?;
        self.clock.set_high()?;
        self.sync.set_low()?;
        scan.exposure_us = self.timer.now_us().saturating_sub(start_us) as u32;
        self.clock.set_low()?;

        // Shift the pixels out
        for pixel in scan.pixels.iter_mut() {
            self.timer.delay_us(SETTLE_US)?;
            *pixel = self.data.sample()?;
            self.clock.set_high()?;
            self.clock.set_low()?;
        }
        self.timer.delay_us(SETTLE_US)?;

        Ok(scan)
    }

    /// Split the driver back into its parts (test observability)
    #[cfg(any(test, feature = "mock"))]
    pub fn into_parts(self) -> (CLK, SI, ADC, T) {
        (self.clock, self.sync, self.data, self.timer)
    }
}
