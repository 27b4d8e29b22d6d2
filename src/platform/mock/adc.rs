//! Mock ADC implementation for testing

use heapless::Vec;

use crate::platform::{traits::AdcInterface, Result};

/// Capacity of the replayed sample sequence (one full linescan)
const SEQUENCE_CAP: usize = 128;

/// Mock ADC implementation
///
/// Replays a fixed sample sequence, wrapping around when exhausted, so a
/// single mock can serve repeated captures deterministically.
#[derive(Debug)]
pub struct MockAdc {
    sequence: Vec<u16, SEQUENCE_CAP>,
    cursor: usize,
    conversions: usize,
}

impl MockAdc {
    /// Create a mock that always reads the same value
    pub fn constant(value: u16) -> Self {
        let mut sequence = Vec::new();
        // Capacity is non-zero, push cannot fail
        let _ = sequence.push(value);
        Self {
            sequence,
            cursor: 0,
            conversions: 0,
        }
    }

    /// Create a mock replaying `samples` in order, wrapping at the end.
    ///
    /// Sequences longer than one scan (128 samples) are truncated.
    pub fn with_samples(samples: &[u16]) -> Self {
        let mut sequence = Vec::new();
        for &s in samples.iter().take(SEQUENCE_CAP) {
            let _ = sequence.push(s);
        }
        if sequence.is_empty() {
            let _ = sequence.push(0);
        }
        Self {
            sequence,
            cursor: 0,
            conversions: 0,
        }
    }

    /// Total conversions performed so far
    pub fn conversions(&self) -> usize {
        self.conversions
    }
}

impl AdcInterface for MockAdc {
    fn sample(&mut self) -> Result<u16> {
        let value = self.sequence[self.cursor];
        self.cursor = (self.cursor + 1) % self.sequence.len();
        self.conversions += 1;
        Ok(value)
    }
}
