//! Toggle switch debouncing
//!
//! The transmitter exposes two spring-loaded toggles as ordinary receiver
//! channels: deflecting one drives the channel toward an end of the byte
//! range, releasing it returns the channel to the neutral band. This module
//! debounces those channels into discrete edges.
//!
//! A single counter per channel increments while the channel is past either
//! threshold and resets inside the neutral band. The edge fires exactly on
//! the tick the counter reaches [`DEBOUNCE_TICKS`], so a held deflection
//! fires once and stays silent until the toggle passes back through
//! neutral. Counters that somehow run past the guard value reset to zero.

/// Consecutive qualifying ticks required before an edge fires
pub const DEBOUNCE_TICKS: u16 = 5;

/// Counter ceiling; anything above this resets to zero
const COUNTER_GUARD: u16 = 100;

/// Channel value below which the toggle reads as deflected low
pub const LOW_THRESHOLD: u8 = 100;

/// Channel value above which the toggle reads as deflected high
pub const HIGH_THRESHOLD: u8 = 154;

/// Debounced toggle edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToggleEdge {
    /// Channel held below the low threshold for the debounce window
    Low,
    /// Channel held above the high threshold for the debounce window
    High,
}

/// Debounce state for one toggle channel
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleSwitch {
    count: u16,
}

impl ToggleSwitch {
    /// Create a toggle with a zeroed counter
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Feed one raw channel sample; returns the edge that fired, if any.
    pub fn update(&mut self, raw: u8) -> Option<ToggleEdge> {
        if self.count > COUNTER_GUARD {
            self.count = 0;
        }

        if raw < LOW_THRESHOLD {
            self.count += 1;
            if self.count == DEBOUNCE_TICKS {
                return Some(ToggleEdge::Low);
            }
        } else if raw > HIGH_THRESHOLD {
            self.count += 1;
            if self.count == DEBOUNCE_TICKS {
                return Some(ToggleEdge::High);
            }
        } else {
            self.count = 0;
        }
        None
    }

    /// Current counter value (test observability)
    pub fn count(&self) -> u16 {
        self.count
    }
}
