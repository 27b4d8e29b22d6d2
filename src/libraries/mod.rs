//! Reusable control libraries
//!
//! Pure, hardware-free building blocks of the control loop: receiver
//! channel mixing, toggle debouncing, per-wheel motor calibration, and
//! sensor normalization.

pub mod motor_curve;
pub mod rc_channel;
pub mod sensor_channel;
pub mod switch_debounce;

// Re-export commonly used types
pub use motor_curve::MotorCurve;
pub use rc_channel::DriveCommand;
pub use sensor_channel::SensorRange;
pub use switch_debounce::{ToggleEdge, ToggleSwitch};
