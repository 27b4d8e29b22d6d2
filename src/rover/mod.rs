//! Rover vehicle logic
//!
//! This module contains the vehicle-specific control core: the drive state
//! table, the autonomous arbitration machine, the process-wide control
//! state record, and the per-tick orchestrator invoked by the external
//! transport.
//!
//! ## Modules
//!
//! - `drive`: Drive states and their wheel command table
//! - `mode`: Autonomous modes and per-tick arbitration
//! - `state`: The control state record that persists across ticks
//! - `control`: The tick orchestrator

pub mod control;
pub mod drive;
pub mod mode;
pub mod state;

// Re-export commonly used types
pub use control::{RoverController, TickInputs, TickOutputs};
pub use drive::DriveState;
pub use mode::AutoMode;
pub use state::ControlState;
