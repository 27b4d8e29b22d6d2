#![cfg_attr(not(test), no_std)]

//! spoke_rover - Tick-driven control core for a 4WD spoke-wheel rover
//!
//! This library turns raw receiver and sensor samples into actuator command
//! bytes once per tick, arbitrating between joystick control and a small
//! library of autonomous behaviors (light seeking, wall avoidance, line
//! tracking, a timed arm sequence, and a wall climb maneuver). It also owns
//! the bit-banged capture protocol for the 128-pixel linescan sensor.
//!
//! The external transport drives the loop: it refreshes [`rover::TickInputs`]
//! and calls [`rover::RoverController::tick`] roughly every 17 ms, then ships
//! the returned [`rover::TickOutputs`] back to the master controller. Link
//! framing, pin bring-up, and the master handshake live outside this crate.

// Platform abstraction layer (injected hardware capabilities + mocks)
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Core systems (logging macros)
pub mod core;

// Reusable control libraries (channel mixing, debounce, calibration)
pub mod libraries;

// Vehicle logic (drive states, autonomous arbitration, the tick loop)
pub mod rover;
