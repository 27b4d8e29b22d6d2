//! Autonomous modes and arbitration
//!
//! One arbitration pass runs per tick (unless a persistent-turn hold is
//! active) and owns every mode transition. Each behavior reads the tick's
//! sensor frame, selects a drive state, and may hand control to another
//! mode or arm one of the long-lived counters. Manual mode selects
//! nothing; the manual pipeline's command stands.
//!
//! The operator can also cycle modes directly with the mode toggle; that
//! path goes through [`cycle_mode`], which applies the same entry effects
//! as an autonomous handover.

use crate::libraries::motor_curve::NEUTRAL_PWM;
use crate::libraries::sensor_channel::{
    differential, LIGHT_LEFT, LIGHT_RIGHT, PROX_LEFT, PROX_RIGHT,
};
use crate::libraries::ToggleEdge;
use crate::rover::drive::DriveState;
use crate::rover::state::{
    ControlState, ARM_SEQUENCE_TICKS, HAND_CLOSED, HAND_OPEN, LIGHT_HOLD_TICKS,
    PERSISTENT_TURN_TICKS,
};

/// Raw light reading above which a sensor counts as seeing nothing
const LIGHT_SATURATED: u16 = 960;

/// Light differential that triggers a corrective turn
const LIGHT_TURN_DIFF: f32 = 0.33;

/// Proximity differential that triggers a right turn in WallAvoid
const PROX_RIGHT_DIFF: f32 = 0.3;

/// Proximity differential that triggers a left turn in WallAvoid
const PROX_LEFT_DIFF: f32 = -0.35;

/// Middle proximity above which WallAvoid forces a hard turn
const WALL_NEAR_PROX: u16 = 70;

/// Middle proximity above which LightFollow stops and drops the arm
const ARM_DROP_PROX: u16 = 170;

/// Both side proximities below this end WallAvoid
const SIDES_CLEAR_PROX: u16 = 50;

/// Middle proximity that engages the climb (and ends LineTrack)
const CLIMB_ENGAGE_PROX: u16 = 150;

/// Middle proximity that commits the full-power burst
const CLIMB_BURST_PROX: u16 = 400;

/// Side proximity above which a finished climb hands back to WallAvoid
const CLIMB_EXIT_PROX: u16 = 15;

/// Lower limit switch raw reading below which the arm is at its stop
pub const LOWER_LIMIT_TRIP: u16 = 500;

/// Upper limit switch raw reading above which the arm is at its stop
pub const UPPER_LIMIT_TRIP: u16 = 500;

/// Autonomous operating modes, cycled in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoMode {
    #[default]
    Manual,
    LightFollow,
    WallAvoid,
    LineTrack,
    ArmSequence,
    WallClimb,
}

impl AutoMode {
    /// Next mode, wrapping from WallClimb back to Manual
    pub fn next(self) -> Self {
        match self {
            Self::Manual => Self::LightFollow,
            Self::LightFollow => Self::WallAvoid,
            Self::WallAvoid => Self::LineTrack,
            Self::LineTrack => Self::ArmSequence,
            Self::ArmSequence => Self::WallClimb,
            Self::WallClimb => Self::Manual,
        }
    }

    /// Previous mode, wrapping from Manual back to WallClimb
    pub fn prev(self) -> Self {
        match self {
            Self::Manual => Self::WallClimb,
            Self::LightFollow => Self::Manual,
            Self::WallAvoid => Self::LightFollow,
            Self::LineTrack => Self::WallAvoid,
            Self::ArmSequence => Self::LineTrack,
            Self::WallClimb => Self::ArmSequence,
        }
    }

    /// Mode name for logging and telemetry
    pub fn name(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::LightFollow => "LightFollow",
            Self::WallAvoid => "WallAvoid",
            Self::LineTrack => "LineTrack",
            Self::ArmSequence => "ArmSequence",
            Self::WallClimb => "WallClimb",
        }
    }
}

/// One tick's sensor readings, raw plus derived differentials
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorFrame {
    pub left_light: u16,
    pub right_light: u16,
    pub left_prox: u16,
    pub middle_prox: u16,
    pub right_prox: u16,
    pub limit_lower: u16,
    pub limit_upper: u16,
    /// Normalized left light minus normalized right light
    pub diff_light: f32,
    /// Normalized left proximity minus normalized right proximity
    pub diff_prox: f32,
}

impl SensorFrame {
    /// Build a frame from raw samples, deriving the differentials
    pub fn from_raw(
        left_light: u16,
        right_light: u16,
        left_prox: u16,
        middle_prox: u16,
        right_prox: u16,
        limit_lower: u16,
        limit_upper: u16,
    ) -> Self {
        Self {
            left_light,
            right_light,
            left_prox,
            middle_prox,
            right_prox,
            limit_lower,
            limit_upper,
            diff_light: differential(LIGHT_LEFT, left_light, LIGHT_RIGHT, right_light),
            diff_prox: differential(PROX_LEFT, left_prox, PROX_RIGHT, right_prox),
        }
    }
}

/// Cycle the autonomous mode from a debounced toggle edge.
///
/// Low edges step backward, high edges forward, both with wraparound.
/// Entering ArmSequence arms its counter; entering LightFollow clears the
/// light-search hold.
pub fn cycle_mode(state: &mut ControlState, edge: ToggleEdge) {
    state.auto_mode = match edge {
        ToggleEdge::Low => state.auto_mode.prev(),
        ToggleEdge::High => state.auto_mode.next(),
    };

    match state.auto_mode {
        AutoMode::ArmSequence => state.arm_count = ARM_SEQUENCE_TICKS,
        AutoMode::LightFollow => state.light_count = 0,
        _ => {}
    }
}

/// Run one arbitration pass.
///
/// Callers must not invoke this while a persistent-turn hold is active;
/// the hold freezes arbitration entirely and re-applies the committed
/// drive state instead.
pub fn arbitrate(state: &mut ControlState, sensors: &SensorFrame) {
    match state.auto_mode {
        AutoMode::Manual => {}
        AutoMode::LightFollow => light_follow(state, sensors),
        AutoMode::WallAvoid => wall_avoid(state, sensors),
        AutoMode::LineTrack => line_track(state, sensors),
        AutoMode::ArmSequence => arm_sequence(state, sensors),
        AutoMode::WallClimb => wall_climb(state, sensors),
    }
}

/// Steer toward the light source; stop and drop the arm on contact.
fn light_follow(state: &mut ControlState, sensors: &SensorFrame) {
    if state.light_count > 0 {
        state.light_count -= 1;
    }

    state.drive_state = if sensors.left_light > LIGHT_SATURATED
        && sensors.right_light > LIGHT_SATURATED
    {
        // Neither eye sees the source: spin until one does
        DriveState::TurnLeft
    } else if sensors.diff_light > LIGHT_TURN_DIFF {
        DriveState::TurnRight
    } else if sensors.diff_light < -LIGHT_TURN_DIFF {
        DriveState::TurnLeft
    } else {
        DriveState::Straight
    };

    // Contact with the target, and the post-handover hold has run out
    if sensors.middle_prox > ARM_DROP_PROX && state.light_count == 0 {
        state.drive_state = DriveState::Stop;
        state.arm_count = ARM_SEQUENCE_TICKS;
        state.auto_mode = AutoMode::ArmSequence;
    }
}

/// Steer away from whichever side reads closer; hand over to LightFollow
/// once both sides are clear.
fn wall_avoid(state: &mut ControlState, sensors: &SensorFrame) {
    state.drive_state = if sensors.diff_prox > PROX_RIGHT_DIFF {
        DriveState::TurnRight
    } else if sensors.diff_prox < PROX_LEFT_DIFF {
        DriveState::TurnLeft
    } else {
        DriveState::Straight
    };

    if sensors.middle_prox > WALL_NEAR_PROX {
        // Head-on wall: turn toward the clearer side regardless
        state.drive_state = if sensors.diff_prox > 0.0 {
            DriveState::TurnRight
        } else {
            DriveState::TurnLeft
        };
    }

    if sensors.left_prox < SIDES_CLEAR_PROX && sensors.right_prox < SIDES_CLEAR_PROX {
        state.auto_mode = AutoMode::LightFollow;
        state.light_count = LIGHT_HOLD_TICKS;
    }
}

/// Hold position on the line; engage the climb when the wall arrives.
fn line_track(state: &mut ControlState, sensors: &SensorFrame) {
    state.drive_state = DriveState::Stop;

    if sensors.middle_prox > CLIMB_ENGAGE_PROX {
        state.auto_mode = AutoMode::WallClimb;
    }
}

/// Timed arm drop: hand closed and arm down while the counter runs, then
/// release and return to manual. The lower limit switch short-circuits
/// the countdown the tick it trips.
fn arm_sequence(state: &mut ControlState, sensors: &SensorFrame) {
    if state.arm_count > 0 {
        state.hand_pwm = HAND_CLOSED;
        state.arm_pwm = 0;
        state.arm_count -= 1;
    } else {
        state.hand_pwm = HAND_OPEN;
        state.arm_pwm = NEUTRAL_PWM;
        state.auto_mode = AutoMode::Manual;
    }

    if sensors.limit_lower < LOWER_LIMIT_TRIP {
        state.arm_count = 0;
    }

    state.drive_state = DriveState::Stop;
}

/// Approach, mount, and power over the wall, front wheels first.
fn wall_climb(state: &mut ControlState, sensors: &SensorFrame) {
    if sensors.middle_prox < CLIMB_ENGAGE_PROX {
        state.drive_state = DriveState::Straight;
        if sensors.left_prox > CLIMB_EXIT_PROX || sensors.right_prox > CLIMB_EXIT_PROX {
            // Over and clear of the wall
            state.auto_mode = AutoMode::WallAvoid;
        }
    } else if sensors.middle_prox > CLIMB_BURST_PROX {
        // Nose against the wall: commit to the burst regardless of what
        // the sensors say next
        state.drive_state = DriveState::FullPower;
        state.persistent_turn = PERSISTENT_TURN_TICKS;
    } else {
        state.drive_state = DriveState::SlowStraight;
    }
}
