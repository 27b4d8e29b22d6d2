//! Multi-tick control loop scenarios
//!
//! These tests drive the controller the way the transport does: a fresh
//! input frame per tick, many ticks in a row, asserting on the actuator
//! bytes that come back.

use spoke_rover::devices::linescan::LinescanCamera;
use spoke_rover::libraries::motor_curve::NEUTRAL_PWM;
use spoke_rover::platform::mock::{MockAdc, MockGpio, MockTimer};
use spoke_rover::rover::control::{
    AIN_LEFT_LIGHT, AIN_LEFT_PROX, AIN_LIMIT_LOWER, AIN_LIMIT_UPPER, AIN_MIDDLE_PROX,
    AIN_RIGHT_LIGHT, AIN_RIGHT_PROX, CH_ARM, CH_MODE_TOGGLE, CH_THROTTLE, PWM_ARM, PWM_HAND,
    PWM_LEFT_BACK, PWM_LEFT_FRONT, PWM_RIGHT_BACK, PWM_RIGHT_FRONT,
};
use spoke_rover::rover::state::{HAND_CLOSED, HAND_OPEN};
use spoke_rover::rover::{AutoMode, DriveState, RoverController, TickInputs, TickOutputs};

type TestController = RoverController<MockGpio, MockGpio, MockAdc, MockTimer>;

fn controller() -> TestController {
    let camera = LinescanCamera::with_exposure(
        MockGpio::new(),
        MockGpio::new(),
        MockAdc::constant(512),
        MockTimer::new(),
        100,
    );
    RoverController::new(camera)
}

/// Centered sticks, released toggles and limit switches, clear sensors
fn idle_inputs() -> TickInputs {
    let mut inputs = TickInputs::centered();
    inputs.analog[AIN_LEFT_LIGHT] = 390;
    inputs.analog[AIN_RIGHT_LIGHT] = 675;
    inputs.analog[AIN_LEFT_PROX] = 10;
    inputs.analog[AIN_MIDDLE_PROX] = 10;
    inputs.analog[AIN_RIGHT_PROX] = 10;
    inputs.analog[AIN_LIMIT_LOWER] = 800;
    inputs.analog[AIN_LIMIT_UPPER] = 300;
    inputs
}

/// Hold the mode toggle low until the debouncer cycles one mode backward,
/// then release it through the neutral band
fn cycle_backward(rover: &mut TestController) {
    let mut held = idle_inputs();
    held.channels[CH_MODE_TOGGLE] = 10;
    for _ in 0..5 {
        rover.tick(&held);
    }
    rover.tick(&idle_inputs());
}

/// Step backward from Manual into ArmSequence (via WallClimb), counting
/// the arbitration ticks the entry path itself consumes
fn enter_arm_sequence(rover: &mut TestController) -> u16 {
    cycle_backward(rover);
    assert_eq!(rover.state.auto_mode, AutoMode::WallClimb);
    cycle_backward(rover);
    assert_eq!(rover.state.auto_mode, AutoMode::ArmSequence);
    // The edge tick and the release tick each ran one lowering pass
    rover.state.arm_count
}

#[test]
fn startup_tick_is_fully_neutral() {
    let mut rover = controller();
    let outputs = rover.tick(&idle_inputs());
    assert_eq!(outputs, TickOutputs::neutral());
    assert_eq!(rover.state.auto_mode, AutoMode::Manual);
}

#[test]
fn arm_sequence_holds_for_its_full_period_then_releases_to_manual() {
    let mut rover = controller();
    let remaining = enter_arm_sequence(&mut rover);
    assert_eq!(remaining, 248);

    // Every remaining lowering tick keeps the hand closed and the arm down
    let inputs = idle_inputs();
    for _ in 0..remaining {
        let outputs = rover.tick(&inputs);
        assert_eq!(outputs.pwm[PWM_ARM], 0);
        assert_eq!(outputs.pwm[PWM_HAND], HAND_CLOSED);
        assert_eq!(rover.state.auto_mode, AutoMode::ArmSequence);
    }

    // Counter exhausted: hand opens, arm neutral, manual control back
    let outputs = rover.tick(&inputs);
    assert_eq!(outputs.pwm[PWM_ARM], NEUTRAL_PWM);
    assert_eq!(outputs.pwm[PWM_HAND], HAND_OPEN);
    assert_eq!(rover.state.auto_mode, AutoMode::Manual);
}

#[test]
fn arm_sequence_stops_early_when_lower_limit_trips() {
    let mut rover = controller();
    enter_arm_sequence(&mut rover);

    let inputs = idle_inputs();
    for _ in 0..10 {
        rover.tick(&inputs);
    }

    // Arm reaches the mechanical stop long before the period expires.
    // The safety clamp overrides the sequence's lowering command on the
    // same tick the switch trips
    let mut tripped = idle_inputs();
    tripped.analog[AIN_LIMIT_LOWER] = 100;
    let outputs = rover.tick(&tripped);
    assert_eq!(rover.state.arm_count, 0);
    assert_eq!(outputs.pwm[PWM_ARM], NEUTRAL_PWM);

    // One more tick releases; the limit switch also clamps the arm output
    // to neutral from here on
    let outputs = rover.tick(&inputs);
    assert_eq!(rover.state.auto_mode, AutoMode::Manual);
    assert_eq!(outputs.pwm[PWM_ARM], NEUTRAL_PWM);
    assert_eq!(outputs.pwm[PWM_HAND], HAND_OPEN);
}

#[test]
fn wall_climb_burst_commits_for_250_ticks() {
    let mut rover = controller();
    rover.state.auto_mode = AutoMode::WallClimb;

    // Nose against the wall: commit
    let mut against = idle_inputs();
    against.analog[AIN_MIDDLE_PROX] = 450;
    rover.tick(&against);
    assert_eq!(rover.state.drive_state, DriveState::FullPower);
    assert_eq!(rover.state.persistent_turn, 250);

    // For the next 250 ticks the burst holds no matter what the sensors
    // or the operator say
    let mut fighting = idle_inputs();
    fighting.channels[CH_THROTTLE] = 254;
    fighting.analog[AIN_MIDDLE_PROX] = 10;
    for tick in 0..250u16 {
        let outputs = rover.tick(&fighting);
        assert_eq!(rover.state.drive_state, DriveState::FullPower, "tick {tick}");
        assert_eq!(rover.state.persistent_turn, 249 - tick);
        // FullPower 0.8 through divisor 8: left front 148, right front 148
        assert_eq!(outputs.pwm[PWM_LEFT_FRONT], 148);
        assert_eq!(outputs.pwm[PWM_RIGHT_FRONT], 148);
        assert_eq!(outputs.pwm[PWM_LEFT_BACK], 138);
        assert_eq!(outputs.pwm[PWM_RIGHT_BACK], 151);
    }

    // Hold expired: arbitration resumes and believes the sensors again
    rover.tick(&fighting);
    assert_eq!(rover.state.drive_state, DriveState::Straight);
    assert_eq!(rover.state.persistent_turn, 0);
}

#[test]
fn wall_avoid_hands_to_light_follow_which_holds_200_ticks() {
    let mut rover = controller();
    rover.state.auto_mode = AutoMode::WallAvoid;

    // Both sides clear on the first tick: handover with the hold armed
    rover.tick(&idle_inputs());
    assert_eq!(rover.state.auto_mode, AutoMode::LightFollow);
    assert_eq!(rover.state.light_count, 200);

    // Light contact straight ahead during the hold does not drop the arm
    let mut contact = idle_inputs();
    contact.analog[AIN_MIDDLE_PROX] = 200;
    for _ in 0..199 {
        rover.tick(&contact);
        assert_eq!(rover.state.auto_mode, AutoMode::LightFollow);
    }

    // Hold exhausted: the same frame now starts the arm sequence
    rover.tick(&contact);
    assert_eq!(rover.state.auto_mode, AutoMode::ArmSequence);
    assert_eq!(rover.state.arm_count, 250);
}

#[test]
fn manual_drive_follows_the_stick_without_residue() {
    let mut rover = controller();

    // Forward stick in manual: left front wheel leaves neutral
    let mut forward = idle_inputs();
    forward.channels[CH_THROTTLE] = 0;
    let outputs = rover.tick(&forward);
    assert_eq!(outputs.pwm[PWM_LEFT_FRONT], 150);

    // Stick released: straight back to neutral, no residue
    let outputs = rover.tick(&idle_inputs());
    assert_eq!(outputs, TickOutputs::neutral());
}

#[test]
fn arm_zone_commands_are_discarded_during_arm_sequence() {
    let mut rover = controller();
    enter_arm_sequence(&mut rover);

    // Operator commands the arm up mid-sequence; the sequence holds it down
    let mut inputs = idle_inputs();
    inputs.channels[CH_ARM] = 200;
    let outputs = rover.tick(&inputs);
    assert_eq!(outputs.pwm[PWM_ARM], 0);
}

#[test]
fn capture_runs_once_per_tick_and_overwrites_the_scan() {
    let mut rover = controller();
    let inputs = idle_inputs();
    for _ in 0..3 {
        rover.tick(&inputs);
    }
    assert_eq!(rover.last_scan().pixels.len(), 128);
    assert_eq!(rover.last_scan().pixels[0], 512);
    assert_eq!(rover.last_scan().exposure_us, 100);
}
