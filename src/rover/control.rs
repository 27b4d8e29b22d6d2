//! Per-tick control orchestrator
//!
//! The external transport calls [`RoverController::tick`] once per ~17 ms
//! frame with fresh receiver and sensor samples and ships the returned
//! actuator bytes back to the master controller. Stage order inside a tick
//! is load-bearing: later stages intentionally overwrite earlier ones.
//!
//! 1. Manual drive command from the stick channels
//! 2. Manual arm command from the arm channel zones
//! 3. Debounced toggle edges (mode cycling, hand open/close)
//! 4. Sensor frame + linescan capture (capture is independent of the
//!    drive pipeline and blocks for its full protocol duration)
//! 5. Persistent-turn hold, or autonomous arbitration; autonomous
//!    decisions always overwrite the manual drive command
//! 6. Limit-switch safety clamp on the arm
//! 7. Per-wheel calibration to actuator bytes

use crate::devices::linescan::{LineScan, LinescanCamera};
use crate::libraries::motor_curve::{
    LEFT_BACK, LEFT_FRONT, NEUTRAL_PWM, RIGHT_BACK, RIGHT_FRONT,
};
use crate::libraries::rc_channel::{arm_zone, mix_drive, CHANNEL_CENTER};
use crate::libraries::ToggleEdge;
use crate::platform::{AdcInterface, GpioInterface, TimerInterface};
use crate::rover::mode::{self, AutoMode, SensorFrame, LOWER_LIMIT_TRIP, UPPER_LIMIT_TRIP};
use crate::rover::state::{ControlState, HAND_CLOSED, HAND_OPEN};

// Receiver channel slots
pub const CH_STEER: usize = 0;
pub const CH_THROTTLE: usize = 1;
pub const CH_ARM: usize = 2;
pub const CH_SPARE: usize = 3;
pub const CH_MODE_TOGGLE: usize = 4;
pub const CH_HAND_TOGGLE: usize = 5;

// Analog input slots
pub const AIN_RIGHT_LIGHT: usize = 0;
pub const AIN_LEFT_LIGHT: usize = 1;
pub const AIN_LIMIT_UPPER: usize = 2;
pub const AIN_LIMIT_LOWER: usize = 3;
pub const AIN_RIGHT_PROX: usize = 4;
pub const AIN_LEFT_PROX: usize = 5;
pub const AIN_MIDDLE_PROX: usize = 6;
pub const AIN_LINESCAN: usize = 7;

// Actuator output slots
pub const PWM_RESERVED_A: usize = 0;
pub const PWM_ARM: usize = 1;
pub const PWM_RIGHT_FRONT: usize = 2;
pub const PWM_LEFT_FRONT: usize = 3;
pub const PWM_RIGHT_BACK: usize = 4;
pub const PWM_LEFT_BACK: usize = 5;
pub const PWM_HAND: usize = 6;
pub const PWM_RESERVED_B: usize = 7;

/// One tick's raw inputs, refreshed by the transport before each call
#[derive(Debug, Clone, Copy)]
pub struct TickInputs {
    /// Receiver channel bytes, centered at 127
    pub channels: [u8; 6],
    /// Analog sensor samples, 10-bit
    pub analog: [u16; 8],
}

impl TickInputs {
    /// Centered sticks, released toggles, nothing on the sensors
    pub const fn centered() -> Self {
        Self {
            channels: [CHANNEL_CENTER; 6],
            analog: [0; 8],
        }
    }
}

impl Default for TickInputs {
    fn default() -> Self {
        Self::centered()
    }
}

/// One tick's actuator command bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutputs {
    pub pwm: [u8; 8],
}

impl TickOutputs {
    /// Every slot at neutral
    pub const fn neutral() -> Self {
        Self {
            pwm: [NEUTRAL_PWM; 8],
        }
    }
}

/// The tick-driven control loop
pub struct RoverController<CLK, SI, ADC, T> {
    /// Process-wide control state, mutated only inside `tick`
    pub state: ControlState,
    camera: LinescanCamera<CLK, SI, ADC, T>,
    last_scan: LineScan,
}

impl<CLK, SI, ADC, T> RoverController<CLK, SI, ADC, T>
where
    CLK: GpioInterface,
    SI: GpioInterface,
    ADC: AdcInterface,
    T: TimerInterface,
{
    /// Create a controller around the linescan capture device.
    ///
    /// Control state starts at manual/neutral; nothing persists across
    /// process restarts.
    pub fn new(camera: LinescanCamera<CLK, SI, ADC, T>) -> Self {
        Self {
            state: ControlState::new(),
            camera,
            last_scan: LineScan::empty(),
        }
    }

    /// Most recent completed scan (unchanged if the last capture failed)
    pub fn last_scan(&self) -> &LineScan {
        &self.last_scan
    }

    /// Run one control tick.
    pub fn tick(&mut self, inputs: &TickInputs) -> TickOutputs {
        let mode_before = self.state.auto_mode;

        // Manual pipeline: drive mix, then arm zones
        let mut drive = mix_drive(inputs.channels[CH_STEER], inputs.channels[CH_THROTTLE]);
        self.state.arm_pwm = arm_zone(inputs.channels[CH_ARM]);

        // Debounced toggles
        if let Some(edge) = self.state.mode_toggle.update(inputs.channels[CH_MODE_TOGGLE]) {
            mode::cycle_mode(&mut self.state, edge);
        }
        if let Some(edge) = self.state.hand_toggle.update(inputs.channels[CH_HAND_TOGGLE]) {
            self.state.hand_pwm = match edge {
                ToggleEdge::Low => HAND_OPEN,
                ToggleEdge::High => HAND_CLOSED,
            };
        }

        let sensors = SensorFrame::from_raw(
            inputs.analog[AIN_LEFT_LIGHT],
            inputs.analog[AIN_RIGHT_LIGHT],
            inputs.analog[AIN_LEFT_PROX],
            inputs.analog[AIN_MIDDLE_PROX],
            inputs.analog[AIN_RIGHT_PROX],
            inputs.analog[AIN_LIMIT_LOWER],
            inputs.analog[AIN_LIMIT_UPPER],
        );

        // Linescan capture, every tick, independent of the drive pipeline
        match self.camera.capture() {
            Ok(scan) => {
                self.last_scan = scan;
                crate::log_debug!(
                    "linescan center={} exposure={}us",
                    scan.center(),
                    scan.exposure_us
                );
            }
            Err(_) => crate::log_warn!("linescan capture failed, keeping last scan"),
        }

        if self.state.persistent_turn > 0 {
            // Committed burst: freeze arbitration, re-apply the committed
            // state, and keep discarding the manual command
            self.state.persistent_turn -= 1;
            drive = self.state.drive_state.wheel_commands();
        } else {
            // Autonomous always wins over the manual command, from the
            // tick a toggle enters an autonomous mode through the tick a
            // sequence hands back to manual
            let autonomous = self.state.auto_mode != AutoMode::Manual;
            mode::arbitrate(&mut self.state, &sensors);
            if autonomous {
                drive = self.state.drive_state.wheel_commands();
            }
        }

        if self.state.auto_mode != mode_before {
            crate::log_info!(
                "mode change: {} -> {}",
                mode_before.name(),
                self.state.auto_mode.name()
            );
        }

        // Same speed scaling in manual and autonomous operation
        self.state.slow_mode = 1;
        let divisor = self.state.divisor();

        // Limit-switch safety clamp: never drive the arm into a stop
        if sensors.limit_lower < LOWER_LIMIT_TRIP && self.state.arm_pwm < NEUTRAL_PWM {
            self.state.arm_pwm = NEUTRAL_PWM;
        }
        if sensors.limit_upper > UPPER_LIMIT_TRIP && self.state.arm_pwm > NEUTRAL_PWM {
            self.state.arm_pwm = NEUTRAL_PWM;
        }

        let mut outputs = TickOutputs::neutral();
        outputs.pwm[PWM_RIGHT_FRONT] = RIGHT_FRONT.to_pwm(drive.right, divisor);
        outputs.pwm[PWM_LEFT_FRONT] = LEFT_FRONT.to_pwm(drive.left, divisor);
        outputs.pwm[PWM_RIGHT_BACK] = RIGHT_BACK.to_pwm(drive.right, divisor);
        outputs.pwm[PWM_LEFT_BACK] = LEFT_BACK.to_pwm(drive.left, divisor);
        outputs.pwm[PWM_ARM] = self.state.arm_pwm;
        outputs.pwm[PWM_HAND] = self.state.hand_pwm;
        outputs
    }
}
