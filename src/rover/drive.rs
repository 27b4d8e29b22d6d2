//! Drive states
//!
//! The autonomous behaviors never command wheels directly; they select one
//! of a small set of drive states, and the state maps onto a fixed
//! (left, right) command pair. Keeping the table closed makes every
//! autonomous decision reproducible from the state alone.

use crate::libraries::DriveCommand;

/// Enumerated drive states selected by autonomous arbitration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveState {
    #[default]
    Stop,
    Straight,
    Reverse,
    TurnRight,
    TurnLeft,
    TurnRightReverse,
    TurnLeftReverse,
    SlowStraight,
    FullPower,
}

impl DriveState {
    /// Decode a raw state number; anything unmapped is an explicit Stop.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Stop,
            1 => Self::Straight,
            2 => Self::Reverse,
            3 => Self::TurnRight,
            4 => Self::TurnLeft,
            5 => Self::TurnRightReverse,
            6 => Self::TurnLeftReverse,
            7 => Self::SlowStraight,
            8 => Self::FullPower,
            _ => Self::Stop,
        }
    }

    /// Fixed (left, right) wheel command pair for this state
    pub fn wheel_commands(self) -> DriveCommand {
        let (left, right) = match self {
            Self::Stop => (0.0, 0.0),
            Self::Straight => (0.6, 0.6),
            Self::Reverse => (-0.6, -0.6),
            Self::TurnRight => (0.0, 0.8),
            Self::TurnLeft => (0.8, 0.0),
            Self::TurnRightReverse => (0.0, -0.9),
            Self::TurnLeftReverse => (-0.9, 0.0),
            Self::SlowStraight => (0.3, 0.3),
            Self::FullPower => (0.8, 0.8),
        };
        DriveCommand { left, right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_command_table() {
        let cases = [
            (DriveState::Stop, 0.0, 0.0),
            (DriveState::Straight, 0.6, 0.6),
            (DriveState::Reverse, -0.6, -0.6),
            (DriveState::TurnRight, 0.0, 0.8),
            (DriveState::TurnLeft, 0.8, 0.0),
            (DriveState::TurnRightReverse, 0.0, -0.9),
            (DriveState::TurnLeftReverse, -0.9, 0.0),
            (DriveState::SlowStraight, 0.3, 0.3),
            (DriveState::FullPower, 0.8, 0.8),
        ];
        for (state, left, right) in cases {
            let cmd = state.wheel_commands();
            assert_eq!(cmd.left, left, "{state:?} left");
            assert_eq!(cmd.right, right, "{state:?} right");
        }
    }

    #[test]
    fn test_unmapped_raw_values_decode_to_stop() {
        assert_eq!(DriveState::from_raw(9), DriveState::Stop);
        assert_eq!(DriveState::from_raw(200), DriveState::Stop);
    }

    #[test]
    fn test_mapped_raw_values_are_not_stop() {
        for raw in 1..=8 {
            assert_ne!(
                DriveState::from_raw(raw),
                DriveState::Stop,
                "raw {raw} should not map to Stop",
            );
        }
    }
}
