// Running velocity state: speed scalars plus the last direction pressed

use crate::config::{DEFAULT_SPEED, DEFAULT_TURN};
use crate::messages::{Twist, Vector3};

/// Direction of travel, each component in {-1, 0, 1}
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelocityIntent {
    pub forward: f64,
    pub strafe: f64,
    pub vertical: f64,
    pub turn: f64,
}

impl VelocityIntent {
    pub const STOP: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(forward: f64, strafe: f64, vertical: f64, turn: f64) -> Self {
        Self {
            forward,
            strafe,
            vertical,
            turn,
        }
    }
}

/// Multipliers applied to the linear and angular speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedScale {
    pub linear: f64,
    pub angular: f64,
}

impl SpeedScale {
    pub const fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }
}

/// Speeds and direction the next command is built from.
///
/// Both speeds stay strictly positive: they start positive and are only
/// ever multiplied by positive factors. There is no upper bound.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandState {
    linear_speed: f64,
    angular_speed: f64,
    intent: VelocityIntent,
}

impl CommandState {
    /// Start stopped at the given speeds.
    ///
    /// # Panics
    ///
    /// If either speed is not a finite number greater than zero.
    pub fn new(linear_speed: f64, angular_speed: f64) -> Self {
        assert!(
            is_positive_speed(linear_speed) && is_positive_speed(angular_speed),
            "speeds must be finite and positive, got {linear_speed} and {angular_speed}"
        );
        Self {
            linear_speed,
            angular_speed,
            intent: VelocityIntent::STOP,
        }
    }

    /// Replace the direction, speeds untouched
    pub fn apply_movement(&mut self, intent: VelocityIntent) {
        self.intent = intent;
    }

    pub fn apply_speed_scale(&mut self, scale: SpeedScale) {
        self.linear_speed *= scale.linear;
        self.angular_speed *= scale.angular;
    }

    pub fn stop(&mut self) {
        self.intent = VelocityIntent::STOP;
    }

    /// Command for the current state. Roll and pitch rates are always zero.
    pub fn snapshot(&self) -> Twist {
        Twist {
            linear: Vector3::new(
                self.intent.forward * self.linear_speed,
                self.intent.strafe * self.linear_speed,
                self.intent.vertical * self.linear_speed,
            ),
            angular: Vector3::new(0.0, 0.0, self.intent.turn * self.angular_speed),
        }
    }

    pub fn linear_speed(&self) -> f64 {
        self.linear_speed
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    pub fn intent(&self) -> VelocityIntent {
        self.intent
    }
}

fn is_positive_speed(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl Default for CommandState {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED, DEFAULT_TURN)
    }
}
