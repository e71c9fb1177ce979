// Topics, default speeds, command-line flags
use std::path::PathBuf;

use clap::Parser;

// Zenoh topics
pub const TOPIC_CMD_VEL: &str = "robot/cmd_vel"; // velocity commands
pub const TOPIC_MOTOR_RELAY: &str = "robot/motor_relay"; // relay on/off
pub const TOPIC_SPEAK_LINE: &str = "robot/speak_line"; // text-to-speech

// Initial speeds
pub const DEFAULT_SPEED: f64 = 0.5; // m/s
pub const DEFAULT_TURN: f64 = 1.0; // rad/s

/// Drive a robot's velocity from the keyboard over zenoh
#[derive(Debug, Clone, Parser)]
#[command(name = "keyboard-teleop", version)]
pub struct Args {
    /// Key expression velocity commands are published on
    #[arg(long, default_value = TOPIC_CMD_VEL)]
    pub cmd_topic: String,

    /// Key expression the motor relay state is published on
    #[arg(long, default_value = TOPIC_MOTOR_RELAY)]
    pub relay_topic: String,

    /// Key expression spoken announcements are published on
    #[arg(long, default_value = TOPIC_SPEAK_LINE)]
    pub speak_topic: String,

    /// Initial linear speed (m/s)
    #[arg(long, default_value_t = DEFAULT_SPEED, value_parser = positive_speed)]
    pub speed: f64,

    /// Initial angular speed (rad/s)
    #[arg(long, default_value_t = DEFAULT_TURN, value_parser = positive_speed)]
    pub turn: f64,

    /// Zenoh config file (JSON5); the zenoh defaults are used when omitted
    #[arg(long)]
    pub zenoh_config: Option<PathBuf>,
}

/// Speeds are scaled multiplicatively, so they must start strictly positive
fn positive_speed(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("`{s}` must be a finite number greater than zero"))
    }
}
