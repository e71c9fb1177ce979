// Message types published by the teleop

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

// Velocity command teleop -> robot driver
// Default is the zero command (robot stopped)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

/// Motor relay state, published only when the relay flips
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RelayState {
    pub engaged: bool,
}

/// Line of text for the speech node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeakLine {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twist_json_layout() {
        let twist = Twist {
            linear: Vector3::new(0.5, 0.0, 0.0),
            angular: Vector3::new(0.0, 0.0, -1.0),
        };
        let json = serde_json::to_value(twist).unwrap();
        assert_eq!(json["linear"]["x"], 0.5);
        assert_eq!(json["angular"]["z"], -1.0);
    }

    #[test]
    fn test_relay_state_json() {
        let json = serde_json::to_string(&RelayState { engaged: true }).unwrap();
        assert_eq!(json, r#"{"engaged":true}"#);
    }
}
