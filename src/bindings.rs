// Key -> action tables
//
// Lower-case keys drive and turn, the shifted keys strafe (holonomic mode).
// Speed keys scale the current speeds by 10%.

use crate::state::{SpeedScale, VelocityIntent};

/// Toggles the motor relay
pub const RELAY_KEY: char = 'r';

/// Ctrl-C, delivered as a plain byte while the terminal is raw
pub const QUIT_KEY: char = '\x03';

const fn mv(forward: f64, strafe: f64, vertical: f64, turn: f64) -> VelocityIntent {
    VelocityIntent::new(forward, strafe, vertical, turn)
}

/// Movement keys: (forward, strafe, vertical, turn)
pub const MOVE_BINDINGS: [(char, VelocityIntent); 20] = [
    ('i', mv(1.0, 0.0, 0.0, 0.0)),
    ('o', mv(1.0, 0.0, 0.0, -1.0)),
    ('j', mv(0.0, 0.0, 0.0, 1.0)),
    ('l', mv(0.0, 0.0, 0.0, -1.0)),
    ('u', mv(1.0, 0.0, 0.0, 1.0)),
    (',', mv(-1.0, 0.0, 0.0, 0.0)),
    ('.', mv(-1.0, 0.0, 0.0, 1.0)),
    ('m', mv(-1.0, 0.0, 0.0, -1.0)),
    ('O', mv(1.0, -1.0, 0.0, 0.0)),
    ('I', mv(1.0, 0.0, 0.0, 0.0)),
    ('J', mv(0.0, 1.0, 0.0, 0.0)),
    ('L', mv(0.0, -1.0, 0.0, 0.0)),
    ('U', mv(1.0, 1.0, 0.0, 0.0)),
    ('<', mv(-1.0, 0.0, 0.0, 0.0)),
    ('>', mv(-1.0, -1.0, 0.0, 0.0)),
    ('M', mv(-1.0, 1.0, 0.0, 0.0)),
    ('t', mv(0.0, 0.0, 1.0, 0.0)),
    ('b', mv(0.0, 0.0, -1.0, 0.0)),
    ('k', VelocityIntent::STOP),
    ('K', VelocityIntent::STOP),
];

/// Speed keys: (linear factor, angular factor)
pub const SPEED_BINDINGS: [(char, SpeedScale); 6] = [
    ('q', SpeedScale::new(1.1, 1.1)),
    ('z', SpeedScale::new(0.9, 0.9)),
    ('w', SpeedScale::new(1.1, 1.0)),
    ('x', SpeedScale::new(0.9, 1.0)),
    ('e', SpeedScale::new(1.0, 1.1)),
    ('c', SpeedScale::new(1.0, 0.9)),
];

/// What a single key asks the teleop to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Move(VelocityIntent),
    Scale(SpeedScale),
    ToggleRelay,
    Quit,
    Unrecognized,
}

pub fn movement(key: char) -> Option<VelocityIntent> {
    MOVE_BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, intent)| intent)
}

pub fn speed(key: char) -> Option<SpeedScale> {
    SPEED_BINDINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, scale)| scale)
}

/// Classify a key. Exact match only, movement table first.
pub fn classify(key: char) -> KeyAction {
    if let Some(intent) = movement(key) {
        KeyAction::Move(intent)
    } else if let Some(scale) = speed(key) {
        KeyAction::Scale(scale)
    } else if key == RELAY_KEY {
        KeyAction::ToggleRelay
    } else if key == QUIT_KEY {
        KeyAction::Quit
    } else {
        KeyAction::Unrecognized
    }
}
