// Help banner and the per-key status line

use crate::state::CommandState;

pub const BANNER: &str = r#"

Reading from the keyboard and publishing velocity commands!
---------------------------
Moving around:
   u    i    o
   j    k    l
   m    ,    .

For Holonomic mode (strafing), hold down the shift key:
---------------------------
   U    I    O
   J    K    L
   M    <    >

t : up (+z)
b : down (-z)

anything else : stop

q/z : increase/decrease max speeds by 10%
w/x : increase/decrease only linear speed by 10%
e/c : increase/decrease only angular speed by 10%

r : engage/disengage motor relay

CTRL-C to quit

"#;

/// What the status line reports after a key
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Accepted(char),
    Invalid(char),
}

/// Status line before any key was pressed
pub fn awaiting_line(state: &CommandState) -> String {
    format!("\r{} | Awaiting command...\r", speeds(state))
}

/// Status line, prefixed with `\r` so it overwrites the previous one
pub fn status_line(state: &CommandState, status: Status) -> String {
    match status {
        Status::Accepted(key) => format!(
            "\r{} | Last command: {}   ",
            speeds(state),
            key.escape_debug()
        ),
        Status::Invalid(key) => format!(
            "\r{} | Invalid command! {}",
            speeds(state),
            key.escape_debug()
        ),
    }
}

fn speeds(state: &CommandState) -> String {
    format!(
        "Current: speed {:.6}\tturn {:.6}",
        state.linear_speed(),
        state.angular_speed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines() {
        let state = CommandState::default();
        assert_eq!(
            status_line(&state, Status::Accepted('i')),
            "\rCurrent: speed 0.500000\tturn 1.000000 | Last command: i   "
        );
        assert_eq!(
            status_line(&state, Status::Invalid('1')),
            "\rCurrent: speed 0.500000\tturn 1.000000 | Invalid command! 1"
        );
        assert!(awaiting_line(&state).contains("Awaiting command..."));
    }

    #[test]
    fn test_control_keys_are_escaped() {
        let line = status_line(&CommandState::default(), Status::Invalid('\x1b'));
        assert!(line.ends_with("Invalid command! \\u{1b}"));
    }

    #[test]
    fn test_banner_lists_every_key() {
        for (key, _) in crate::bindings::MOVE_BINDINGS {
            assert!(BANNER.contains(key), "banner is missing {key:?}");
        }
        for (key, _) in crate::bindings::SPEED_BINDINGS {
            assert!(BANNER.contains(key), "banner is missing {key:?}");
        }
    }
}
