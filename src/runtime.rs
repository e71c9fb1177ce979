// Keystroke-driven command loop
// One key in, at most one velocity command out. No timer: the robot driver
// holds the last command until the next key arrives.

use std::io::Write;

use tracing::{info, warn};

// local imports
use crate::bindings::{KeyAction, classify};
use crate::config::Args;
use crate::display::{BANNER, Status, awaiting_line, status_line};
use crate::error::TeleopError;
use crate::input::{KeySource, TerminalKeys};
use crate::messages::Twist;
use crate::publisher::{CommandSink, ZenohSink};
use crate::relay::{RelayEvent, RelayToggle};
use crate::state::CommandState;

/// What one key did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Keep running and publish `command`
    Emit {
        command: Twist,
        relay: Option<RelayEvent>,
        status: Option<Status>,
    },
    /// Quit key: stop without publishing anything further
    Quit,
}

/// Owns the velocity state and the relay for the lifetime of the process
#[derive(Debug, Default)]
pub struct Teleop {
    state: CommandState,
    relay: RelayToggle,
}

impl Teleop {
    pub fn new(state: CommandState) -> Self {
        Self {
            state,
            relay: RelayToggle::new(),
        }
    }

    /// Apply one key
    pub fn handle_key(&mut self, key: char) -> Outcome {
        let mut relay = None;
        let status = match classify(key) {
            KeyAction::Move(intent) => {
                self.state.apply_movement(intent);
                Some(Status::Accepted(key))
            }
            KeyAction::Scale(scale) => {
                self.state.apply_speed_scale(scale);
                Some(Status::Accepted(key))
            }
            KeyAction::ToggleRelay => {
                relay = Some(self.relay.trigger());
                None
            }
            KeyAction::Quit => return Outcome::Quit,
            KeyAction::Unrecognized => {
                self.state.stop();
                Some(Status::Invalid(key))
            }
        };

        Outcome::Emit {
            command: self.state.snapshot(),
            relay,
            status,
        }
    }

    pub fn state(&self) -> &CommandState {
        &self.state
    }

    pub fn relay_engaged(&self) -> bool {
        self.relay.is_engaged()
    }
}

/// Read keys and publish until the quit key.
///
/// A failed read ends the loop with an error. A failed publish is logged
/// and dropped; the loop keeps going.
pub fn run_loop<K, S, W>(
    teleop: &mut Teleop,
    keys: &mut K,
    sink: &mut S,
    out: &mut W,
) -> Result<(), TeleopError>
where
    K: KeySource,
    S: CommandSink,
    W: Write,
{
    write!(out, "{}", BANNER)?;
    write!(out, "{}", awaiting_line(teleop.state()))?;
    out.flush()?;

    loop {
        let key = keys.read_key()?;

        let (command, relay, status) = match teleop.handle_key(key) {
            Outcome::Quit => {
                writeln!(out, "\nshutting down")?;
                out.flush()?;
                info!("Quit key pressed, shutting down");
                return Ok(());
            }
            Outcome::Emit {
                command,
                relay,
                status,
            } => (command, relay, status),
        };

        // 1. Relay transition: state first, then the spoken line
        if let Some(event) = relay {
            info!("Relay toggled: {}", event.announcement);
            if let Err(e) = sink.send_relay(event.engaged) {
                warn!("Failed to publish relay state: {}", e);
            }
            if let Err(e) = sink.announce(event.announcement) {
                warn!("Failed to publish announcement: {}", e);
            }
        }

        // 2. Status line
        if let Some(status) = status {
            write!(out, "{}", status_line(teleop.state(), status))?;
            out.flush()?;
        }

        // 3. Velocity command, one attempt per key
        if let Err(e) = sink.send_velocity(&command) {
            warn!("Failed to publish velocity command: {}", e);
        }
    }
}

pub async fn run(args: Args) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = match &args.zenoh_config {
        Some(path) => {
            info!("Loading Zenoh config from {}", path.display());
            zenoh::Config::from_file(path)?
        }
        None => zenoh::Config::default(),
    };

    info!("Opening Zenoh session...");
    let session = zenoh::open(config).await?;

    info!("Setting up publishers...");
    let mut sink =
        ZenohSink::declare(&session, &args.cmd_topic, &args.relay_topic, &args.speak_topic)
            .await?;
    info!(
        "Publishing to: {}, {}, {}",
        args.cmd_topic, args.relay_topic, args.speak_topic
    );

    // Fail here, before any key, if the terminal can't go raw
    let mut keys = TerminalKeys::open()?;
    let mut teleop = Teleop::new(CommandState::new(args.speed, args.turn));

    // Terminal reads block, keep them off the async workers
    let result = tokio::task::spawn_blocking(move || {
        let mut stdout = std::io::stdout();
        run_loop(&mut teleop, &mut keys, &mut sink, &mut stdout)
    })
    .await?;

    let closed = session.close().await;
    settle(result, closed)?;
    Ok(())
}

/// Combine the loop result with the session close. The loop's own error
/// wins; a failed close is only logged.
fn settle(
    result: Result<(), TeleopError>,
    closed: Result<(), zenoh::Error>,
) -> Result<(), TeleopError> {
    if let Err(e) = closed {
        warn!("Failed to close Zenoh session: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Vector3;
    use crate::state::VelocityIntent;

    fn emitted(outcome: Outcome) -> (Twist, Option<RelayEvent>, Option<Status>) {
        match outcome {
            Outcome::Emit {
                command,
                relay,
                status,
            } => (command, relay, status),
            Outcome::Quit => panic!("expected a command, got quit"),
        }
    }

    #[test]
    fn test_movement_key() {
        let mut teleop = Teleop::default();
        let (cmd, relay, status) = emitted(teleop.handle_key('o'));
        assert_eq!(cmd.linear, Vector3::new(0.5, 0.0, 0.0));
        assert_eq!(cmd.angular, Vector3::new(0.0, 0.0, -1.0));
        assert!(relay.is_none());
        assert_eq!(status, Some(Status::Accepted('o')));
    }

    #[test]
    fn test_every_movement_key_sets_tabled_intent() {
        for (key, intent) in crate::bindings::MOVE_BINDINGS {
            let mut teleop = Teleop::default();
            teleop.handle_key('q');
            let before = teleop.state().clone();
            teleop.handle_key(key);
            assert_eq!(teleop.state().intent(), intent);
            assert_eq!(teleop.state().linear_speed(), before.linear_speed());
            assert_eq!(teleop.state().angular_speed(), before.angular_speed());
        }
    }

    #[test]
    fn test_every_speed_key_scales_by_tabled_factors() {
        let expected = [
            ('q', 1.1, 1.1),
            ('z', 0.9, 0.9),
            ('w', 1.1, 1.0),
            ('x', 0.9, 1.0),
            ('e', 1.0, 1.1),
            ('c', 1.0, 0.9),
        ];
        assert_eq!(crate::bindings::SPEED_BINDINGS.len(), expected.len());

        for (key, linear, angular) in expected {
            let scale = crate::bindings::speed(key).unwrap();
            assert_eq!(scale.linear, linear, "linear factor of {key:?}");
            assert_eq!(scale.angular, angular, "angular factor of {key:?}");
        }

        for (key, scale) in crate::bindings::SPEED_BINDINGS {
            let mut teleop = Teleop::default();
            teleop.handle_key('i');
            let before = teleop.state().clone();
            let (cmd, relay, status) = emitted(teleop.handle_key(key));
            assert_eq!(
                teleop.state().linear_speed(),
                before.linear_speed() * scale.linear
            );
            assert_eq!(
                teleop.state().angular_speed(),
                before.angular_speed() * scale.angular
            );
            assert_eq!(teleop.state().intent(), before.intent());
            assert_eq!(cmd.linear.x, teleop.state().linear_speed());
            assert!(relay.is_none());
            assert_eq!(status, Some(Status::Accepted(key)));
        }
    }

    #[test]
    fn test_loop_error_survives_failed_close() {
        let read = Err(TeleopError::Read(std::io::Error::other("tty gone")));
        let closed: Result<(), zenoh::Error> = Err("session already closed".into());
        assert!(matches!(settle(read, closed), Err(TeleopError::Read(_))));

        let closed: Result<(), zenoh::Error> = Err("session already closed".into());
        assert!(settle(Ok(()), closed).is_ok());
    }

    #[test]
    fn test_speed_round_trip() {
        let mut teleop = Teleop::default();
        teleop.handle_key('q');
        teleop.handle_key('z');
        // 1.1 * 0.9 = 0.99, so q then z is not an exact inverse
        assert!((teleop.state().linear_speed() - 0.5 * 0.99).abs() < 1e-9);
        assert!((teleop.state().angular_speed() - 0.99).abs() < 1e-9);
    }

    #[test]
    fn test_relay_key_keeps_motion() {
        let mut teleop = Teleop::default();
        teleop.handle_key('i');
        let (cmd, relay, status) = emitted(teleop.handle_key('r'));
        assert_eq!(cmd.linear.x, 0.5);
        assert_eq!(status, None);
        let event = relay.unwrap();
        assert!(event.engaged);
        assert_eq!(event.announcement, "motors engaged");
        assert_eq!(
            teleop.state().intent(),
            VelocityIntent::new(1.0, 0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_unrecognized_key_stops() {
        let mut teleop = Teleop::default();
        teleop.handle_key('i');
        teleop.handle_key('w');
        let speed = teleop.state().linear_speed();
        let (cmd, _, status) = emitted(teleop.handle_key('1'));
        assert_eq!(cmd, Twist::default());
        assert_eq!(status, Some(Status::Invalid('1')));
        assert_eq!(teleop.state().intent(), VelocityIntent::STOP);
        assert_eq!(teleop.state().linear_speed(), speed);
    }

    #[test]
    fn test_quit_leaves_state_alone() {
        let mut teleop = Teleop::default();
        teleop.handle_key('u');
        let before = teleop.state().clone();
        assert_eq!(teleop.handle_key('\x03'), Outcome::Quit);
        assert_eq!(teleop.state(), &before);
    }
}
