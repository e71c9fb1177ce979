// Outgoing channels: velocity, relay state, spoken announcements
//
// The teleop loop is synchronous, so zenoh puts are driven with `wait()`
// instead of `.await`.

use serde::Serialize;
use tracing::debug;
use zenoh::Wait;
use zenoh::pubsub::Publisher;

use crate::error::TeleopError;
use crate::messages::{RelayState, SpeakLine, Twist};

/// Where the teleop loop hands its output
pub trait CommandSink {
    fn send_velocity(&mut self, twist: &Twist) -> Result<(), TeleopError>;
    fn send_relay(&mut self, engaged: bool) -> Result<(), TeleopError>;
    fn announce(&mut self, text: &str) -> Result<(), TeleopError>;
}

/// Publishes JSON payloads on three zenoh key expressions
pub struct ZenohSink {
    cmd_vel: Publisher<'static>,
    relay: Publisher<'static>,
    speak: Publisher<'static>,
}

impl ZenohSink {
    /// Declare the three publishers on an open session
    pub async fn declare(
        session: &zenoh::Session,
        cmd_topic: &str,
        relay_topic: &str,
        speak_topic: &str,
    ) -> Result<Self, TeleopError> {
        Ok(Self {
            cmd_vel: declare(session, cmd_topic).await?,
            relay: declare(session, relay_topic).await?,
            speak: declare(session, speak_topic).await?,
        })
    }
}

async fn declare(
    session: &zenoh::Session,
    topic: &str,
) -> Result<Publisher<'static>, TeleopError> {
    session
        .declare_publisher(topic.to_owned())
        .await
        .map_err(|source| TeleopError::Transport {
            topic: topic.to_owned(),
            source,
        })
}

fn put<T: Serialize>(
    publisher: &Publisher<'static>,
    what: &'static str,
    value: &T,
) -> Result<(), TeleopError> {
    let json =
        serde_json::to_string(value).map_err(|source| TeleopError::Encode { what, source })?;
    debug!("Publishing {} on {}: {}", what, publisher.key_expr(), json);
    publisher
        .put(json)
        .wait()
        .map_err(|source| TeleopError::Transport {
            topic: publisher.key_expr().to_string(),
            source,
        })
}

impl CommandSink for ZenohSink {
    fn send_velocity(&mut self, twist: &Twist) -> Result<(), TeleopError> {
        put(&self.cmd_vel, "velocity command", twist)
    }

    fn send_relay(&mut self, engaged: bool) -> Result<(), TeleopError> {
        put(&self.relay, "relay state", &RelayState { engaged })
    }

    fn announce(&mut self, text: &str) -> Result<(), TeleopError> {
        let line = SpeakLine {
            text: text.to_owned(),
        };
        put(&self.speak, "announcement", &line)
    }
}
