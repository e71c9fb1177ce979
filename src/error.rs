// Error type shared by the teleop loop and its collaborators

/// Errors that end the teleop loop (or, for transport errors, get logged and dropped)
#[derive(Debug, thiserror::Error)]
pub enum TeleopError {
    #[error("Terminal configuration failed: {0}")]
    Terminal(#[source] std::io::Error),

    #[error("Failed to read key: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write status: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Transport error on {topic}: {source}")]
    Transport {
        topic: String,
        #[source]
        source: zenoh::Error,
    },
}
