// Keyboard teleop: one keystroke in, one velocity command out

pub mod bindings;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod messages;
pub mod publisher;
pub mod relay;
pub mod runtime;
pub mod state;

pub use error::TeleopError;
