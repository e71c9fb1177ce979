// Single-keystroke terminal input
//
// Raw mode is held only for the duration of one read: enabled, one key read,
// prior terminal settings restored. Raw mode turns off line buffering, echo
// and signal keys, so Ctrl-C arrives here as the byte 0x03.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::{debug, trace, warn};

use crate::error::TeleopError;

/// Byte reported for keys that have no single-character form (arrows, F-keys)
const ESCAPE: char = '\x1b';

/// Anything that can hand the teleop loop one key at a time
pub trait KeySource {
    /// Block until exactly one key is available
    fn read_key(&mut self) -> Result<char, TeleopError>;
}

/// Switches the terminal in and out of raw mode
pub trait TerminalMode {
    fn enter_raw(&mut self) -> std::io::Result<()>;
    fn leave_raw(&mut self) -> std::io::Result<()>;
}

/// Raw mode of the controlling terminal, via crossterm
#[derive(Debug, Default)]
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
    fn enter_raw(&mut self) -> std::io::Result<()> {
        enable_raw_mode()
    }

    fn leave_raw(&mut self) -> std::io::Result<()> {
        disable_raw_mode()
    }
}

/// Terminal raw mode, restored when dropped
pub struct RawModeGuard<'a, M: TerminalMode> {
    mode: &'a mut M,
}

impl<'a, M: TerminalMode> RawModeGuard<'a, M> {
    pub fn acquire(mode: &'a mut M) -> Result<Self, TeleopError> {
        mode.enter_raw().map_err(TeleopError::Terminal)?;
        Ok(Self { mode })
    }
}

impl<M: TerminalMode> Drop for RawModeGuard<'_, M> {
    fn drop(&mut self) {
        if let Err(e) = self.mode.leave_raw() {
            warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Run `read` with the terminal in raw mode. The prior mode is restored
/// whether `read` succeeds or fails.
pub fn read_raw<M, T, F>(mode: &mut M, read: F) -> Result<T, TeleopError>
where
    M: TerminalMode,
    F: FnOnce() -> Result<T, TeleopError>,
{
    let _raw = RawModeGuard::acquire(mode)?;
    read()
}

/// Keys from the controlling terminal
pub struct TerminalKeys {
    mode: CrosstermMode,
}

impl TerminalKeys {
    /// Check that the terminal can be switched to raw mode and back.
    ///
    /// Fails before any key is read if the terminal can't be configured.
    pub fn open() -> Result<Self, TeleopError> {
        let mut mode = CrosstermMode;
        drop(RawModeGuard::acquire(&mut mode)?);
        debug!("Terminal supports raw mode");
        Ok(Self { mode })
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> Result<char, TeleopError> {
        read_raw(&mut self.mode, next_key)
    }
}

/// Block on terminal events until one maps to a character
fn next_key() -> Result<char, TeleopError> {
    loop {
        match event::read().map_err(TeleopError::Read)? {
            Event::Key(key) => {
                if let Some(ch) = key_to_char(&key) {
                    return Ok(ch);
                }
            }
            other => trace!("Ignoring terminal event: {:?}", other),
        }
    }
}

/// Convert a key event into the character a byte-oriented read would see.
///
/// Returns `None` for release events, which carry no new keystroke.
pub fn key_to_char(key: &KeyEvent) -> Option<char> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ch = match key.code {
        // Alt sends ESC ahead of the key
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::ALT) => ESCAPE,
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => control_byte(c),
        KeyCode::Char(c) => c,
        KeyCode::Enter => '\r',
        KeyCode::Tab => '\t',
        KeyCode::Backspace => '\x7f',
        _ => ESCAPE,
    };
    Some(ch)
}

/// Ctrl+letter -> 0x01..=0x1a; other keys with Ctrl held pass through
fn control_byte(c: char) -> char {
    if c.is_ascii_alphabetic() {
        ((c.to_ascii_lowercase() as u8) & 0x1f) as char
    } else {
        c
    }
}
