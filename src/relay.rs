// Motor relay on/off toggle

pub const ENGAGED_ANNOUNCEMENT: &str = "motors engaged";
pub const DISENGAGED_ANNOUNCEMENT: &str = "motors disengaged";

/// Result of a relay toggle: the new state and what to say about it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelayEvent {
    pub engaged: bool,
    pub announcement: &'static str,
}

/// Two-state relay, disengaged at start. Every trigger flips it.
#[derive(Debug, Clone, Default)]
pub struct RelayToggle {
    engaged: bool,
}

impl RelayToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self) -> RelayEvent {
        self.engaged = !self.engaged;
        RelayEvent {
            engaged: self.engaged,
            announcement: if self.engaged {
                ENGAGED_ANNOUNCEMENT
            } else {
                DISENGAGED_ANNOUNCEMENT
            },
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }
}
