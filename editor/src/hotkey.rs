use std::fmt;

use isolationist_core::input::{KeyCode, KeyEvent, KeyState, Modifiers};
use serde::{Deserialize, Serialize};

/// A configurable shortcut: one key plus an exact modifier combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotKey {
    pub key: KeyCode,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl HotKey {
    pub const fn new(key: KeyCode) -> Self {
        Self {
            key,
            alt: false,
            ctrl: false,
            shift: false,
        }
    }

    #[must_use]
    pub const fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    #[must_use]
    pub const fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            alt: self.alt,
            ctrl: self.ctrl,
            shift: self.shift,
        }
    }

    /// A hotkey fires on key release when the key matches and every modifier
    /// is held exactly as configured (extra modifiers do not match).
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.state == KeyState::Released
            && event.key == self.key
            && event.modifiers == self.modifiers()
    }
}

impl fmt::Display for HotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        write!(f, "{:?}", self.key)
    }
}
