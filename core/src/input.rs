//! Platform-agnostic input types.
//!
//! Hosts translate their native keyboard events into [`KeyEvent`]s so the
//! editor commands can match hotkeys without depending on a windowing crate.

use serde::{Deserialize, Serialize};

/// Physical keyboard key identifier (US QWERTY layout names).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Digits
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Common keys
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
    Backquote,
    Slash,
}

/// Modifier keys held while an event was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        alt: false,
        ctrl: false,
        shift: false,
    };

    pub const CTRL: Self = Self {
        alt: false,
        ctrl: true,
        shift: false,
    };

    pub const SHIFT: Self = Self {
        alt: false,
        ctrl: false,
        shift: true,
    };
}

/// Whether a key went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A single keyboard event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyEvent {
    /// A key-release event, the edge hotkeys trigger on.
    pub fn released(key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            state: KeyState::Released,
        }
    }

    pub fn pressed(key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            state: KeyState::Pressed,
        }
    }
}
