//! Keypad password gate.
//!
//! Symbols accumulate in a fixed-capacity buffer.  The comparison fires
//! exactly once, when the buffer reaches the secret's length, and the
//! buffer is cleared after it whatever the outcome.  Two control keys
//! bypass accumulation:
//!
//! | Key | Effect                                         |
//! |-----|------------------------------------------------|
//! | `#` | close the door if open; clear the buffer       |
//! | `*` | clear the buffer                               |

use crate::config::MAX_SECRET_LEN;

/// Submit / close key.
pub const SUBMIT_KEY: char = '#';
/// Reset key.
pub const RESET_KEY: char = '*';

/// What the controller should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    /// `#` while the door is open.
    Close,
    /// `#` while the door is closed; buffer cleared, nothing else.
    Cleared,
    /// `*`.
    Reset,
    /// Symbol stored; secret length not reached yet.
    Pending,
    /// Full-length entry matched while the door was closed.
    Open,
    /// Full-length entry was wrong, or right while the door was already open.
    Rejected,
}

pub struct PasswordGate {
    secret: heapless::String<MAX_SECRET_LEN>,
    buffer: heapless::String<MAX_SECRET_LEN>,
}

impl PasswordGate {
    pub fn new(secret: heapless::String<MAX_SECRET_LEN>) -> Self {
        Self {
            secret,
            buffer: heapless::String::new(),
        }
    }

    /// Feed one keypad symbol.  `door_open` is the door state at the time
    /// of the press.
    pub fn press(&mut self, key: char, door_open: bool) -> GateAction {
        match key {
            SUBMIT_KEY => {
                self.buffer.clear();
                if door_open { GateAction::Close } else { GateAction::Cleared }
            }
            RESET_KEY => {
                self.buffer.clear();
                GateAction::Reset
            }
            _ => {
                if self.buffer.push(key).is_err() {
                    // Only reachable with an empty secret, which config validation refuses.
                    self.buffer.clear();
                    return GateAction::Rejected;
                }
                if self.buffer.chars().count() < self.secret.chars().count() {
                    return GateAction::Pending;
                }
                let matched = self.buffer == self.secret;
                self.buffer.clear();
                if matched && !door_open {
                    GateAction::Open
                } else {
                    GateAction::Rejected
                }
            }
        }
    }

    /// Symbols entered since the last clear.
    pub fn entered(&self) -> &str {
        &self.buffer
    }
}
