//! Polled push-button edge detector with timestamp debounce.
//!
//! ## Hardware
//!
//! Momentary switch reading HIGH while pressed (external pull-down).  The
//! main loop samples the level once per iteration and hands it to
//! [`ButtonDriver::tick`] together with the monotonic time.
//!
//! ## Debounce
//!
//! Every accepted level change, press or release, opens a lockout window
//! during which further changes are ignored.  Nothing blocks: the other
//! inputs keep being polled while the window runs.
//!
//! ```text
//!  level ──┐   ┌─┐ ┌──────────────┐
//!          └───┘ └─┘              └──────
//!          ▲ Pressed              ▲ Released
//!          |<-- lockout -->|      |<-- lockout -->|
//! ```

/// Debounced button edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Stable,
    Lockout { since_ms: u32 },
}

pub struct ButtonDriver {
    debounce_ms: u32,
    state: DebounceState,
    /// Last accepted level (`true` = pressed).
    last_level: bool,
}

impl ButtonDriver {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            state: DebounceState::Stable,
            last_level: false,
        }
    }

    /// Call once per main-loop iteration with the sampled level.
    /// `now_ms` is the current monotonic time in milliseconds.
    pub fn tick(&mut self, level: bool, now_ms: u32) -> Option<ButtonEvent> {
        if let DebounceState::Lockout { since_ms } = self.state {
            if now_ms.wrapping_sub(since_ms) < self.debounce_ms {
                return None;
            }
            self.state = DebounceState::Stable;
        }

        if level == self.last_level {
            return None;
        }

        self.last_level = level;
        self.state = DebounceState::Lockout { since_ms: now_ms };
        Some(if level {
            ButtonEvent::Pressed
        } else {
            ButtonEvent::Released
        })
    }

    /// Last accepted level.
    pub fn is_pressed(&self) -> bool {
        self.last_level
    }
}
