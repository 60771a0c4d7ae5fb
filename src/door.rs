//! Door latch state machine.
//!
//! ```text
//!            open()
//!   CLOSED ─────────▶ OPEN
//!     ▲                 │
//!     └──── close() ────┘
//!
//!   toggle(): close() if OPEN, else open()
//! ```
//!
//! The two latch servos are commanded only inside a transition branch, so
//! a held state never re-issues a position write.  The latch position is
//! therefore a pure function of [`DoorState`].

use crate::app::ports::ActuatorPort;
use crate::config::LatchPositions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorState {
    #[default]
    Closed,
    Open,
}

/// Outcome of an open/close/toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed,
    /// `open()` on an open door; nothing was commanded.
    AlreadyOpen,
    /// `close()` on a closed door; nothing was commanded.
    AlreadyClosed,
}

impl Transition {
    /// True if the latch actually moved.
    pub fn changed(self) -> bool {
        matches!(self, Self::Opened | Self::Closed)
    }
}

pub struct Door {
    state: DoorState,
    open_pos: LatchPositions,
    closed_pos: LatchPositions,
}

impl Door {
    /// A closed door.  Nothing is commanded until [`home`](Self::home).
    pub fn new(open_pos: LatchPositions, closed_pos: LatchPositions) -> Self {
        Self {
            state: DoorState::Closed,
            open_pos,
            closed_pos,
        }
    }

    /// Drive the latch to the position of the current state.  Used once at
    /// boot, when the servos' physical position is unknown.
    pub fn home(&self, hw: &mut impl ActuatorPort) {
        let pos = match self.state {
            DoorState::Closed => self.closed_pos,
            DoorState::Open => self.open_pos,
        };
        hw.set_latch(pos.servo_a_deg, pos.servo_b_deg);
    }

    pub fn open(&mut self, hw: &mut impl ActuatorPort) -> Transition {
        if self.state == DoorState::Open {
            return Transition::AlreadyOpen;
        }
        hw.set_latch(self.open_pos.servo_a_deg, self.open_pos.servo_b_deg);
        self.state = DoorState::Open;
        Transition::Opened
    }

    pub fn close(&mut self, hw: &mut impl ActuatorPort) -> Transition {
        if self.state == DoorState::Closed {
            return Transition::AlreadyClosed;
        }
        hw.set_latch(self.closed_pos.servo_a_deg, self.closed_pos.servo_b_deg);
        self.state = DoorState::Closed;
        Transition::Closed
    }

    pub fn toggle(&mut self, hw: &mut impl ActuatorPort) -> Transition {
        match self.state {
            DoorState::Open => self.close(hw),
            DoorState::Closed => self.open(hw),
        }
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }
}
