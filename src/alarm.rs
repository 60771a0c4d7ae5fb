//! Buzzer arbitration.
//!
//! Two independent stages want the buzzer: the proximity alarm (latched
//! Stop-tier beep) and the external alarm passthrough.  Each stage sets or
//! clears its own bit in a reason mask; the buzzer sounds while **any**
//! bit is set.  [`AlarmArbiter::resolve`] reports only aggregate changes,
//! so the tone start/stop commands go out once per edge instead of once
//! per loop iteration.

use log::{debug, info};

/// Why the buzzer is sounding.  Lower bit = higher priority when logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AlarmReason {
    /// External alarm input is high.
    External = 0b0000_0001,
    /// Something is inside the Stop distance.
    Proximity = 0b0000_0010,
}

impl AlarmReason {
    /// Return the bitmask for this reason.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl core::fmt::Display for AlarmReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::External => write!(f, "external alarm"),
            Self::Proximity => write!(f, "proximity"),
        }
    }
}

/// Buzzer command to issue after resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerCommand {
    Start,
    Stop,
}

pub struct AlarmArbiter {
    /// Requested reasons.
    reasons: u8,
    /// Whether the buzzer was last commanded on.
    sounding: bool,
}

impl Default for AlarmArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmArbiter {
    pub fn new() -> Self {
        Self {
            reasons: 0,
            sounding: false,
        }
    }

    /// Set or clear a reason bit.
    pub fn set(&mut self, reason: AlarmReason, active: bool) {
        if active {
            if self.reasons & reason.mask() == 0 {
                debug!("alarm raised: {reason}");
            }
            self.reasons |= reason.mask();
        } else {
            if self.reasons & reason.mask() != 0 {
                debug!("alarm released: {reason}");
            }
            self.reasons &= !reason.mask();
        }
    }

    /// Compare the requested state with what the buzzer is doing.
    /// Returns a command only when they differ.
    pub fn resolve(&mut self) -> Option<BuzzerCommand> {
        let want = self.reasons != 0;
        if want == self.sounding {
            return None;
        }
        self.sounding = want;
        if let Some(reason) = self.primary() {
            info!("Buzzer on ({reason})");
            Some(BuzzerCommand::Start)
        } else {
            info!("Buzzer off");
            Some(BuzzerCommand::Stop)
        }
    }

    /// True if the reason's bit is set.
    pub fn is_active(&self, reason: AlarmReason) -> bool {
        self.reasons & reason.mask() != 0
    }

    /// Highest-priority active reason.
    pub fn primary(&self) -> Option<AlarmReason> {
        [AlarmReason::External, AlarmReason::Proximity]
            .into_iter()
            .find(|r| self.is_active(*r))
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }
}
