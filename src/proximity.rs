//! Ultrasonic proximity alarm.
//!
//! Samples distance on a fixed interval and maps each reading to a tier:
//!
//! | Tier    | Distance                 | Display          | Tone                 |
//! |---------|--------------------------|------------------|----------------------|
//! | Stop    | d ≤ stop                 | `Stop!`          | start once (latched) |
//! | Caution | stop < d ≤ caution       | `Distance: N cm` | stop if latched      |
//! | Clear   | d > caution              | `Distance: N cm` | stop if latched, then silence |
//!
//! The continuous-beep flag is latched on entry to Stop so the start
//! command is not re-issued every sample while the tier persists, and it is
//! cleared exactly once on exit.  There is no hysteresis: a reading sitting
//! on a boundary flips tiers sample by sample.

use core::fmt::Write;

/// Round-trip echo time (µs) → one-way distance (cm), at 0.034 cm/µs.
pub fn echo_to_cm(echo_us: u32) -> u32 {
    (u64::from(echo_us) * 17 / 1000) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityTier {
    Stop,
    Caution,
    Clear,
}

/// Change to the latched continuous beep caused by one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeepEdge {
    Started,
    Stopped,
    Unchanged,
}

/// Everything one sample decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProximityReport {
    pub distance_cm: u32,
    pub tier: ProximityTier,
    pub beep: BeepEdge,
    /// The Clear tier always asks for silence, even when nothing is sounding.
    pub silence: bool,
}

impl ProximityReport {
    /// LCD text for this sample.
    pub fn display_text(&self) -> heapless::String<32> {
        let mut text = heapless::String::new();
        let _ = match self.tier {
            ProximityTier::Stop => text.write_str("Stop!"),
            ProximityTier::Caution | ProximityTier::Clear => {
                write!(text, "Distance: {} cm", self.distance_cm)
            }
        };
        text
    }
}

pub struct ProximityAlarm {
    interval_ms: u32,
    stop_cm: u32,
    caution_cm: u32,
    last_sample_ms: u32,
    beep_active: bool,
}

impl ProximityAlarm {
    pub fn new(interval_ms: u32, stop_cm: u32, caution_cm: u32) -> Self {
        Self {
            interval_ms,
            stop_cm,
            caution_cm,
            last_sample_ms: 0,
            beep_active: false,
        }
    }

    /// True (and the interval restarted) when a sample is due at `now_ms`.
    pub fn sample_due(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_sample_ms) >= self.interval_ms {
            self.last_sample_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn classify(&self, distance_cm: u32) -> ProximityTier {
        if distance_cm <= self.stop_cm {
            ProximityTier::Stop
        } else if distance_cm <= self.caution_cm {
            ProximityTier::Caution
        } else {
            ProximityTier::Clear
        }
    }

    /// Evaluate one distance sample.
    pub fn evaluate(&mut self, distance_cm: u32) -> ProximityReport {
        let tier = self.classify(distance_cm);

        let beep = match (tier, self.beep_active) {
            (ProximityTier::Stop, false) => {
                self.beep_active = true;
                BeepEdge::Started
            }
            (ProximityTier::Caution | ProximityTier::Clear, true) => {
                self.beep_active = false;
                BeepEdge::Stopped
            }
            _ => BeepEdge::Unchanged,
        };

        ProximityReport {
            distance_cm,
            tier,
            beep,
            silence: tier == ProximityTier::Clear,
        }
    }

    /// Whether the Stop-tier beep is latched on.
    pub fn beep_active(&self) -> bool {
        self.beep_active
    }
}
