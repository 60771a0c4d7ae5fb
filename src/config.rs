//! System configuration parameters
//!
//! All tunable parameters for the door controller.  The firmware bakes
//! `config/door.json` in at build time; any field missing from the file
//! keeps its default.  Values are validated before use.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::password::{RESET_KEY, SUBMIT_KEY};

/// Longest secret the keypad gate accepts.
pub const MAX_SECRET_LEN: usize = 8;

const DEFAULT_SECRET: &str = "1234";

/// Angular positions for the two latch servos, in degrees (0–180).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatchPositions {
    pub servo_a_deg: u8,
    pub servo_b_deg: u8,
}

/// How a decoded IR frame is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrPolicy {
    /// Any decoded frame toggles the door.
    AnyFrame,
    /// Only this exact code toggles the door; other frames are logged and ignored.
    MatchCode(u32),
}

/// Who gets the buzzer when proximity and external alarm disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuzzerPolicy {
    /// Sound while any alarm reason is active; commands only on change.
    Arbitrated,
    /// Each stage writes the buzzer directly; the external alarm stage runs
    /// last and overrides the proximity decision every iteration.
    LastWriteWins,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    // --- Keypad ---
    /// Code that opens the door when typed at exactly its length.
    pub secret: heapless::String<MAX_SECRET_LEN>,
    /// Minimum time a key must be stable before it is reported (ms).
    pub keypad_debounce_ms: u32,

    // --- Latch ---
    pub latch_open: LatchPositions,
    pub latch_closed: LatchPositions,

    // --- Button ---
    /// Lockout after every accepted button level change (ms).
    pub button_debounce_ms: u32,

    // --- Remote ---
    pub ir_policy: IrPolicy,

    // --- Proximity ---
    /// Distance sampling interval (ms).
    pub sample_interval_ms: u32,
    /// At or below this distance the Stop tier applies (cm).
    pub stop_threshold_cm: u32,
    /// At or below this distance (and above stop) the Caution tier applies (cm).
    pub caution_threshold_cm: u32,
    /// Longest wait for each echo edge before giving up (µs).
    pub echo_timeout_us: u32,

    // --- Buzzer ---
    pub tone_hz: u32,
    pub buzzer_policy: BuzzerPolicy,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            // Keypad
            secret: heapless::String::try_from(DEFAULT_SECRET).unwrap_or_default(),
            keypad_debounce_ms: 10,

            // Latch
            latch_open: LatchPositions { servo_a_deg: 10, servo_b_deg: 170 },
            latch_closed: LatchPositions { servo_a_deg: 87, servo_b_deg: 93 },

            // Button
            button_debounce_ms: 50,

            // Remote
            ir_policy: IrPolicy::AnyFrame,

            // Proximity
            sample_interval_ms: 200, // 5 Hz
            stop_threshold_cm: 10,
            caution_threshold_cm: 20,
            echo_timeout_us: 1_000_000,

            // Buzzer
            tone_hz: 1000,
            buzzer_policy: BuzzerPolicy::Arbitrated,
        }
    }
}

impl DoorConfig {
    /// Parse a JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot act on.  Out-of-range values are
    /// refused rather than clamped.
    pub fn validate(&self) -> Result<()> {
        if self.secret.is_empty() {
            return Err(Error::Config("secret must not be empty"));
        }
        if self.secret.chars().any(|c| c == SUBMIT_KEY || c == RESET_KEY) {
            return Err(Error::Config("secret must not contain '#' or '*'"));
        }
        for pos in [self.latch_open, self.latch_closed] {
            if pos.servo_a_deg > 180 || pos.servo_b_deg > 180 {
                return Err(Error::Config("latch angle above 180"));
            }
        }
        if self.stop_threshold_cm >= self.caution_threshold_cm {
            return Err(Error::Config("stop threshold must be below caution threshold"));
        }
        if self.sample_interval_ms == 0 {
            return Err(Error::Config("sample interval must be non-zero"));
        }
        if self.tone_hz == 0 {
            return Err(Error::Config("tone frequency must be non-zero"));
        }
        if self.echo_timeout_us == 0 {
            return Err(Error::Config("echo timeout must be non-zero"));
        }
        Ok(())
    }
}
