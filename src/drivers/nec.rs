//! NEC infrared frame decoder.
//!
//! Pure state machine fed with receiver-output edges.  The demodulating
//! receiver (TSOP38238 or similar) idles HIGH and pulls LOW for a carrier
//! burst, so a LOW segment is a *mark* and a HIGH segment a *space*.
//!
//! ```text
//!  leader        bits (×32, MSB accumulated first)         stop
//!  ▁▁▁▁▁▁▁▁▁▔▔▔▔▔ ▁▔  ▁▔▔▔ ▁▔ ▁▔▔▔ …                        ▁
//!  9000   4500   562 562 562 1687                         562   (µs)
//!                 "0"     "1"
//!
//!  repeat: 9000 mark, 2250 space, 562 mark → REPEAT_CODE
//! ```
//!
//! All durations are matched with ±25 % tolerance.

/// Value reported for a held-button repeat frame.
pub const REPEAT_CODE: u32 = 0xFFFF_FFFF;

const LEADER_MARK_US: u32 = 9000;
const LEADER_SPACE_US: u32 = 4500;
const REPEAT_SPACE_US: u32 = 2250;
const BIT_MARK_US: u32 = 562;
const ZERO_SPACE_US: u32 = 562;
const ONE_SPACE_US: u32 = 1687;
const FRAME_BITS: u8 = 32;

fn matches(duration_us: u32, nominal_us: u32) -> bool {
    duration_us >= nominal_us * 3 / 4 && duration_us <= nominal_us * 5 / 4
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Idle,
    /// Leader mark seen, waiting for its space.
    Leader,
    /// Receiving data bits; `awaiting_space` alternates within each bit.
    Bits { count: u8, value: u32, awaiting_space: bool },
    /// All bits in, waiting for the stop mark.
    Stop { value: u32 },
    /// Repeat space seen, waiting for its stop mark.
    Repeat,
}

pub struct NecDecoder {
    state: DecodeState,
    last_edge_us: Option<u32>,
}

impl Default for NecDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NecDecoder {
    pub fn new() -> Self {
        Self {
            state: DecodeState::Idle,
            last_edge_us: None,
        }
    }

    /// Feed one edge.  `level` is the line level *after* the edge.
    /// Returns a frame when its final edge arrives.
    pub fn edge(&mut self, level: bool, at_us: u32) -> Option<u32> {
        let Some(prev_us) = self.last_edge_us.replace(at_us) else {
            return None;
        };
        let duration = at_us.wrapping_sub(prev_us);

        // Rising edge ends a mark, falling edge ends a space.
        if level {
            self.on_mark(duration)
        } else {
            self.on_space(duration);
            None
        }
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.state = DecodeState::Idle;
        self.last_edge_us = None;
    }

    fn on_mark(&mut self, duration: u32) -> Option<u32> {
        if matches(duration, LEADER_MARK_US) {
            self.state = DecodeState::Leader;
            return None;
        }

        match self.state {
            DecodeState::Bits { count, value, awaiting_space: false }
                if matches(duration, BIT_MARK_US) =>
            {
                self.state = DecodeState::Bits { count, value, awaiting_space: true };
                None
            }
            DecodeState::Stop { value } if matches(duration, BIT_MARK_US) => {
                self.state = DecodeState::Idle;
                Some(value)
            }
            DecodeState::Repeat if matches(duration, BIT_MARK_US) => {
                self.state = DecodeState::Idle;
                Some(REPEAT_CODE)
            }
            _ => {
                self.state = DecodeState::Idle;
                None
            }
        }
    }

    fn on_space(&mut self, duration: u32) {
        self.state = match self.state {
            DecodeState::Leader if matches(duration, LEADER_SPACE_US) => DecodeState::Bits {
                count: 0,
                value: 0,
                awaiting_space: false,
            },
            DecodeState::Leader if matches(duration, REPEAT_SPACE_US) => DecodeState::Repeat,
            DecodeState::Bits { count, value, awaiting_space: true } => {
                let bit = if matches(duration, ZERO_SPACE_US) {
                    0
                } else if matches(duration, ONE_SPACE_US) {
                    1
                } else {
                    self.state = DecodeState::Idle;
                    return;
                };
                let value = (value << 1) | bit;
                let count = count + 1;
                if count == FRAME_BITS {
                    DecodeState::Stop { value }
                } else {
                    DecodeState::Bits { count, value, awaiting_space: false }
                }
            }
            // Idle line, or a space where a mark was due.
            _ => DecodeState::Idle,
        };
    }
}
