//! 4×4 matrix keypad scanner.
//!
//! Rows are open outputs idling HIGH; columns are inputs with pull-ups.
//! A scan drives one row LOW at a time and reads the columns: a LOW
//! column means the key at that crossing is closed.
//!
//! ```text
//!          C0  C1  C2  C3
//!   R0 ──  1   2   3   A
//!   R1 ──  4   5   6   B
//!   R2 ──  7   8   9   C
//!   R3 ──  *   0   #   D
//! ```
//!
//! A key is reported once, on the scan where it has been the stable
//! reading for at least the debounce window.  Holding it produces
//! nothing more; it must be released (stably) before it reports again.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::{ActuatorError, Result, SensorError};

pub const KEYMAP: [[char; 4]; 4] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

pub struct KeypadScanner<R: OutputPin, C: InputPin> {
    rows: [R; 4],
    cols: [C; 4],
    debounce_ms: u32,
    /// Raw reading being timed, and when it was first seen.
    candidate: Option<char>,
    candidate_since_ms: u32,
    /// Last reading that survived the debounce window.
    stable: Option<char>,
}

impl<R: OutputPin, C: InputPin> KeypadScanner<R, C> {
    /// Take ownership of the matrix pins and park every row HIGH.
    pub fn new(mut rows: [R; 4], cols: [C; 4], debounce_ms: u32) -> Result<Self> {
        for row in &mut rows {
            row.set_high().map_err(|_| ActuatorError::GpioWriteFailed)?;
        }
        Ok(Self {
            rows,
            cols,
            debounce_ms,
            candidate: None,
            candidate_since_ms: 0,
            stable: None,
        })
    }

    /// Scan the matrix and return a newly pressed key, if any.
    pub fn poll(&mut self, now_ms: u32) -> Result<Option<char>> {
        let raw = self.scan()?;

        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since_ms = now_ms;
            return Ok(None);
        }

        if raw == self.stable || now_ms.wrapping_sub(self.candidate_since_ms) < self.debounce_ms {
            return Ok(None);
        }

        self.stable = raw;
        Ok(raw)
    }

    /// First closed key in row-major order, unfiltered.
    pub fn scan(&mut self) -> Result<Option<char>> {
        let mut found = None;
        for (r, keys) in KEYMAP.iter().enumerate() {
            self.rows[r].set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
            let mut hit = None;
            for (c, &key) in keys.iter().enumerate() {
                let low = self.cols[c].is_low().map_err(|_| SensorError::GpioReadFailed);
                match low {
                    Ok(true) => {
                        hit = Some(key);
                        break;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        // Never leave a row driven LOW.
                        let _ = self.rows[r].set_high();
                        return Err(e.into());
                    }
                }
            }
            self.rows[r].set_high().map_err(|_| ActuatorError::GpioWriteFailed)?;
            if hit.is_some() {
                found = hit;
                break;
            }
        }
        Ok(found)
    }
}
