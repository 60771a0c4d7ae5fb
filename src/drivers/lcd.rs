//! HD44780 16×2 character LCD, 4-bit parallel mode.
//!
//! Write-only wiring (RW tied to GND), so every command is followed by a
//! fixed settle delay instead of a busy-flag poll.
//!
//! ```text
//!   RS ── register select (0 = command, 1 = data)
//!   EN ── latch strobe, data sampled on the falling edge
//!   D4..D7 ── high nibble first, then low nibble
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::{ActuatorError, Result};

pub const COLS: usize = 16;
pub const ROWS: usize = 2;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

const ROW_OFFSETS: [u8; ROWS] = [0x00, 0x40];

pub struct Lcd<P: OutputPin, D: DelayNs> {
    rs: P,
    en: P,
    data: [P; 4],
    delay: D,
}

impl<P: OutputPin, D: DelayNs> Lcd<P, D> {
    /// Run the 4-bit initialisation-by-instruction sequence and leave the
    /// display on, cleared, cursor hidden.
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Result<Self> {
        let mut lcd = Self { rs, en, data, delay };
        lcd.init()?;
        Ok(lcd)
    }

    fn init(&mut self) -> Result<()> {
        self.delay.delay_ms(50);
        self.rs.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.en.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;

        // Controller may be in 8-bit mode or mid-nibble; force a known state.
        self.write_nibble(0x03)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE_INC)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<()> {
        let offset = ROW_OFFSETS[usize::from(row).min(ROWS - 1)];
        self.command(CMD_SET_DDRAM | (offset + col.min(COLS as u8 - 1)))
    }

    /// Write ASCII text at the cursor.  Anything else prints as `?`.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() && !ch.is_ascii_control() { ch as u8 } else { b'?' };
            self.send(byte, true)?;
        }
        Ok(())
    }

    /// Clear and write `text`: the first 16 characters on row 0, the next
    /// 16 on row 1, the rest dropped.
    pub fn show(&mut self, text: &str) -> Result<()> {
        self.clear()?;
        let split = text.char_indices().nth(COLS).map_or(text.len(), |(i, _)| i);
        let (top, rest) = text.split_at(split);
        self.write_str(top)?;
        if !rest.is_empty() {
            let end = rest.char_indices().nth(COLS).map_or(rest.len(), |(i, _)| i);
            self.set_cursor(0, 1)?;
            self.write_str(&rest[..end])?;
        }
        Ok(())
    }

    fn command(&mut self, value: u8) -> Result<()> {
        self.send(value, false)
    }

    fn send(&mut self, value: u8, data: bool) -> Result<()> {
        self.rs.set_state(data.into()).map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.write_nibble(value >> 4)?;
        self.write_nibble(value & 0x0F)
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<()> {
        for (i, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(((nibble >> i) & 1 == 1).into())
                .map_err(|_| ActuatorError::GpioWriteFailed)?;
        }
        self.en.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.delay.delay_us(1);
        self.en.set_high().map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.delay.delay_us(1);
        self.en.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        // Commands need > 37 µs to settle.
        self.delay.delay_us(100);
        Ok(())
    }
}
