//! Passive piezo buzzer on its own LEDC timer.
//!
//! A tone retunes the timer to the requested frequency and drives the
//! channel at 50 % duty; silence sets the duty to zero.  Repeated commands
//! for the state already playing do not touch the peripheral.

use log::debug;

use crate::drivers::hw_init;
use crate::error::Result;
use crate::pins;

const HALF_DUTY: u32 = 1 << (pins::BUZZER_DUTY_BITS - 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Sounding { hz: u32 },
}

pub struct Buzzer {
    state: BuzzerState,
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buzzer {
    pub fn new() -> Self {
        Self { state: BuzzerState::Silent }
    }

    pub fn start(&mut self, hz: u32) -> Result<()> {
        if self.state == (BuzzerState::Sounding { hz }) {
            return Ok(());
        }
        hw_init::ledc_set_freq(hw_init::LEDC_TIMER_BUZZER, hz)?;
        hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, HALF_DUTY)?;
        self.state = BuzzerState::Sounding { hz };
        debug!("buzzer: {} Hz", hz);
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        if self.state == BuzzerState::Silent {
            return Ok(());
        }
        hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, 0)?;
        self.state = BuzzerState::Silent;
        debug!("buzzer: silent");
        Ok(())
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }
}
