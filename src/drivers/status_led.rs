//! RGB status LED driver.
//!
//! Three LEDC PWM channels (CH3-5) drive a discrete RGB LED.  Common-anode
//! parts sink current through the pin, so their duty is inverted.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three LEDC PWM channels via hw_init.
//! On host/test: lands in the hw_init simulation table.

use crate::drivers::hw_init;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedWiring {
    CommonCathode,
    CommonAnode,
}

pub struct StatusLed {
    wiring: LedWiring,
    current: (u8, u8, u8),
}

impl StatusLed {
    pub fn new(wiring: LedWiring) -> Self {
        Self { wiring, current: (0, 0, 0) }
    }

    pub fn set_colour(&mut self, r: u8, g: u8, b: u8) -> Result<()> {
        let level = |v: u8| match self.wiring {
            LedWiring::CommonCathode => u32::from(v),
            LedWiring::CommonAnode => u32::from(255 - v),
        };
        hw_init::ledc_set(hw_init::LEDC_CH_LED_R, level(r))?;
        hw_init::ledc_set(hw_init::LEDC_CH_LED_G, level(g))?;
        hw_init::ledc_set(hw_init::LEDC_CH_LED_B, level(b))?;
        self.current = (r, g, b);
        Ok(())
    }

    pub fn current_colour(&self) -> (u8, u8, u8) {
        self.current
    }
}
