//! Hobby-servo driver on a 50 Hz LEDC channel.
//!
//! Pulse width maps linearly from 544 µs at 0° to 2400 µs at 180°.

use crate::drivers::hw_init;
use crate::error::Result;
use crate::pins;

const PERIOD_US: u32 = 1_000_000 / pins::SERVO_PWM_FREQ_HZ;
const DUTY_FULL_SCALE: u32 = 1 << pins::SERVO_DUTY_BITS;

/// Pulse width for `angle` degrees (clamped to 180).
pub fn pulse_us(angle: u8) -> u32 {
    let angle = u32::from(angle.min(180));
    pins::SERVO_MIN_PULSE_US + angle * (pins::SERVO_MAX_PULSE_US - pins::SERVO_MIN_PULSE_US) / 180
}

/// LEDC duty value for `angle` degrees.
pub fn angle_to_duty(angle: u8) -> u32 {
    pulse_us(angle) * DUTY_FULL_SCALE / PERIOD_US
}

pub struct Servo {
    channel: u32,
    angle: Option<u8>,
}

impl Servo {
    /// A servo on an LEDC channel of the servo timer.  Unpowered until the
    /// first [`write`](Self::write).
    pub fn new(channel: u32) -> Self {
        Self { channel, angle: None }
    }

    pub fn write(&mut self, angle: u8) -> Result<()> {
        let angle = angle.min(180);
        hw_init::ledc_set(self.channel, angle_to_duty(angle))?;
        self.angle = Some(angle);
        Ok(())
    }

    /// Last commanded angle.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}
