//! HC-SR04 ultrasonic ranger.
//!
//! ```text
//!  TRIG  ▁▁▁▁▔▔▔▔▔▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁
//!            10 µs
//!  ECHO  ▁▁▁▁▁▁▁▁▁▁▁▁▁▔▔▔▔▔▔▔▔▔▔▔▔▁▁▁▁▁▁
//!                     │◀─ width ─▶│
//! ```
//!
//! Measurement follows the `pulseIn` contract: wait for any previous echo
//! to end, wait for the rising edge, then time the HIGH pulse.  Each wait
//! is bounded by the same timeout, counted from the start of the
//! measurement.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::TimePort;
use crate::error::{ActuatorError, Result, SensorError};

pub struct Ultrasonic<T: OutputPin, E: InputPin, D: DelayNs, C: TimePort> {
    trig: T,
    echo: E,
    delay: D,
    clock: C,
    timeout_us: u32,
}

impl<T: OutputPin, E: InputPin, D: DelayNs, C: TimePort> Ultrasonic<T, E, D, C> {
    pub fn new(trig: T, echo: E, delay: D, clock: C, timeout_us: u32) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
            timeout_us,
        }
    }

    /// Fire one ping and return the echo pulse width in µs.
    pub fn measure_us(&mut self) -> Result<u32> {
        self.trigger()?;

        let start = self.clock.uptime_us();
        self.wait_for(false, start)?;
        self.wait_for(true, start)?;
        let rise = self.clock.uptime_us();
        self.wait_for(false, start)?;
        let fall = self.clock.uptime_us();

        Ok(fall.saturating_sub(rise) as u32)
    }

    fn trigger(&mut self) -> Result<()> {
        self.trig.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.delay.delay_us(2);
        self.trig.set_high().map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.delay.delay_us(10);
        self.trig.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        Ok(())
    }

    /// Spin until ECHO reads `level` or the measurement window closes.
    fn wait_for(&mut self, level: bool, start: u64) -> Result<()> {
        loop {
            let high = self.echo.is_high().map_err(|_| SensorError::GpioReadFailed)?;
            if high == level {
                return Ok(());
            }
            if self.clock.uptime_us().saturating_sub(start) >= u64::from(self.timeout_us) {
                return Err(SensorError::EchoTimeout.into());
            }
        }
    }
}
