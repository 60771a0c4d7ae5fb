//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns every driver and exposes them through [`InputPort`],
//! [`ActuatorPort`] and [`DisplayPort`].  This is the only module in the
//! system that touches actual hardware.  Driver failures are logged and
//! degrade to a neutral reading (no key, no frame, no echo) so the
//! control loop never stops.  On non-espidf targets the drivers land in
//! the hw_init simulation tables.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::adapters::time::SystemClock;
use crate::app::ports::{ActuatorPort, DisplayPort, InputPort, TimePort};
use crate::config::DoorConfig;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::hw_init::{self, BoardDelay, GpioPin};
use crate::drivers::ir_remote::IrReceiver;
use crate::drivers::keypad::KeypadScanner;
use crate::drivers::lcd::Lcd;
use crate::drivers::servo::Servo;
use crate::drivers::status_led::{LedWiring, StatusLed};
use crate::drivers::ultrasonic::Ultrasonic;
use crate::error::{Error, Result, SensorError};
use crate::pins;

type Keypad = KeypadScanner<GpioPin, GpioPin>;
type Ranger = Ultrasonic<GpioPin, GpioPin, BoardDelay, SystemClock>;
type Display = Lcd<GpioPin, BoardDelay>;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    clock: SystemClock,
    keypad: Keypad,
    button: GpioPin,
    alarm: GpioPin,
    ir: IrReceiver,
    ranger: Ranger,
    lcd: Display,
    servo_a: Servo,
    servo_b: Servo,
    buzzer: Buzzer,
    led: StatusLed,
}

impl HardwareAdapter {
    /// Build every driver on the pins in [`pins`].  Call after
    /// [`hw_init::init_peripherals`].
    pub fn new(config: &DoorConfig, clock: SystemClock) -> Result<Self> {
        let keypad = KeypadScanner::new(
            pins::KEYPAD_ROW_GPIOS.map(GpioPin),
            pins::KEYPAD_COL_GPIOS.map(GpioPin),
            config.keypad_debounce_ms,
        )?;
        let ranger = Ultrasonic::new(
            GpioPin(pins::ULTRASONIC_TRIG_GPIO),
            GpioPin(pins::ULTRASONIC_ECHO_GPIO),
            hw_init::board_delay(),
            clock,
            config.echo_timeout_us,
        );
        let lcd = Lcd::new(
            GpioPin(pins::LCD_RS_GPIO),
            GpioPin(pins::LCD_EN_GPIO),
            pins::LCD_DATA_GPIOS.map(GpioPin),
            hw_init::board_delay(),
        )?;

        Ok(Self {
            clock,
            keypad,
            button: GpioPin(pins::BUTTON_GPIO),
            alarm: GpioPin(pins::ALARM_GPIO),
            ir: IrReceiver::new(),
            ranger,
            lcd,
            servo_a: Servo::new(hw_init::LEDC_CH_SERVO_A),
            servo_b: Servo::new(hw_init::LEDC_CH_SERVO_B),
            buzzer: Buzzer::new(),
            led: StatusLed::new(LedWiring::CommonCathode),
        })
    }

    /// IR frames discarded because the previous one was still held.
    pub fn ir_frames_dropped(&self) -> u32 {
        self.ir.dropped()
    }
}

/// Log a driver failure; the caller carries on with a neutral value.
fn degrade(what: &str, result: Result<()>) {
    if let Err(e) = result {
        warn!("{what}: {e}");
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for HardwareAdapter {
    fn poll_key(&mut self) -> Option<char> {
        match self.keypad.poll(self.clock.uptime_ms()) {
            Ok(key) => key,
            Err(e) => {
                warn!("keypad: {e}");
                None
            }
        }
    }

    fn button_level(&mut self) -> bool {
        self.button.is_high().unwrap_or_default()
    }

    fn poll_ir(&mut self) -> Option<u32> {
        self.ir.decode()
    }

    fn resume_ir(&mut self) {
        self.ir.resume();
    }

    fn alarm_level(&mut self) -> bool {
        self.alarm.is_high().unwrap_or_default()
    }

    fn measure_echo_us(&mut self) -> Option<u32> {
        match self.ranger.measure_us() {
            Ok(us) => Some(us),
            Err(Error::Sensor(SensorError::EchoTimeout)) => None,
            Err(e) => {
                warn!("ultrasonic: {e}");
                None
            }
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_latch(&mut self, servo_a_deg: u8, servo_b_deg: u8) {
        degrade("servo A", self.servo_a.write(servo_a_deg));
        degrade("servo B", self.servo_b.write(servo_b_deg));
    }

    fn start_tone(&mut self, hz: u32) {
        degrade("buzzer", self.buzzer.start(hz));
    }

    fn stop_tone(&mut self) {
        degrade("buzzer", self.buzzer.stop());
    }

    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        degrade("status LED", self.led.set_colour(r, g, b));
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn show(&mut self, text: &str) {
        degrade("lcd", self.lcd.show(text));
    }
}
