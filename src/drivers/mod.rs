//! Peripheral drivers and one-shot hardware initialisation.
//!
//! Bit-banged drivers (keypad, LCD, ultrasonic) are generic over
//! embedded-hal pins and delays; PWM drivers (servo, buzzer, status LED)
//! write LEDC channels through [`hw_init`].

pub mod button;
pub mod buzzer;
pub mod hw_init;
pub mod ir_remote;
pub mod keypad;
pub mod lcd;
pub mod nec;
pub mod servo;
pub mod status_led;
pub mod ultrasonic;
pub mod watchdog;

