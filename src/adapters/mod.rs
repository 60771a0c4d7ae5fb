//! Concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                        |
//! |------------|---------------|------------------------------------|
//! | `hardware` | InputPort     | Keypad, button, alarm, IR, HC-SR04 |
//! |            | ActuatorPort  | Servos, buzzer, RGB LED (LEDC)     |
//! |            | DisplayPort   | HD44780 LCD                        |
//! | `log_sink` | EventSink     | Serial log output                  |
//! | `time`     | TimePort      | ESP32 system timer                 |

pub mod hardware;
pub mod log_sink;
pub mod time;
