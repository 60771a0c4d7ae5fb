//! GPIO / peripheral pin assignments for the door controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! Assignments avoid the ESP32-S3 strapping pins (0, 3, 45, 46), the USB
//! pair (19, 20) and the flash/PSRAM bus (26–37).

// ---------------------------------------------------------------------------
// 4×4 membrane keypad
// ---------------------------------------------------------------------------

/// Row lines, driven LOW one at a time during a scan.
pub const KEYPAD_ROW_GPIOS: [i32; 4] = [4, 5, 6, 7];
/// Column lines, inputs with internal pull-up.  LOW = key closed.
pub const KEYPAD_COL_GPIOS: [i32; 4] = [15, 16, 17, 18];

// ---------------------------------------------------------------------------
// Digital inputs
// ---------------------------------------------------------------------------

/// Door toggle push-button.  Active HIGH (external pull-down).
pub const BUTTON_GPIO: i32 = 8;
/// External alarm line from the intrusion panel.  HIGH = alarm.
pub const ALARM_GPIO: i32 = 9;
/// Demodulating IR receiver output (TSOP38238).  Idles HIGH.
pub const IR_RECEIVER_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// HC-SR04 ultrasonic ranger
// ---------------------------------------------------------------------------

pub const ULTRASONIC_TRIG_GPIO: i32 = 11;
/// Echo is 5 V on the module; routed through a 1k/2k divider.
pub const ULTRASONIC_ECHO_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// HD44780 16×2 LCD (4-bit, RW tied to GND)
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 13;
pub const LCD_EN_GPIO: i32 = 14;
/// D4, D5, D6, D7.
pub const LCD_DATA_GPIOS: [i32; 4] = [21, 38, 39, 40];

// ---------------------------------------------------------------------------
// PWM outputs
// ---------------------------------------------------------------------------

/// Latch servos (SG90).
pub const SERVO_A_GPIO: i32 = 41;
pub const SERVO_B_GPIO: i32 = 42;

/// Passive piezo buzzer.
pub const BUZZER_GPIO: i32 = 47;

/// Discrete RGB status LED, common cathode.
pub const LED_R_GPIO: i32 = 1;
pub const LED_G_GPIO: i32 = 2;
pub const LED_B_GPIO: i32 = 48;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Hobby-servo frame rate (20 ms period).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// Servo timer resolution.  14-bit gives ~1.2 µs per step at 50 Hz.
pub const SERVO_DUTY_BITS: u32 = 14;
/// Pulse width at 0°.
pub const SERVO_MIN_PULSE_US: u32 = 544;
/// Pulse width at 180°.
pub const SERVO_MAX_PULSE_US: u32 = 2400;

/// Buzzer timer resolution; the tone frequency is set per start.
pub const BUZZER_DUTY_BITS: u32 = 10;

/// LEDC frequency for RGB status LED (1 kHz, 8-bit).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
pub const LED_DUTY_BITS: u32 = 8;
