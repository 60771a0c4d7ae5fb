//! One-shot hardware peripheral initialization and raw pin access.
//!
//! Configures GPIO directions, the three LEDC timers with their channels,
//! and the IR receiver edge interrupt using raw ESP-IDF sys calls.  Called
//! once from `main()` before the control loop starts.
//!
//! | LEDC timer | Freq          | Bits | Channels                |
//! |------------|---------------|------|-------------------------|
//! | 0          | 50 Hz         | 14   | CH0 servo A, CH1 servo B|
//! | 1          | tone (varies) | 10   | CH2 buzzer              |
//! | 2          | 1 kHz         | 8    | CH3–5 LED R/G/B         |
//!
//! On host builds every call lands in an in-memory simulation table so the
//! drivers above can be exercised without a board.

use core::convert::Infallible;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

use crate::error::{ActuatorError, Error, Result};
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::GpioConfigFailed(_) => Self::Init("GPIO config"),
            HwInitError::LedcInitFailed(_) => Self::Init("LEDC config"),
            HwInitError::IsrInstallFailed(_) => Self::Init("ISR service"),
        }
    }
}

// ── LEDC channel / timer map ──────────────────────────────────

pub const LEDC_TIMER_SERVO: u32 = 0;
pub const LEDC_TIMER_BUZZER: u32 = 1;
pub const LEDC_TIMER_LED: u32 = 2;

pub const LEDC_CH_SERVO_A: u32 = 0;
pub const LEDC_CH_SERVO_B: u32 = 1;
pub const LEDC_CH_BUZZER: u32 = 2;
pub const LEDC_CH_LED_R: u32 = 3;
pub const LEDC_CH_LED_G: u32 = 4;
pub const LEDC_CH_LED_B: u32 = 5;

#[cfg(not(target_os = "espidf"))]
const LEDC_CHANNELS: usize = 6;
#[cfg(not(target_os = "espidf"))]
const LEDC_TIMERS: usize = 3;

/// Initial buzzer timer frequency; replaced on every tone start.
const BUZZER_IDLE_FREQ_HZ: u32 = 1_000;

// ── Entry point ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> core::result::Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> core::result::Result<(), HwInitError> {
    // Pulled-up inputs idle HIGH.
    for &pin in pins::KEYPAD_COL_GPIOS.iter().chain([&pins::IR_RECEIVER_GPIO]) {
        sim_set_level(pin, true);
    }
    for &pin in &pins::KEYPAD_ROW_GPIOS {
        sim_set_level(pin, true);
    }
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn config_input(pin: i32, pull_up: bool, pull_down: bool) -> core::result::Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: if pull_up { gpio_pullup_t_GPIO_PULLUP_ENABLE } else { gpio_pullup_t_GPIO_PULLUP_DISABLE },
        pull_down_en: if pull_down { gpio_pulldown_t_GPIO_PULLDOWN_ENABLE } else { gpio_pulldown_t_GPIO_PULLDOWN_DISABLE },
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> core::result::Result<(), HwInitError> {
    for &pin in &pins::KEYPAD_COL_GPIOS {
        unsafe { config_input(pin, true, false)? };
    }
    unsafe {
        config_input(pins::BUTTON_GPIO, false, true)?;
        config_input(pins::ALARM_GPIO, false, true)?;
        config_input(pins::ULTRASONIC_ECHO_GPIO, false, false)?;
        config_input(pins::IR_RECEIVER_GPIO, true, false)?;
    }
    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim_level(pin)
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> core::result::Result<(), HwInitError> {
    let outputs = pins::KEYPAD_ROW_GPIOS
        .iter()
        .chain(&pins::LCD_DATA_GPIOS)
        .chain(&[pins::ULTRASONIC_TRIG_GPIO, pins::LCD_RS_GPIO, pins::LCD_EN_GPIO]);

    for &pin in outputs {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    // Idle keypad rows HIGH so no column reads as pressed.
    for &pin in &pins::KEYPAD_ROW_GPIOS {
        unsafe { gpio_set_level(pin, 1) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim_set_level(pin, high);
}

// ── embedded-hal pin and delay ────────────────────────────────

/// A configured GPIO, usable wherever an embedded-hal digital pin is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioPin(pub i32);

impl embedded_hal::digital::ErrorType for GpioPin {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for GpioPin {
    fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(gpio_read(self.0))
    }

    fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(!gpio_read(self.0))
    }
}

impl embedded_hal::digital::OutputPin for GpioPin {
    fn set_low(&mut self) -> core::result::Result<(), Infallible> {
        gpio_write(self.0, false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Infallible> {
        gpio_write(self.0, true);
        Ok(())
    }
}

/// ROM busy-wait delay on target.
#[cfg(target_os = "espidf")]
pub type BoardDelay = esp_idf_hal::delay::Ets;

/// Host builds never wait.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardDelay;

#[cfg(not(target_os = "espidf"))]
impl embedded_hal::delay::DelayNs for BoardDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[cfg(target_os = "espidf")]
pub fn board_delay() -> BoardDelay {
    esp_idf_hal::delay::Ets
}

#[cfg(not(target_os = "espidf"))]
pub fn board_delay() -> BoardDelay {
    BoardDelay
}

// ── LEDC PWM ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> core::result::Result<(), HwInitError> {
    let timers = [
        (ledc_timer_t_LEDC_TIMER_0, pins::SERVO_DUTY_BITS, pins::SERVO_PWM_FREQ_HZ),
        (ledc_timer_t_LEDC_TIMER_1, pins::BUZZER_DUTY_BITS, BUZZER_IDLE_FREQ_HZ),
        (ledc_timer_t_LEDC_TIMER_2, pins::LED_DUTY_BITS, pins::LED_PWM_FREQ_HZ),
    ];
    for (timer_num, bits, freq_hz) in timers {
        let cfg = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            timer_num,
            duty_resolution: bits,
            freq_hz,
            clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        // SAFETY: Called from single main-task context via init_peripherals().
        let ret = unsafe { ledc_timer_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }
    }

    let channels = [
        (LEDC_CH_SERVO_A, LEDC_TIMER_SERVO, pins::SERVO_A_GPIO),
        (LEDC_CH_SERVO_B, LEDC_TIMER_SERVO, pins::SERVO_B_GPIO),
        (LEDC_CH_BUZZER, LEDC_TIMER_BUZZER, pins::BUZZER_GPIO),
        (LEDC_CH_LED_R, LEDC_TIMER_LED, pins::LED_R_GPIO),
        (LEDC_CH_LED_G, LEDC_TIMER_LED, pins::LED_G_GPIO),
        (LEDC_CH_LED_B, LEDC_TIMER_LED, pins::LED_B_GPIO),
    ];
    for (channel, timer_sel, gpio_num) in channels {
        let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            timer_sel,
            gpio_num,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        }) };
        if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }
    }

    info!("hw_init: LEDC configured (servo=CH0-1, buzzer=CH2, led=CH3-5)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u32) -> Result<()> {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only main loop calls this function.
    let ret = unsafe {
        let ret = esp_idf_svc::sys::ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty);
        if ret == ESP_OK as i32 {
            esp_idf_svc::sys::ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel)
        } else {
            ret
        }
    };
    if ret != ESP_OK as i32 {
        return Err(ActuatorError::PwmWriteFailed.into());
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(channel: u32, duty: u32) -> Result<()> {
    let slot = SIM_DUTY.get(channel as usize).ok_or(ActuatorError::PwmWriteFailed)?;
    slot.store(duty, Ordering::Relaxed);
    Ok(())
}

/// Retune an LEDC timer.  Channels on it keep their duty value.
#[cfg(target_os = "espidf")]
pub fn ledc_set_freq(timer: u32, freq_hz: u32) -> Result<()> {
    // SAFETY: timer configured in init_ledc(); main loop only.
    let ret = unsafe {
        esp_idf_svc::sys::ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, timer, freq_hz)
    };
    if ret != ESP_OK as i32 {
        return Err(ActuatorError::PwmWriteFailed.into());
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set_freq(timer: u32, freq_hz: u32) -> Result<()> {
    let slot = SIM_FREQ.get(timer as usize).ok_or(ActuatorError::PwmWriteFailed)?;
    slot.store(freq_hz, Ordering::Relaxed);
    Ok(())
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn ir_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: esp_timer_get_time and gpio_get_level are register reads;
    // safe in ISR context.
    let at_us = unsafe { esp_timer_get_time() } as u32;
    let level = unsafe { gpio_get_level(pins::IR_RECEIVER_GPIO) } != 0;
    crate::drivers::ir_remote::record_edge(at_us, level);
}

/// Install the per-pin GPIO ISR service and register the IR edge handler.
/// Call after init_peripherals() and before the control loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> core::result::Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable).  The handler only pushes
    // to the lock-free edge ring.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        // IR receiver: every edge is part of a frame.
        gpio_set_intr_type(pins::IR_RECEIVER_GPIO, gpio_int_type_t_GPIO_INTR_ANYEDGE);
        let ret = gpio_isr_handler_add(pins::IR_RECEIVER_GPIO, Some(ir_gpio_isr), core::ptr::null_mut());
        if ret != ESP_OK {
            return Err(HwInitError::IsrInstallFailed(ret));
        }
        gpio_intr_enable(pins::IR_RECEIVER_GPIO);
    }
    info!("hw_init: ISR service installed (ir)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> core::result::Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}

// ── Simulation tables (host only) ─────────────────────────────

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[cfg(not(target_os = "espidf"))]
const SIM_GPIO_COUNT: usize = 49;

#[cfg(not(target_os = "espidf"))]
static SIM_LEVELS: [AtomicBool; SIM_GPIO_COUNT] = [const { AtomicBool::new(false) }; SIM_GPIO_COUNT];
#[cfg(not(target_os = "espidf"))]
static SIM_DUTY: [AtomicU32; LEDC_CHANNELS] = [const { AtomicU32::new(0) }; LEDC_CHANNELS];
#[cfg(not(target_os = "espidf"))]
static SIM_FREQ: [AtomicU32; LEDC_TIMERS] = [
    AtomicU32::new(pins::SERVO_PWM_FREQ_HZ),
    AtomicU32::new(BUZZER_IDLE_FREQ_HZ),
    AtomicU32::new(pins::LED_PWM_FREQ_HZ),
];

/// Drive a simulated pin level (test helper).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: i32, high: bool) {
    if let Some(slot) = usize::try_from(pin).ok().and_then(|i| SIM_LEVELS.get(i)) {
        slot.store(high, Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_level(pin: i32) -> bool {
    usize::try_from(pin)
        .ok()
        .and_then(|i| SIM_LEVELS.get(i))
        .is_some_and(|slot| slot.load(Ordering::Relaxed))
}

/// Last duty written to an LEDC channel (test helper).
#[cfg(not(target_os = "espidf"))]
pub fn sim_duty(channel: u32) -> u32 {
    SIM_DUTY.get(channel as usize).map_or(0, |d| d.load(Ordering::Relaxed))
}

/// Current frequency of an LEDC timer (test helper).
#[cfg(not(target_os = "espidf"))]
pub fn sim_freq(timer: u32) -> u32 {
    SIM_FREQ.get(timer as usize).map_or(0, |f| f.load(Ordering::Relaxed))
}
