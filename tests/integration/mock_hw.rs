//! Mock hardware adapter for integration tests.
//!
//! Scripted inputs on the read side; every actuator and display call is
//! recorded so tests can assert on the full command history without
//! touching real GPIO/PWM registers.

use std::collections::VecDeque;

use doorguard::app::events::AppEvent;
use doorguard::app::ports::{ActuatorPort, DisplayPort, EventSink, InputPort};

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    SetLatch { a: u8, b: u8 },
    StartTone(u32),
    StopTone,
    SetLed { r: u8, g: u8, b: u8 },
    Show(String),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,

    pub keys: VecDeque<char>,
    pub button: bool,
    pub alarm: bool,
    pub ir_frames: VecDeque<u32>,
    held_ir: Option<u32>,
    pub resumes: u32,
    /// Echo width returned by every measurement; `None` = timeout.
    pub echo_us: Option<u32>,
    pub measurements: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            keys: VecDeque::new(),
            button: false,
            alarm: false,
            ir_frames: VecDeque::new(),
            held_ir: None,
            resumes: 0,
            echo_us: Some(echo_for_cm(100)),
            measurements: 0,
        }
    }

    pub fn type_keys(&mut self, keys: &str) {
        self.keys.extend(keys.chars());
    }

    pub fn set_distance_cm(&mut self, cm: u32) {
        self.echo_us = Some(echo_for_cm(cm));
    }

    pub fn latch_writes(&self) -> Vec<(u8, u8)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::SetLatch { a, b } => Some((*a, *b)),
                _ => None,
            })
            .collect()
    }

    pub fn tone_calls(&self) -> Vec<HwCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, HwCall::StartTone(_) | HwCall::StopTone))
            .cloned()
            .collect()
    }

    pub fn tone_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                HwCall::StartTone(_) => Some(true),
                HwCall::StopTone => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn led(&self) -> Option<(u8, u8, u8)> {
        self.calls.iter().rev().find_map(|c| match c {
            HwCall::SetLed { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        })
    }

    pub fn shown(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Show(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest echo width that converts back to `cm`.
pub fn echo_for_cm(cm: u32) -> u32 {
    (cm * 1000).div_ceil(17)
}

impl InputPort for MockHardware {
    fn poll_key(&mut self) -> Option<char> {
        self.keys.pop_front()
    }

    fn button_level(&mut self) -> bool {
        self.button
    }

    fn poll_ir(&mut self) -> Option<u32> {
        if self.held_ir.is_none() {
            self.held_ir = self.ir_frames.pop_front();
        }
        self.held_ir
    }

    fn resume_ir(&mut self) {
        self.held_ir = None;
        self.resumes += 1;
    }

    fn alarm_level(&mut self) -> bool {
        self.alarm
    }

    fn measure_echo_us(&mut self) -> Option<u32> {
        self.measurements += 1;
        self.echo_us
    }
}

impl ActuatorPort for MockHardware {
    fn set_latch(&mut self, servo_a_deg: u8, servo_b_deg: u8) {
        self.calls.push(HwCall::SetLatch { a: servo_a_deg, b: servo_b_deg });
    }

    fn start_tone(&mut self, hz: u32) {
        self.calls.push(HwCall::StartTone(hz));
    }

    fn stop_tone(&mut self) {
        self.calls.push(HwCall::StopTone);
    }

    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.calls.push(HwCall::SetLed { r, g, b });
    }
}

impl DisplayPort for MockHardware {
    fn show(&mut self, text: &str) {
        self.calls.push(HwCall::Show(text.to_owned()));
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Event sink that keeps every rendered log line.
pub struct LogSink {
    pub lines: Vec<String>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }

    pub fn count(&self, line: &str) -> usize {
        self.lines.iter().filter(|l| *l == line).count()
    }

    /// Lines mentioning the door, in order.
    pub fn door_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|l| l.starts_with("Door"))
            .map(String::as_str)
            .collect()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.lines.push(event.to_string());
    }
}
