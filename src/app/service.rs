//! Door controller service, the hexagonal core.
//!
//! [`DoorController`] owns every piece of process-lifetime state: the door
//! latch, password buffer, button debouncer, proximity timer and latched
//! beep flag, and the buzzer arbiter.  All I/O flows through port traits
//! injected at call sites, making the entire controller testable with mock
//! adapters.
//!
//! ```text
//!     InputPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                   │        DoorController         │
//!  ActuatorPort ◀── │ Door · Password · Proximity  │
//!   DisplayPort ◀── │ Button · Remote · Arbiter    │
//!                   └──────────────────────────────┘
//! ```
//!
//! One [`tick`](DoorController::tick) per main-loop iteration runs the
//! stages strictly in order: keypad → button → remote → distance (when the
//! sample interval has elapsed) → external alarm → status LED.

use log::{debug, info};

use crate::alarm::{AlarmArbiter, AlarmReason, BuzzerCommand};
use crate::config::{BuzzerPolicy, DoorConfig, IrPolicy};
use crate::door::{Door, DoorState, Transition};
use crate::drivers::button::{ButtonDriver, ButtonEvent};
use crate::password::{GateAction, PasswordGate};
use crate::proximity::{self, BeepEdge, ProximityAlarm, ProximityReport, ProximityTier};

use super::events::{AppEvent, InputSource};
use super::ports::{ActuatorPort, DisplayPort, EventSink, InputPort};

/// Status LED colour while the door is closed.
pub const LED_CLOSED: (u8, u8, u8) = (255, 0, 0);
/// Status LED colour while the door is open.
pub const LED_OPEN: (u8, u8, u8) = (0, 255, 0);

// ───────────────────────────────────────────────────────────────
// DoorController
// ───────────────────────────────────────────────────────────────

/// The controller orchestrates all domain logic.
pub struct DoorController {
    door: Door,
    gate: PasswordGate,
    button: ButtonDriver,
    proximity: ProximityAlarm,
    arbiter: AlarmArbiter,
    ir_policy: IrPolicy,
    buzzer_policy: BuzzerPolicy,
    tone_hz: u32,
    /// Door state the status LED currently shows.
    led_shows: Option<DoorState>,
    tick_count: u64,
}

impl DoorController {
    /// Construct the controller from configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: &DoorConfig) -> Self {
        Self {
            door: Door::new(config.latch_open, config.latch_closed),
            gate: PasswordGate::new(config.secret.clone()),
            button: ButtonDriver::new(config.button_debounce_ms),
            proximity: ProximityAlarm::new(
                config.sample_interval_ms,
                config.stop_threshold_cm,
                config.caution_threshold_cm,
            ),
            arbiter: AlarmArbiter::new(),
            ir_policy: config.ir_policy,
            buzzer_policy: config.buzzer_policy,
            tone_hz: config.tone_hz,
            led_shows: None,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Home the latch to the closed position and light the status LED.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.door.home(hw);
        self.refresh_led(hw);
        sink.emit(&AppEvent::Started);
        info!("DoorController started ({:?})", self.door.state());
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one loop iteration.
    ///
    /// `hw` implements every hardware port; stages run in a fixed order.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl InputPort + ActuatorPort + DisplayPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Keypad
        if let Some(key) = hw.poll_key() {
            self.handle_key(key, hw, sink);
        }

        // 2. Button
        let level = hw.button_level();
        if let Some(ButtonEvent::Pressed) = self.button.tick(level, now_ms) {
            let t = self.door.toggle(hw);
            Self::report(t, InputSource::Button, sink);
        }

        // 3. Remote
        if let Some(code) = hw.poll_ir() {
            self.handle_ir(code, hw, sink);
            hw.resume_ir();
        }

        // 4. Proximity (interval-gated)
        if self.proximity.sample_due(now_ms) {
            let echo_us = hw.measure_echo_us().unwrap_or_else(|| {
                debug!("echo timeout, reading as 0 us");
                0
            });
            let report = self.proximity.evaluate(proximity::echo_to_cm(echo_us));
            self.apply_proximity(&report, hw, sink);
        }

        // 5. External alarm passthrough
        let alarm = hw.alarm_level();
        match self.buzzer_policy {
            BuzzerPolicy::Arbitrated => {
                self.arbiter.set(AlarmReason::External, alarm);
                if let Some(cmd) = self.arbiter.resolve() {
                    self.apply_buzzer(cmd, hw);
                }
            }
            BuzzerPolicy::LastWriteWins => {
                let cmd = if alarm { BuzzerCommand::Start } else { BuzzerCommand::Stop };
                self.apply_buzzer(cmd, hw);
            }
        }

        // 6. Status LED follows the door
        self.refresh_led(hw);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn door_state(&self) -> DoorState {
        self.door.state()
    }

    /// Keypad symbols entered since the last clear.
    pub fn entered(&self) -> &str {
        self.gate.entered()
    }

    /// Whether the proximity Stop-tier beep is latched on.
    pub fn proximity_beep_active(&self) -> bool {
        self.proximity.beep_active()
    }

    /// Whether the arbiter last commanded the buzzer on.  Always `false`
    /// under [`BuzzerPolicy::LastWriteWins`].
    pub fn buzzer_sounding(&self) -> bool {
        self.arbiter.is_sounding()
    }

    /// Loop iterations executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn handle_key(&mut self, key: char, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::KeyPressed(key));
        match self.gate.press(key, self.door.is_open()) {
            GateAction::Close => {
                let t = self.door.close(hw);
                Self::report(t, InputSource::Keypad, sink);
            }
            GateAction::Open => {
                let t = self.door.open(hw);
                Self::report(t, InputSource::Keypad, sink);
            }
            GateAction::Reset => sink.emit(&AppEvent::PasswordReset),
            GateAction::Rejected => sink.emit(&AppEvent::PasswordRejected),
            GateAction::Cleared | GateAction::Pending => {}
        }
    }

    fn handle_ir(&mut self, code: u32, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::IrCodeReceived(code));
        let accepted = match self.ir_policy {
            IrPolicy::AnyFrame => true,
            IrPolicy::MatchCode(expected) => code == expected,
        };
        if accepted {
            let t = self.door.toggle(hw);
            Self::report(t, InputSource::Remote, sink);
        } else {
            sink.emit(&AppEvent::IrCodeIgnored);
        }
    }

    fn apply_proximity(
        &mut self,
        report: &ProximityReport,
        hw: &mut (impl ActuatorPort + DisplayPort),
        sink: &mut impl EventSink,
    ) {
        hw.show(&report.display_text());
        if report.tier != ProximityTier::Stop {
            sink.emit(&AppEvent::Distance(report.distance_cm));
        }

        match self.buzzer_policy {
            BuzzerPolicy::Arbitrated => {
                match report.beep {
                    BeepEdge::Started => self.arbiter.set(AlarmReason::Proximity, true),
                    BeepEdge::Stopped => self.arbiter.set(AlarmReason::Proximity, false),
                    BeepEdge::Unchanged => {}
                }
                if report.silence {
                    self.arbiter.set(AlarmReason::Proximity, false);
                }
            }
            BuzzerPolicy::LastWriteWins => {
                match report.beep {
                    BeepEdge::Started => self.apply_buzzer(BuzzerCommand::Start, hw),
                    BeepEdge::Stopped => self.apply_buzzer(BuzzerCommand::Stop, hw),
                    BeepEdge::Unchanged => {}
                }
                if report.silence {
                    self.apply_buzzer(BuzzerCommand::Stop, hw);
                }
            }
        }
    }

    fn apply_buzzer(&self, cmd: BuzzerCommand, hw: &mut impl ActuatorPort) {
        match cmd {
            BuzzerCommand::Start => hw.start_tone(self.tone_hz),
            BuzzerCommand::Stop => hw.stop_tone(),
        }
    }

    fn refresh_led(&mut self, hw: &mut impl ActuatorPort) {
        let state = self.door.state();
        if self.led_shows == Some(state) {
            return;
        }
        let (r, g, b) = match state {
            DoorState::Closed => LED_CLOSED,
            DoorState::Open => LED_OPEN,
        };
        hw.set_led(r, g, b);
        self.led_shows = Some(state);
    }

    fn report(t: Transition, source: InputSource, sink: &mut impl EventSink) {
        let event = match t {
            Transition::Opened => AppEvent::DoorOpened(source),
            Transition::Closed => AppEvent::DoorClosed(source),
            Transition::AlreadyOpen => AppEvent::AlreadyOpen,
            Transition::AlreadyClosed => AppEvent::AlreadyClosed,
        };
        sink.emit(&event);
    }
}
