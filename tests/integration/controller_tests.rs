//! Integration tests for the input → DoorController → latch pipeline:
//! keypad password gate, push-button and IR remote toggles, status LED.

use crate::mock_hw::{HwCall, LogSink, MockHardware};

use doorguard::app::service::{DoorController, LED_CLOSED, LED_OPEN};
use doorguard::config::{DoorConfig, IrPolicy};
use doorguard::door::DoorState;

const OPEN: (u8, u8) = (10, 170);
const CLOSED: (u8, u8) = (87, 93);

fn started(config: DoorConfig) -> (DoorController, MockHardware, LogSink) {
    let mut ctrl = DoorController::new(&config);
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    ctrl.start(&mut hw, &mut sink);
    (ctrl, hw, sink)
}

/// One tick per queued key, all before the first distance sample.
fn drain_keys(ctrl: &mut DoorController, hw: &mut MockHardware, sink: &mut LogSink) {
    let mut now = 0;
    while !hw.keys.is_empty() {
        ctrl.tick(now, hw, sink);
        now += 10;
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_homes_latch_closed_and_lights_red() {
    let (ctrl, hw, sink) = started(DoorConfig::default());

    assert_eq!(ctrl.door_state(), DoorState::Closed);
    assert_eq!(hw.latch_writes(), vec![CLOSED]);
    assert_eq!(hw.led(), Some(LED_CLOSED));
    assert_eq!(sink.lines, vec!["Setup complete. Door is initially closed."]);
}

// ── Keypad ────────────────────────────────────────────────────

#[test]
fn correct_code_opens_once() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    hw.clear_calls();

    hw.type_keys("1234");
    drain_keys(&mut ctrl, &mut hw, &mut sink);

    assert_eq!(ctrl.door_state(), DoorState::Open);
    assert_eq!(ctrl.entered(), "");
    assert_eq!(hw.latch_writes(), vec![OPEN]);
    assert_eq!(sink.door_lines(), vec!["Door Opened via Keypad"]);
    assert!(sink.contains("Keypad Key Pressed: 4"));
    assert_eq!(hw.led(), Some(LED_OPEN));
}

#[test]
fn wrong_code_rejected_and_buffer_reset() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    hw.clear_calls();

    hw.type_keys("9999");
    drain_keys(&mut ctrl, &mut hw, &mut sink);

    assert_eq!(ctrl.door_state(), DoorState::Closed);
    assert_eq!(ctrl.entered(), "");
    assert!(hw.latch_writes().is_empty());
    assert_eq!(
        sink.count("Incorrect Password or Door Already Open via Keypad"),
        1
    );
}

#[test]
fn partial_entry_stays_buffered() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    hw.type_keys("12");
    drain_keys(&mut ctrl, &mut hw, &mut sink);
    assert_eq!(ctrl.entered(), "12");
    assert_eq!(ctrl.door_state(), DoorState::Closed);
}

#[test]
fn correct_code_while_open_is_rejected() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    hw.type_keys("12341234");
    drain_keys(&mut ctrl, &mut hw, &mut sink);

    assert_eq!(ctrl.door_state(), DoorState::Open);
    assert_eq!(sink.door_lines(), vec!["Door Opened via Keypad"]);
    assert_eq!(
        sink.count("Incorrect Password or Door Already Open via Keypad"),
        1
    );
}

#[test]
fn hash_closes_open_door() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    hw.type_keys("1234#");
    drain_keys(&mut ctrl, &mut hw, &mut sink);

    assert_eq!(ctrl.door_state(), DoorState::Closed);
    assert_eq!(
        sink.door_lines(),
        vec!["Door Opened via Keypad", "Door Closed via Keypad"]
    );
    assert_eq!(hw.latch_writes(), vec![CLOSED, OPEN, CLOSED]);
    assert_eq!(hw.led(), Some(LED_CLOSED));
}

#[test]
fn hash_while_closed_only_clears_buffer() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    hw.clear_calls();
    hw.type_keys("12#");
    drain_keys(&mut ctrl, &mut hw, &mut sink);

    assert_eq!(ctrl.entered(), "");
    assert!(hw.latch_writes().is_empty());
    assert!(sink.door_lines().is_empty());
    assert!(!sink.contains("Door is already closed."));
}

#[test]
fn star_resets_entry() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    hw.type_keys("12*1234");
    drain_keys(&mut ctrl, &mut hw, &mut sink);

    assert!(sink.contains("Password Input Reset via Keypad"));
    assert_eq!(ctrl.door_state(), DoorState::Open);
}

#[test]
fn custom_secret_from_config() {
    let config = DoorConfig::from_json(r#"{ "secret": "A0B" }"#).unwrap();
    let (mut ctrl, mut hw, mut sink) = started(config);
    hw.type_keys("123");
    drain_keys(&mut ctrl, &mut hw, &mut sink);
    assert_eq!(ctrl.door_state(), DoorState::Closed);

    hw.type_keys("A0B");
    drain_keys(&mut ctrl, &mut hw, &mut sink);
    assert_eq!(ctrl.door_state(), DoorState::Open);
}

// ── Button ────────────────────────────────────────────────────

#[test]
fn button_toggles_once_per_press() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());

    hw.button = true;
    ctrl.tick(0, &mut hw, &mut sink);
    // Held: no repeat.
    ctrl.tick(100, &mut hw, &mut sink);
    ctrl.tick(150, &mut hw, &mut sink);
    assert_eq!(ctrl.door_state(), DoorState::Open);

    hw.button = false;
    ctrl.tick(160, &mut hw, &mut sink);
    hw.button = true;
    ctrl.tick(220, &mut hw, &mut sink);

    assert_eq!(ctrl.door_state(), DoorState::Closed);
    assert_eq!(
        sink.door_lines(),
        vec!["Door Opened by Button", "Door Closed by Button"]
    );
}

#[test]
fn button_bounce_inside_lockout_is_ignored() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());

    hw.button = true;
    ctrl.tick(0, &mut hw, &mut sink);
    hw.button = false;
    ctrl.tick(5, &mut hw, &mut sink);
    hw.button = true;
    ctrl.tick(10, &mut hw, &mut sink);
    hw.button = false;
    ctrl.tick(20, &mut hw, &mut sink);
    hw.button = true;
    ctrl.tick(30, &mut hw, &mut sink);

    assert_eq!(ctrl.door_state(), DoorState::Open);
    assert_eq!(sink.door_lines(), vec!["Door Opened by Button"]);
}

// ── IR remote ─────────────────────────────────────────────────

#[test]
fn any_frame_toggles_by_default() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    hw.ir_frames.extend([0x00FF_A25D, 0x1234_5678]);

    ctrl.tick(0, &mut hw, &mut sink);
    assert_eq!(ctrl.door_state(), DoorState::Open);
    ctrl.tick(10, &mut hw, &mut sink);
    assert_eq!(ctrl.door_state(), DoorState::Closed);
    ctrl.tick(20, &mut hw, &mut sink);

    assert_eq!(hw.resumes, 2);
    assert!(sink.contains("IR Code Received: FFA25D"));
    assert!(sink.contains("IR Code Received: 12345678"));
    assert_eq!(
        sink.door_lines(),
        vec!["Door Opened by IR Remote", "Door Closed by IR Remote"]
    );
}

#[test]
fn match_code_ignores_other_frames() {
    let config = DoorConfig {
        ir_policy: IrPolicy::MatchCode(0x00FF_A25D),
        ..DoorConfig::default()
    };
    let (mut ctrl, mut hw, mut sink) = started(config);
    hw.ir_frames.extend([0x00FF_629D, 0x00FF_A25D]);

    ctrl.tick(0, &mut hw, &mut sink);
    assert_eq!(ctrl.door_state(), DoorState::Closed);
    assert!(sink.contains("IR Code not recognized or door in target state already"));

    ctrl.tick(10, &mut hw, &mut sink);
    assert_eq!(ctrl.door_state(), DoorState::Open);
    assert_eq!(hw.resumes, 2);
}

#[test]
fn repeat_frame_toggles_under_any_frame() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    hw.ir_frames.push_back(0xFFFF_FFFF);
    ctrl.tick(0, &mut hw, &mut sink);
    assert_eq!(ctrl.door_state(), DoorState::Open);
    assert!(sink.contains("IR Code Received: FFFFFFFF"));
}

// ── Stage ordering and LED ────────────────────────────────────

#[test]
fn keypad_runs_before_button_in_one_tick() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    hw.type_keys("1");
    hw.button = true;
    ctrl.tick(0, &mut hw, &mut sink);

    let key = sink.lines.iter().position(|l| l == "Keypad Key Pressed: 1");
    let door = sink.lines.iter().position(|l| l == "Door Opened by Button");
    assert!(key.is_some() && key < door);
}

#[test]
fn led_written_only_on_change() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    for t in 0..10 {
        ctrl.tick(t, &mut hw, &mut sink);
    }
    let leds = hw
        .calls
        .iter()
        .filter(|c| matches!(c, HwCall::SetLed { .. }))
        .count();
    assert_eq!(leds, 1);
    assert_eq!(ctrl.tick_count(), 10);
}
