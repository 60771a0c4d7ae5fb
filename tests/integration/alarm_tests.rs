//! Integration tests for proximity sampling, the latched Stop-tier beep,
//! the external alarm passthrough and both buzzer policies.

use crate::mock_hw::{HwCall, LogSink, MockHardware};

use doorguard::app::service::DoorController;
use doorguard::config::{BuzzerPolicy, DoorConfig};

fn started(config: DoorConfig) -> (DoorController, MockHardware, LogSink) {
    let mut ctrl = DoorController::new(&config);
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    ctrl.start(&mut hw, &mut sink);
    hw.clear_calls();
    (ctrl, hw, sink)
}

fn last_writes_wins() -> DoorConfig {
    DoorConfig {
        buzzer_policy: BuzzerPolicy::LastWriteWins,
        ..DoorConfig::default()
    }
}

/// Feed one distance per sample interval, starting at the first due sample.
fn sample_series(
    ctrl: &mut DoorController,
    hw: &mut MockHardware,
    sink: &mut LogSink,
    distances_cm: &[u32],
) {
    for (i, &cm) in distances_cm.iter().enumerate() {
        hw.set_distance_cm(cm);
        ctrl.tick(200 * (i as u32 + 1), hw, sink);
    }
}

// ── Sampling ──────────────────────────────────────────────────

#[test]
fn distance_sampled_once_per_interval() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    for t in (0..200).step_by(10) {
        ctrl.tick(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.measurements, 0);

    ctrl.tick(200, &mut hw, &mut sink);
    ctrl.tick(250, &mut hw, &mut sink);
    assert_eq!(hw.measurements, 1);

    ctrl.tick(400, &mut hw, &mut sink);
    assert_eq!(hw.measurements, 2);
}

#[test]
fn sampling_survives_clock_wrap() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    ctrl.tick(u32::MAX - 50, &mut hw, &mut sink);
    assert_eq!(hw.measurements, 1);
    ctrl.tick(100, &mut hw, &mut sink);
    assert_eq!(hw.measurements, 1);
    ctrl.tick(150, &mut hw, &mut sink);
    assert_eq!(hw.measurements, 2);
}

#[test]
fn display_and_log_follow_tier() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    sample_series(&mut ctrl, &mut hw, &mut sink, &[15, 5, 5, 25]);

    assert_eq!(
        hw.shown(),
        vec!["Distance: 15 cm", "Stop!", "Stop!", "Distance: 25 cm"]
    );
    assert_eq!(sink.count("Distance: 15 cm"), 1);
    assert_eq!(sink.count("Distance: 25 cm"), 1);
    assert!(!sink.lines.iter().any(|l| l == "Distance: 5 cm"));
}

// ── Latched beep (arbitrated) ─────────────────────────────────

#[test]
fn beep_starts_once_and_stops_once() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    sample_series(&mut ctrl, &mut hw, &mut sink, &[15, 5, 5, 25]);

    assert_eq!(hw.tone_calls(), vec![HwCall::StartTone(1000), HwCall::StopTone]);
    assert!(!ctrl.proximity_beep_active());
    assert!(!ctrl.buzzer_sounding());
}

#[test]
fn close_object_twice_starts_tone_once() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    sample_series(&mut ctrl, &mut hw, &mut sink, &[8, 8]);

    assert_eq!(hw.tone_calls(), vec![HwCall::StartTone(1000)]);
    assert!(ctrl.proximity_beep_active());
}

#[test]
fn caution_tier_clears_latched_beep() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    sample_series(&mut ctrl, &mut hw, &mut sink, &[5, 15]);

    assert_eq!(hw.tone_calls(), vec![HwCall::StartTone(1000), HwCall::StopTone]);
}

#[test]
fn echo_timeout_reads_as_stop() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());
    hw.echo_us = None;
    ctrl.tick(200, &mut hw, &mut sink);

    assert_eq!(hw.shown(), vec!["Stop!"]);
    assert!(hw.tone_on());
}

#[test]
fn custom_tone_frequency() {
    let config = DoorConfig { tone_hz: 2500, ..DoorConfig::default() };
    let (mut ctrl, mut hw, mut sink) = started(config);
    sample_series(&mut ctrl, &mut hw, &mut sink, &[3]);
    assert_eq!(hw.tone_calls(), vec![HwCall::StartTone(2500)]);
}

// ── External alarm (arbitrated) ───────────────────────────────

#[test]
fn external_alarm_drives_tone_on_change_only() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());

    hw.alarm = true;
    for t in [0, 10, 20] {
        ctrl.tick(t, &mut hw, &mut sink);
    }
    hw.alarm = false;
    for t in [30, 40] {
        ctrl.tick(t, &mut hw, &mut sink);
    }

    assert_eq!(hw.tone_calls(), vec![HwCall::StartTone(1000), HwCall::StopTone]);
}

#[test]
fn released_alarm_keeps_proximity_beep() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());

    hw.alarm = true;
    ctrl.tick(0, &mut hw, &mut sink);
    hw.set_distance_cm(5);
    ctrl.tick(200, &mut hw, &mut sink);
    hw.alarm = false;
    ctrl.tick(210, &mut hw, &mut sink);

    assert!(hw.tone_on());
    assert!(ctrl.buzzer_sounding());
    assert_eq!(hw.tone_calls(), vec![HwCall::StartTone(1000)]);
}

#[test]
fn clear_distance_keeps_external_alarm() {
    let (mut ctrl, mut hw, mut sink) = started(DoorConfig::default());

    hw.alarm = true;
    sample_series(&mut ctrl, &mut hw, &mut sink, &[5, 50]);

    assert!(hw.tone_on());
    assert_eq!(hw.tone_calls(), vec![HwCall::StartTone(1000)]);
}

// ── Last write wins ───────────────────────────────────────────

#[test]
fn last_write_wins_alarm_overrides_proximity() {
    let (mut ctrl, mut hw, mut sink) = started(last_writes_wins());
    hw.set_distance_cm(5);
    ctrl.tick(200, &mut hw, &mut sink);

    // Proximity starts the tone, then the idle alarm line silences it.
    assert_eq!(hw.tone_calls(), vec![HwCall::StartTone(1000), HwCall::StopTone]);
    assert!(ctrl.proximity_beep_active());
    assert!(!hw.tone_on());
}

#[test]
fn last_write_wins_writes_every_iteration() {
    let (mut ctrl, mut hw, mut sink) = started(last_writes_wins());
    hw.alarm = true;
    for t in [0, 10, 20] {
        ctrl.tick(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.tone_calls(), vec![HwCall::StartTone(1000); 3]);
    assert!(!ctrl.buzzer_sounding());
}
