//! Doorguard firmware entry point.
//!
//! Hexagonal architecture around a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter              LogEventSink      SystemClock    │
//! │  (Input+Actuator+Display)     (EventSink)       (TimePort)     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              DoorController (pure logic)               │    │
//! │  │  Door · PasswordGate · Proximity · AlarmArbiter        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  IR edge ISR → lock-free ring · Task watchdog                  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{error, info, warn};

use doorguard::adapters::hardware::HardwareAdapter;
use doorguard::adapters::log_sink::LogEventSink;
use doorguard::adapters::time::SystemClock;
use doorguard::app::ports::TimePort;
use doorguard::app::service::DoorController;
use doorguard::config::DoorConfig;
use doorguard::drivers::{hw_init, watchdog::Watchdog};

/// Baked in at build time; `build.rs` reruns when it changes.
const CONFIG_JSON: &str = include_str!("../config/door.json");

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Doorguard v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Hardware peripherals ───────────────────────────────
    hw_init::init_peripherals()
        .map_err(|e| anyhow::anyhow!("peripheral init failed: {e}"))?;
    if let Err(e) = hw_init::init_isr_service() {
        // Without the edge ISR the remote is dead; the rest still works.
        error!("ISR service init failed: {}; continuing without IR remote", e);
    }

    // ── 3. Configuration ──────────────────────────────────────
    let config = match DoorConfig::from_json(CONFIG_JSON) {
        Ok(cfg) => {
            info!("Config loaded ({} ms sample interval)", cfg.sample_interval_ms);
            cfg
        }
        Err(e) => {
            warn!("Baked-in config rejected ({}), using defaults", e);
            DoorConfig::default()
        }
    };

    // ── 4. Adapters ───────────────────────────────────────────
    let clock = SystemClock::new();
    let mut hw = HardwareAdapter::new(&config, clock).context("hardware adapter")?;
    let mut sink = LogEventSink::new();

    // ── 5. Controller ─────────────────────────────────────────
    let mut controller = DoorController::new(&config);
    controller.start(&mut hw, &mut sink);

    let mut watchdog = Watchdog::default();

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        controller.tick(clock.uptime_ms(), &mut hw, &mut sink);
        watchdog.feed();
    }
}
