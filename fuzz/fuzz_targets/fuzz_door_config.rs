//! Fuzz target: `DoorConfig::from_json`
//!
//! Arbitrary bytes into the config loader: it must never panic, and any
//! config it accepts must pass validation again and keep the secret
//! free of the submit/reset keys.
//!
//! cargo fuzz run fuzz_door_config

#![no_main]

use doorguard::config::DoorConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = DoorConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!(!config.secret.is_empty());
        assert!(!config.secret.contains('#') && !config.secret.contains('*'));
        assert!(config.stop_threshold_cm < config.caution_threshold_cm);
    }
});
