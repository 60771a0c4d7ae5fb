//! Application core: pure domain logic, no I/O.
//!
//! This module contains the business rules for the door controller:
//! door latch state, keypad password gate, button and remote toggles,
//! proximity tiers and buzzer arbitration.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
