//! Doorguard firmware library.
//!
//! Exposes the pure-logic modules for integration testing and the
//! firmware binary.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;
pub mod door;
pub mod error;
pub mod password;
pub mod pins;
pub mod proximity;

pub mod adapters;
pub mod drivers;
