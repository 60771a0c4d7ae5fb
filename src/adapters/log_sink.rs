//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each application event's
//! human-readable line to the ESP-IDF logger (UART / USB-CDC in
//! production).  Distance samples go out at debug level since they
//! repeat every sample interval.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Distance(_) => debug!("{event}"),
            _ => info!("{event}"),
        }
    }
}
