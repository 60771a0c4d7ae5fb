//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DoorController (domain)
//! ```
//!
//! Driven adapters (inputs, actuators, display, event sinks, clock)
//! implement these traits.  The [`DoorController`](super::service::DoorController)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  Ports are infallible: adapters log hardware errors and
//! degrade to a neutral reading.

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: every input source the control loop polls.
pub trait InputPort {
    /// Next debounced keypad symbol, if a key was pressed since the last call.
    fn poll_key(&mut self) -> Option<char>;

    /// Push-button level, `true` = pressed.
    fn button_level(&mut self) -> bool;

    /// Decoded IR frame waiting to be consumed, if any.  The same frame is
    /// returned until [`resume_ir`](Self::resume_ir) is called.
    fn poll_ir(&mut self) -> Option<u32>;

    /// Release the consumed IR frame so the receiver can decode the next.
    fn resume_ir(&mut self);

    /// External alarm input level, `true` = alarm.
    fn alarm_level(&mut self) -> bool;

    /// Trigger the ultrasonic ranger and return the echo pulse width in µs.
    /// `None` if the echo timed out.
    fn measure_echo_us(&mut self) -> Option<u32>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Move both latch servos to absolute angles (0–180°).
    fn set_latch(&mut self, servo_a_deg: u8, servo_b_deg: u8);

    /// Start a continuous tone at `hz`.
    fn start_tone(&mut self, hz: u32);

    /// Silence the buzzer.
    fn stop_tone(&mut self);

    /// Set the RGB status LED colour.
    fn set_led(&mut self, r: u8, g: u8, b: u8);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → LCD)
// ───────────────────────────────────────────────────────────────

/// Character display.  Truncation to the panel size is the adapter's job.
pub trait DisplayPort {
    /// Clear the display and write `text` from the home position.
    fn show(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`AppEvent`](super::events::AppEvent)s through this
/// port.  Adapters decide where they go (serial log, test recorder, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: system timer → domain / drivers)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait TimePort {
    /// Microseconds since boot.
    fn uptime_us(&self) -> u64;

    /// Milliseconds since boot, truncated to `u32` (wraps after ~49 days;
    /// compare with `wrapping_sub`).
    fn uptime_ms(&self) -> u32 {
        (self.uptime_us() / 1000) as u32
    }
}
