//! Outbound application events.
//!
//! The [`DoorController`](super::service::DoorController) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  `Display`
//! renders the human-readable log line for each.

use core::fmt;

/// Which input caused a door transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Keypad,
    Button,
    Remote,
}

/// Events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started; the door is closed.
    Started,

    /// A keypad symbol was read.
    KeyPressed(char),

    DoorOpened(InputSource),
    DoorClosed(InputSource),

    /// `open()` on an open door.
    AlreadyOpen,
    /// `close()` on a closed door.
    AlreadyClosed,

    /// `*` cleared the password buffer.
    PasswordReset,
    /// Full-length entry did not open the door.
    PasswordRejected,

    /// An IR frame was decoded.
    IrCodeReceived(u32),
    /// The frame did not match the configured code.
    IrCodeIgnored,

    /// A Caution/Clear tier distance sample (cm).
    Distance(u32),
}

impl fmt::Display for AppEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "Setup complete. Door is initially closed."),
            Self::KeyPressed(key) => write!(f, "Keypad Key Pressed: {key}"),
            Self::DoorOpened(InputSource::Keypad) => write!(f, "Door Opened via Keypad"),
            Self::DoorClosed(InputSource::Keypad) => write!(f, "Door Closed via Keypad"),
            Self::DoorOpened(InputSource::Remote) => write!(f, "Door Opened by IR Remote"),
            Self::DoorClosed(InputSource::Remote) => write!(f, "Door Closed by IR Remote"),
            Self::DoorOpened(InputSource::Button) => write!(f, "Door Opened by Button"),
            Self::DoorClosed(InputSource::Button) => write!(f, "Door Closed by Button"),
            Self::AlreadyOpen => write!(f, "Door is already open."),
            Self::AlreadyClosed => write!(f, "Door is already closed."),
            Self::PasswordReset => write!(f, "Password Input Reset via Keypad"),
            Self::PasswordRejected => {
                write!(f, "Incorrect Password or Door Already Open via Keypad")
            }
            Self::IrCodeReceived(code) => write!(f, "IR Code Received: {code:X}"),
            Self::IrCodeIgnored => {
                write!(f, "IR Code not recognized or door in target state already")
            }
            Self::Distance(cm) => write!(f, "Distance: {cm} cm"),
        }
    }
}
