//! Pincode Panel - touch-panel host for a PIN-entry keypad
//!
//! Maps keypad button names and digital joins to controller input, shows a
//! result message after each submit, and runs each keypad session on its
//! own task so panel events are applied one at a time.

pub mod config;
pub mod events;
pub mod session;
pub mod signal;

pub use config::{ConfigError, PanelConfig, PanelSettings};
pub use events::{run_session, spawn_session, SessionHandle};
pub use session::{PanelOutput, PanelSession};
pub use signal::{PanelSignal, SignalMap, SignalParseError};
