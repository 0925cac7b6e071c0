//! Panel signals and their mapping onto keypad input
//!
//! The keypad smart object reports buttons by name ("1".."9", "0", plus two
//! misc buttons), and backspace is a separate digital join. Only this module
//! knows those names; the controller only ever sees [`PinInput`].

use pincode_core::PinInput;

use crate::config::PanelSettings;

/// Prefix marking a digital join in signal scripts
const JOIN_PREFIX: &str = "join:";

/// Raw event reported by the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelSignal {
    /// Keypad smart-object button
    Button { name: String, pressed: bool },
    /// Digital join outside the keypad
    Digital { join: u32, pressed: bool },
}

impl PanelSignal {
    /// A keypad button press
    pub fn button(name: impl Into<String>) -> Self {
        PanelSignal::Button {
            name: name.into(),
            pressed: true,
        }
    }

    /// A digital join press
    pub fn digital(join: u32) -> Self {
        PanelSignal::Digital {
            join,
            pressed: true,
        }
    }

    /// Parse one line of a signal script
    ///
    /// `join:<n>` is a digital press, anything else a button press. Blank
    /// lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, SignalParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        match line.strip_prefix(JOIN_PREFIX) {
            Some(join) => join
                .trim()
                .parse()
                .map(|join| Some(Self::digital(join)))
                .map_err(|_| SignalParseError::InvalidJoin(join.to_string())),
            None => Ok(Some(Self::button(line))),
        }
    }

    /// Parse one raw line as read from a script or stdin
    pub fn parse_bytes(line: &[u8]) -> Result<Option<Self>, SignalParseError> {
        let line = std::str::from_utf8(line).map_err(|_| SignalParseError::InvalidUtf8)?;
        Self::parse_line(line)
    }
}

/// Malformed signal script line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalParseError {
    #[error("Invalid join number: {0:?}")]
    InvalidJoin(String),

    #[error("Line is not valid UTF-8")]
    InvalidUtf8,
}

/// Translates panel signals into keypad input
#[derive(Debug, Clone)]
pub struct SignalMap {
    clear_signal: String,
    submit_signal: String,
    backspace_join: u32,
}

impl From<&PanelSettings> for SignalMap {
    fn from(settings: &PanelSettings) -> Self {
        Self {
            clear_signal: settings.clear_signal.clone(),
            submit_signal: settings.submit_signal.clone(),
            backspace_join: settings.backspace_join,
        }
    }
}

impl SignalMap {
    /// Input for `signal`, or `None` for releases and unmapped joins
    pub fn translate(&self, signal: &PanelSignal) -> Option<PinInput> {
        match signal {
            PanelSignal::Button { pressed: false, .. } | PanelSignal::Digital { pressed: false, .. } => {
                None
            }
            PanelSignal::Button { name, .. } if *name == self.clear_signal => Some(PinInput::Clear),
            PanelSignal::Button { name, .. } if *name == self.submit_signal => Some(PinInput::Submit),
            PanelSignal::Button { name, .. } => Some(PinInput::Digit(name.clone())),
            PanelSignal::Digital { join, .. } if *join == self.backspace_join => {
                Some(PinInput::Backspace)
            }
            PanelSignal::Digital { .. } => None,
        }
    }
}
