//! Keypad input events and entry state

/// A single input event delivered by the host panel
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PinInput {
    /// Append one entry unit; usually a single digit, but any symbol is accepted
    Digit(String),
    /// Remove the last entered character
    Backspace,
    /// Discard the whole entry
    Clear,
    /// Compare the entry against the configured passwords
    Submit,
}

impl PinInput {
    /// Convenience constructor for a digit event
    pub fn digit(value: impl Into<String>) -> Self {
        PinInput::Digit(value.into())
    }
}

impl From<char> for PinInput {
    fn from(ch: char) -> Self {
        PinInput::Digit(ch.to_string())
    }
}

/// Whether anything has been typed yet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EntryState {
    /// Entry is empty
    #[default]
    Idle,
    /// At least one character has been entered
    Entering,
}

impl EntryState {
    pub(crate) fn for_len(len: usize) -> Self {
        if len == 0 {
            EntryState::Idle
        } else {
            EntryState::Entering
        }
    }
}
