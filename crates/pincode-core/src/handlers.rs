//! Outbound callbacks
//!
//! Every event has exactly one handler slot. Unset slots hold a no-op, so
//! the controller invokes them unconditionally.

use std::fmt;

/// Receives the text the panel should show
pub type DisplayHandler = Box<dyn FnMut(&str) + Send>;

/// Receives the outcome of a submit
pub type ResultHandler = Box<dyn FnMut(bool) + Send>;

/// Receives notice of a digit dropped at capacity
pub type LimitExceededHandler = Box<dyn FnMut(LimitExceeded) + Send>;

/// A digit was dropped because the entry is full
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimitExceeded {
    /// Configured maximum entry length
    pub digit_limit: usize,
    /// Entry length at the time the digit was dropped
    pub entry_len: usize,
}

/// Handler set supplied at construction
pub struct PincodeHandlers {
    display: DisplayHandler,
    result: ResultHandler,
    limit_exceeded: LimitExceededHandler,
}

impl Default for PincodeHandlers {
    /// All handlers ignore their events
    fn default() -> Self {
        Self {
            display: Box::new(|_| {}),
            result: Box::new(|_| {}),
            limit_exceeded: Box::new(|_| {}),
        }
    }
}

impl fmt::Debug for PincodeHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PincodeHandlers").finish_non_exhaustive()
    }
}

impl PincodeHandlers {
    /// Create a handler set where every event is ignored
    pub fn new() -> Self {
        Self::default()
    }

    /// Called whenever the visible entry text changes
    pub fn on_display<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.display = Box::new(handler);
        self
    }

    /// Called once per submit with whether the entry matched
    pub fn on_result<F>(mut self, handler: F) -> Self
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.result = Box::new(handler);
        self
    }

    /// Called when a digit is dropped because the entry is full
    pub fn on_limit_exceeded<F>(mut self, handler: F) -> Self
    where
        F: FnMut(LimitExceeded) + Send + 'static,
    {
        self.limit_exceeded = Box::new(handler);
        self
    }

    pub(crate) fn display(&mut self, text: &str) {
        (self.display)(text)
    }

    pub(crate) fn result(&mut self, matched: bool) {
        (self.result)(matched)
    }

    pub(crate) fn limit_exceeded(&mut self, event: LimitExceeded) {
        (self.limit_exceeded)(event)
    }
}
