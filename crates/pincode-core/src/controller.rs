//! PIN-entry state machine
//!
//! The controller accumulates keypad input into an entry buffer, keeps the
//! panel display in sync with it, and on submit compares the entry against
//! the primary and (optionally) the backdoor password.
//!
//! Events must be delivered serially: each call, including the handlers it
//! invokes, completes before the next one starts. The controller is `Send`
//! so it can be moved into the task that owns the panel session.

use std::fmt;

use tracing::{debug, info, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::config::{validate_digit_limit, PincodeConfig};
use crate::display::render_entry;
use crate::error::Result;
use crate::handlers::{LimitExceeded, PincodeHandlers};
use crate::input::{EntryState, PinInput};
use crate::secret::Secret;

/// Widest UTF-8 encoding of one `char`
const MAX_CHAR_BYTES: usize = 4;

/// Overwrites the bytes of a removed character
const WIPE: &str = "\0\0\0\0";

/// Owns the entry state of one keypad session
pub struct PincodeController {
    /// Characters entered so far
    entry: Zeroizing<String>,
    /// Primary password
    password: Secret,
    /// Secondary password, dropped when the backdoor is disabled
    backdoor_password: Option<Secret>,
    /// Whether the backdoor password is accepted
    backdoor_enabled: bool,
    /// Maximum entry length in characters
    digit_limit: usize,
    /// Show mask characters instead of the digits
    masking_enabled: bool,
    /// Outbound callbacks
    handlers: PincodeHandlers,
}

impl PincodeController {
    /// Create a configured controller
    ///
    /// Fires one display update with the empty entry.
    pub fn new(config: PincodeConfig, handlers: PincodeHandlers) -> Result<Self> {
        config.validate()?;

        let mut controller = Self {
            entry: Zeroizing::new(String::with_capacity(
                config.digit_limit.saturating_mul(MAX_CHAR_BYTES),
            )),
            password: config.password,
            backdoor_password: config.backdoor_password,
            backdoor_enabled: config.backdoor_enabled,
            digit_limit: config.digit_limit,
            masking_enabled: config.masking_enabled,
            handlers,
        };

        debug!(
            digit_limit = controller.digit_limit,
            backdoor = controller.backdoor_enabled,
            masking = controller.masking_enabled,
            "Configured PIN entry"
        );
        controller.update_display();

        Ok(controller)
    }

    /// Replace every option and reset the entry
    ///
    /// An invalid configuration is rejected before anything changes.
    pub fn configure(&mut self, config: PincodeConfig) -> Result<()> {
        config.validate()?;

        self.password = config.password;
        self.backdoor_password = config.backdoor_password;
        self.backdoor_enabled = config.backdoor_enabled;
        self.digit_limit = config.digit_limit;
        self.masking_enabled = config.masking_enabled;
        self.entry.zeroize();
        self.reserve_entry(self.digit_limit.saturating_mul(MAX_CHAR_BYTES));

        debug!(
            digit_limit = self.digit_limit,
            backdoor = self.backdoor_enabled,
            masking = self.masking_enabled,
            "Reconfigured PIN entry"
        );
        self.update_display();

        Ok(())
    }

    /// Accept `password` as a secondary password
    pub fn enable_backdoor(&mut self, password: impl Into<Secret>) {
        self.backdoor_password = Some(password.into());
        self.backdoor_enabled = true;
    }

    /// Stop accepting the secondary password and forget it
    pub fn disable_backdoor(&mut self) {
        self.backdoor_password = None;
        self.backdoor_enabled = false;
    }

    /// Change the maximum entry length
    ///
    /// An entry already longer than `limit` is kept; further digits are
    /// dropped until it is cleared or shortened.
    pub fn set_digit_limit(&mut self, limit: usize) -> Result<()> {
        validate_digit_limit(limit)?;
        self.digit_limit = limit;
        self.reserve_entry(limit.saturating_mul(MAX_CHAR_BYTES));
        Ok(())
    }

    /// Show mask characters instead of the entered digits
    pub fn enable_masking(&mut self) {
        self.masking_enabled = true;
        self.update_display();
    }

    /// Show the entered digits verbatim
    pub fn disable_masking(&mut self) {
        self.masking_enabled = false;
        self.update_display();
    }

    /// Dispatch one keypad event
    pub fn apply(&mut self, input: PinInput) {
        match input {
            PinInput::Digit(value) => self.handle_digit(&value),
            PinInput::Backspace => self.handle_backspace(),
            PinInput::Clear => self.handle_clear(),
            PinInput::Submit => self.handle_submit(),
        }
    }

    /// Append `input` to the entry if it fits within the digit limit
    pub fn handle_digit(&mut self, input: &str) {
        if input.is_empty() {
            debug!("Ignoring empty digit input");
            return;
        }

        let entry_len = self.entry_len();
        if entry_len + input.chars().count() > self.digit_limit {
            warn!(
                digit_limit = self.digit_limit,
                entry_len, "PIN limit exceeded"
            );
            self.handlers.limit_exceeded(LimitExceeded {
                digit_limit: self.digit_limit,
                entry_len,
            });
            return;
        }

        self.reserve_entry(self.entry.len() + input.len());
        self.entry.push_str(input);
        self.update_display();
    }

    /// Remove the last entered character; no-op on an empty entry
    pub fn handle_backspace(&mut self) {
        let Some(last) = self.entry.chars().next_back() else {
            return;
        };

        // same-length replacement writes in place, then the tail is dropped
        let width = last.len_utf8();
        let start = self.entry.len() - width;
        self.entry.replace_range(start.., &WIPE[..width]);
        self.entry.truncate(start);

        self.update_display();
    }

    /// Discard the entry
    pub fn handle_clear(&mut self) {
        self.entry.zeroize();
        self.update_display();
    }

    /// Compare the entry, clear it, then report the outcome
    ///
    /// An empty entry is always reported as a mismatch, even when the
    /// backdoor is enabled with an empty password.
    pub fn handle_submit(&mut self) {
        let matched = self.entry_matches();
        self.handle_clear();

        info!(matched, "PIN submitted");
        self.handlers.result(matched);
    }

    /// Current entry state
    pub fn state(&self) -> EntryState {
        EntryState::for_len(self.entry.len())
    }

    /// Number of characters entered so far
    pub fn entry_len(&self) -> usize {
        self.entry.chars().count()
    }

    /// Maximum entry length
    pub fn digit_limit(&self) -> usize {
        self.digit_limit
    }

    /// Whether masking is on
    pub fn is_masking_enabled(&self) -> bool {
        self.masking_enabled
    }

    /// Whether the backdoor password is accepted
    pub fn is_backdoor_enabled(&self) -> bool {
        self.backdoor_enabled
    }

    /// Text currently shown for the entry
    pub fn display_text(&self) -> String {
        render_entry(&self.entry, self.masking_enabled)
    }

    fn entry_matches(&self) -> bool {
        // primary password is never empty, so an empty entry only matches a
        // backdoor that was enabled with an empty password; refuse that too
        if self.entry.is_empty() {
            return false;
        }

        if self.password.matches(&self.entry) {
            return true;
        }

        self.backdoor_enabled
            && self
                .backdoor_password
                .as_ref()
                .is_some_and(|backdoor| backdoor.matches(&self.entry))
    }

    /// Make room for `bytes` of entry without the buffer moving later
    ///
    /// A reallocating push would leave the old copy in freed memory, so
    /// growth copies into a fresh buffer and wipes the old one on drop.
    fn reserve_entry(&mut self, bytes: usize) {
        if self.entry.capacity() >= bytes {
            return;
        }

        let mut grown = Zeroizing::new(String::with_capacity(bytes));
        grown.push_str(&self.entry);
        self.entry = grown;
    }

    fn update_display(&mut self) {
        let text = self.display_text();
        self.handlers.display(&text);
    }
}

impl fmt::Debug for PincodeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PincodeController")
            .field("entry_len", &self.entry_len())
            .field("digit_limit", &self.digit_limit)
            .field("backdoor_enabled", &self.backdoor_enabled)
            .field("masking_enabled", &self.masking_enabled)
            .finish_non_exhaustive()
    }
}
