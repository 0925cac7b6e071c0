//! Pincode Core - PIN-entry logic for touch-panel keypads
//!
//! This crate decides what a keypad's entry field should show and whether
//! a submitted entry matches the configured password. It has no knowledge
//! of the panel hardware: the host forwards [`PinInput`] events and receives
//! display text and match results through [`PincodeHandlers`].
//!
//! ```
//! use pincode_core::{PinInput, PincodeConfig, PincodeController, PincodeHandlers};
//!
//! let handlers = PincodeHandlers::new()
//!     .on_result(|matched| println!("matched: {matched}"));
//! let mut pincode = PincodeController::new(
//!     PincodeConfig::new("1234").with_masking(true),
//!     handlers,
//! )?;
//!
//! for digit in ['1', '2', '3', '4'] {
//!     pincode.apply(PinInput::from(digit));
//! }
//! assert_eq!(pincode.display_text(), "****");
//! pincode.apply(PinInput::Submit);
//! # Ok::<(), pincode_core::PincodeError>(())
//! ```

pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod handlers;
pub mod input;
pub mod secret;

pub use config::{PincodeConfig, DEFAULT_DIGIT_LIMIT};
pub use controller::PincodeController;
pub use display::MASK_CHAR;
pub use error::{PincodeError, Result};
pub use handlers::{LimitExceeded, PincodeHandlers};
pub use input::{EntryState, PinInput};
pub use secret::Secret;
