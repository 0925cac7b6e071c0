#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pincode_core::{EntryState, PinInput, PincodeConfig, PincodeController, PincodeHandlers};

#[derive(Debug, Arbitrary)]
enum Op {
    Digit(String),
    Backspace,
    Clear,
    Submit,
    SetLimit(u8),
    ToggleMasking(bool),
    ToggleBackdoor(Option<String>),
}

#[derive(Debug, Arbitrary)]
struct Session {
    password: String,
    limit: u8,
    masking: bool,
    ops: Vec<Op>,
}

fuzz_target!(|session: Session| {
    let config = PincodeConfig::new(session.password)
        .with_digit_limit(usize::from(session.limit))
        .with_masking(session.masking);

    // Invalid setups must be rejected, never panic
    let Ok(mut controller) = PincodeController::new(config, PincodeHandlers::default()) else {
        return;
    };

    for op in session.ops {
        let before = controller.entry_len();
        match op {
            Op::Digit(value) => controller.apply(PinInput::Digit(value)),
            Op::Backspace => controller.apply(PinInput::Backspace),
            Op::Clear => controller.apply(PinInput::Clear),
            Op::Submit => {
                controller.apply(PinInput::Submit);
                assert_eq!(controller.state(), EntryState::Idle);
            }
            Op::SetLimit(limit) => {
                let _ = controller.set_digit_limit(usize::from(limit));
            }
            Op::ToggleMasking(true) => controller.enable_masking(),
            Op::ToggleMasking(false) => controller.disable_masking(),
            Op::ToggleBackdoor(Some(password)) => controller.enable_backdoor(password),
            Op::ToggleBackdoor(None) => controller.disable_backdoor(),
        }

        // Appends never push the entry past the limit
        assert!(controller.entry_len() <= controller.digit_limit().max(before));

        if controller.is_masking_enabled() {
            assert_eq!(controller.display_text().chars().count(), controller.entry_len());
        }
    }
});
