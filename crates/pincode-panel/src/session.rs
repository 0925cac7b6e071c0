//! Keypad session with result banner
//!
//! After a submit the panel shows a "correct"/"incorrect" message in the
//! entry field. The controller has already cleared its entry by then; the
//! banner is panel state layered on top of it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pincode_core::{PinInput, PincodeController, PincodeError, PincodeHandlers};
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::PanelConfig;
use crate::signal::{PanelSignal, SignalMap};

/// What the host should render or react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutput {
    /// New text for the entry field
    Display(String),
    /// Result of a submit
    Outcome { matched: bool },
}

/// One keypad bound to one PIN-entry controller
#[derive(Debug)]
pub struct PanelSession {
    controller: PincodeController,
    signals: SignalMap,
    banner_showing: Arc<AtomicBool>,
    clear_banner_on_input: bool,
}

impl PanelSession {
    /// Build the controller and wire its handlers to `output`
    pub fn new(
        config: &PanelConfig,
        output: mpsc::UnboundedSender<PanelOutput>,
    ) -> Result<Self, PincodeError> {
        let banner_showing = Arc::new(AtomicBool::new(false));

        let display_tx = output.clone();
        let display_banner = Arc::clone(&banner_showing);
        let result_tx = output;
        let result_banner = Arc::clone(&banner_showing);
        let correct_message = config.panel.correct_message.clone();
        let incorrect_message = config.panel.incorrect_message.clone();

        let handlers = PincodeHandlers::new()
            .on_display(move |text| {
                display_banner.store(false, Ordering::Release);
                let _ = display_tx.send(PanelOutput::Display(text.to_string()));
            })
            .on_result(move |matched| {
                let _ = result_tx.send(PanelOutput::Outcome { matched });

                let message = if matched {
                    &correct_message
                } else {
                    &incorrect_message
                };
                result_banner.store(true, Ordering::Release);
                let _ = result_tx.send(PanelOutput::Display(message.clone()));
            })
            .on_limit_exceeded(|event| {
                debug!(digit_limit = event.digit_limit, "Keypad press ignored at capacity");
            });

        let controller = PincodeController::new(config.pincode.clone(), handlers)?;

        Ok(Self {
            controller,
            signals: SignalMap::from(&config.panel),
            banner_showing,
            clear_banner_on_input: config.panel.clear_banner_on_input,
        })
    }

    /// Translate and apply a raw panel signal
    pub fn handle_signal(&mut self, signal: &PanelSignal) {
        match self.signals.translate(signal) {
            Some(input) => self.handle_input(input),
            None => debug!(?signal, "Ignoring unmapped panel signal"),
        }
    }

    /// Apply keypad input, clearing a showing result banner first
    pub fn handle_input(&mut self, input: PinInput) {
        if self.clear_banner_on_input && self.is_banner_showing() && input != PinInput::Clear {
            debug!("Clearing result banner for new entry");
            self.controller.handle_clear();
        }

        self.controller.apply(input);
    }

    /// Whether the entry field currently shows a result message
    pub fn is_banner_showing(&self) -> bool {
        self.banner_showing.load(Ordering::Acquire)
    }

    /// The underlying controller
    pub fn controller(&self) -> &PincodeController {
        &self.controller
    }

    /// Mutable access for runtime reconfiguration
    pub fn controller_mut(&mut self) -> &mut PincodeController {
        &mut self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelSettings;
    use pincode_core::PincodeConfig;

    fn session(settings: PanelSettings) -> (PanelSession, mpsc::UnboundedReceiver<PanelOutput>) {
        let config = PanelConfig {
            pincode: PincodeConfig::new("1234").with_backdoor("1988").with_masking(true),
            panel: settings,
        };
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = PanelSession::new(&config, tx).unwrap();

        // initial empty display
        assert_eq!(rx.try_recv().unwrap(), PanelOutput::Display(String::new()));
        (session, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<PanelOutput>) -> Vec<PanelOutput> {
        let mut outputs = Vec::new();
        while let Ok(output) = rx.try_recv() {
            outputs.push(output);
        }
        outputs
    }

    fn press_all(session: &mut PanelSession, names: &[&str]) {
        for name in names {
            session.handle_signal(&PanelSignal::button(*name));
        }
    }

    #[test]
    fn test_correct_entry_shows_banner() {
        let (mut session, mut rx) = session(PanelSettings::default());

        press_all(&mut session, &["1", "2", "3", "4", "Misc_2"]);

        let outputs = drain(&mut rx);
        assert_eq!(
            &outputs[outputs.len() - 3..],
            &[
                PanelOutput::Display(String::new()),
                PanelOutput::Outcome { matched: true },
                PanelOutput::Display("Password Correct".into()),
            ]
        );
        assert!(session.is_banner_showing());
    }

    #[test]
    fn test_backdoor_entry() {
        let (mut session, mut rx) = session(PanelSettings::default());

        press_all(&mut session, &["1", "9", "8", "8", "Misc_2"]);

        assert!(drain(&mut rx).contains(&PanelOutput::Outcome { matched: true }));
    }

    #[test]
    fn test_next_digit_replaces_banner() {
        let (mut session, mut rx) = session(PanelSettings::default());

        press_all(&mut session, &["9", "9", "Misc_2"]);
        assert_eq!(
            drain(&mut rx).last(),
            Some(&PanelOutput::Display("Password Incorrect".into()))
        );

        press_all(&mut session, &["5"]);
        assert_eq!(
            drain(&mut rx),
            vec![
                PanelOutput::Display(String::new()),
                PanelOutput::Display("*".into()),
            ]
        );
        assert!(!session.is_banner_showing());
    }

    #[test]
    fn test_backspace_clears_banner() {
        let (mut session, mut rx) = session(PanelSettings::default());

        press_all(&mut session, &["Misc_2"]);
        drain(&mut rx);

        session.handle_signal(&PanelSignal::digital(200));

        assert_eq!(drain(&mut rx), vec![PanelOutput::Display(String::new())]);
        assert!(!session.is_banner_showing());
    }

    #[test]
    fn test_banner_kept_when_policy_off() {
        let settings = PanelSettings {
            clear_banner_on_input: false,
            ..PanelSettings::default()
        };
        let (mut session, mut rx) = session(settings);

        press_all(&mut session, &["Misc_2"]);
        drain(&mut rx);

        // empty backspace changes nothing, so the banner stays up
        session.handle_signal(&PanelSignal::digital(200));
        assert!(drain(&mut rx).is_empty());
        assert!(session.is_banner_showing());

        // a digit redraws the entry and replaces it
        press_all(&mut session, &["1"]);
        assert_eq!(drain(&mut rx), vec![PanelOutput::Display("*".into())]);
    }

    #[test]
    fn test_clear_with_banner_fires_once() {
        let (mut session, mut rx) = session(PanelSettings::default());

        press_all(&mut session, &["Misc_2"]);
        drain(&mut rx);

        press_all(&mut session, &["Misc_1"]);
        assert_eq!(drain(&mut rx), vec![PanelOutput::Display(String::new())]);
    }

    #[test]
    fn test_released_and_unmapped_signals_ignored() {
        let (mut session, mut rx) = session(PanelSettings::default());

        session.handle_signal(&PanelSignal::Button {
            name: "1".into(),
            pressed: false,
        });
        session.handle_signal(&PanelSignal::digital(42));

        assert!(drain(&mut rx).is_empty());
        assert_eq!(session.controller().entry_len(), 0);
    }

    #[test]
    fn test_closed_output_does_not_fault() {
        let (mut session, rx) = session(PanelSettings::default());
        drop(rx);

        press_all(&mut session, &["1", "2", "3", "4", "Misc_2"]);
        assert_eq!(session.controller().entry_len(), 0);
    }

    #[test]
    fn test_runtime_masking_toggle() {
        let (mut session, mut rx) = session(PanelSettings::default());

        press_all(&mut session, &["4", "2"]);
        drain(&mut rx);

        session.controller_mut().disable_masking();
        assert_eq!(drain(&mut rx), vec![PanelOutput::Display("42".into())]);
    }
}
