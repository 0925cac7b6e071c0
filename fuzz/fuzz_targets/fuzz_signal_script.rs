#![no_main]

use libfuzzer_sys::fuzz_target;
use pincode_core::PincodeConfig;
use pincode_panel::{PanelConfig, PanelSession, PanelSignal};
use tokio::sync::mpsc;

fuzz_target!(|data: &[u8]| {
    let config = PanelConfig::new(PincodeConfig::new("1234").with_masking(true));
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut session = PanelSession::new(&config, tx).expect("valid config");

    // Malformed lines are reported, never panic
    for line in data.split(|&b| b == b'\n') {
        if let Ok(Some(signal)) = PanelSignal::parse_bytes(line) {
            session.handle_signal(&signal);
            assert!(session.controller().entry_len() <= 4);
        }
    }
});
