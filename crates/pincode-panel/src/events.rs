//! Event loop serializing panel signals into one session
//!
//! The panel may report button presses from any thread; they are queued on
//! an unbounded channel and a single task applies them in order, so each
//! signal (and every callback it triggers) finishes before the next starts.

use pincode_core::PincodeError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::PanelConfig;
use crate::session::{PanelOutput, PanelSession};
use crate::signal::PanelSignal;

/// Handles to a running session task
#[derive(Debug)]
pub struct SessionHandle {
    /// Queue panel signals here
    pub signals: mpsc::UnboundedSender<PanelSignal>,
    /// Display updates and outcomes, in order
    pub outputs: mpsc::UnboundedReceiver<PanelOutput>,
    /// Finishes once every `signals` sender is dropped
    pub task: JoinHandle<()>,
}

/// Start a session task for `config`
///
/// Must be called from within a tokio runtime.
pub fn spawn_session(config: &PanelConfig) -> Result<SessionHandle, PincodeError> {
    let (output_tx, output_rx) = mpsc::unbounded_channel();
    let (signal_tx, signal_rx) = mpsc::unbounded_channel();

    let session = PanelSession::new(config, output_tx)?;
    let task = tokio::spawn(run_session(session, signal_rx));

    Ok(SessionHandle {
        signals: signal_tx,
        outputs: output_rx,
        task,
    })
}

/// Apply signals to `session` until the channel closes
pub async fn run_session(
    mut session: PanelSession,
    mut signals: mpsc::UnboundedReceiver<PanelSignal>,
) {
    while let Some(signal) = signals.recv().await {
        session.handle_signal(&signal);
    }
    debug!("Panel signal channel closed, ending session");
}
