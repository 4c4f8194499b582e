//! Scan session orchestrator
//!
//! Owns the dialog state machine for one operator session and connects it
//! to the outside world: decode events from the injected decode source,
//! operator commands from the shell, and the submission port.
//!
//! ```text
//! Decode source / operator input
//!   ↓
//! ScanSession (serializes inputs, converts to DialogEvent)
//!   ↓
//! DialogStateMachine (pure state transitions)
//!   ↓
//! DialogActions (submission spawned here) + SessionEvents (to the shell)
//! ```
//!
//! All state mutation happens on transition boundaries behind one mutex;
//! the submission future is the only concurrent piece and re-enters the
//! machine through [`DialogEvent::SubmissionCompleted`], which applies
//! regardless of the state the dialog is in by then.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use qg_core::config::ScannerConfig;
use qg_core::dialog::{DialogAction, DialogEvent, DialogState, DialogStateMachine, ScanPolicy};
use qg_core::ports::{DecodeEvent, DecodeSourcePort, SubmissionPort};
use qg_core::registration::SubmissionRequest;

use super::SessionEvent;

pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 16;

/// One operator's scanning session.
///
/// Constructed once per session; cheap to clone (all fields shared).
#[derive(Clone)]
pub struct ScanSession {
    machine: Arc<Mutex<DialogStateMachine>>,
    event_id: String,
    manager_name: Option<String>,
    submission: Arc<dyn SubmissionPort>,
    event_senders: Arc<Mutex<Vec<mpsc::Sender<SessionEvent>>>>,
}

impl ScanSession {
    pub fn new(config: &ScannerConfig, submission: Arc<dyn SubmissionPort>) -> Self {
        let machine = DialogStateMachine::new(ScanPolicy {
            mode: config.mode,
            salt: config.salt.clone(),
        });

        Self {
            machine: Arc::new(Mutex::new(machine)),
            event_id: config.event_id.clone(),
            manager_name: config.manager_name.clone(),
            submission,
            event_senders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Subscribe to dialog changes. Each subscriber gets every event from
    /// the moment of subscription; sends to a closed receiver are logged
    /// and skipped.
    pub async fn subscribe_events(&self) -> mpsc::Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        self.event_senders.lock().await.push(tx);
        rx
    }

    /// Drive the session from a decode source until it closes.
    ///
    /// Decode failures are facts about the camera, not the operator's code;
    /// they are logged and dropped, never surfaced as a notice.
    pub async fn run(&self, source: Arc<dyn DecodeSourcePort>) -> anyhow::Result<()> {
        let mut events = source.subscribe().await?;

        while let Some(event) = events.recv().await {
            match event {
                DecodeEvent::Decoded(payload) => {
                    self.apply(DialogEvent::ScanDecoded { payload }).await;
                }
                DecodeEvent::Failed(reason) => {
                    debug!(%reason, "decode failure ignored");
                }
            }
        }

        debug!("decode source closed, session finished");
        Ok(())
    }

    /// Operator accepted the pending candidate.
    pub async fn accept(&self) {
        self.apply(DialogEvent::OperatorAccepted).await;
    }

    /// Operator rejected the pending candidate.
    pub async fn reject(&self) {
        self.apply(DialogEvent::OperatorRejected).await;
    }

    /// Operator dismissed the current notice.
    pub async fn dismiss_notice(&self) {
        self.apply(DialogEvent::NoticeDismissed).await;
    }

    /// Current dialog state (for shells that render on demand).
    pub async fn current_state(&self) -> DialogState {
        self.machine.lock().await.state().clone()
    }

    /// Apply one event to the machine, broadcast the resulting state change
    /// and execute the returned actions.
    ///
    /// The machine lock is released before the broadcast: sends can suspend
    /// on a slow subscriber, and a suspended send must never keep the
    /// machine locked, or decode events, operator commands and
    /// `current_state` would all wedge behind it.
    async fn apply(&self, event: DialogEvent) {
        let (changed, actions) = {
            let mut machine = self.machine.lock().await;
            let before = machine.state().clone();
            let (state, actions) = machine.handle_event(event);
            ((state != before).then_some(state), actions)
        };

        if let Some(state) = changed {
            self.broadcast(SessionEvent::from_state(&state)).await;
        }

        for action in actions {
            match action {
                DialogAction::SubmitRegistration { user_id } => {
                    self.spawn_submission(user_id);
                }
            }
        }
    }

    /// Fire the registration request without blocking event delivery. The
    /// outcome re-enters the machine as `SubmissionCompleted`.
    fn spawn_submission(&self, user_id: String) {
        let request = SubmissionRequest::new(
            user_id,
            self.event_id.clone(),
            self.manager_name.clone(),
        );
        let session = self.clone();

        tokio::spawn(async move {
            info!(user_id = %request.user_id, event_id = %request.event_id, "submitting registration");
            let outcome = session.submission.submit(&request).await;
            info!(?outcome, "registration finished");
            session
                .apply(DialogEvent::SubmissionCompleted { outcome })
                .await;
        });
    }

    /// Broadcast an event to all subscribers. The sender list is cloned so
    /// no lock is held while sending.
    async fn broadcast(&self, event: SessionEvent) {
        let senders = {
            let senders = self.event_senders.lock().await;
            senders.clone()
        };

        for sender in senders {
            if sender.send(event.clone()).await.is_err() {
                debug!("session event receiver dropped, skipping");
            }
        }
    }
}
