//! Interactive console for one operator.
//!
//! Stdin plays both external roles: while the dialog is idle a line is a
//! decoded payload (what the camera decoder would deliver), while a dialog
//! is open lines are operator input. Routing is decided by the session's
//! current dialog state, mirroring how the on-screen dialog captures input
//! in the scanner page.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};

use qg_app::{ScanSession, SessionEvent};
use qg_core::config::ScannerConfig;
use qg_core::dialog::DialogState;
use qg_core::ports::{DecodeEvent, DecodeSourcePort};

/// Decode source fed by the console loop.
pub struct ConsoleDecodeSource {
    rx: Mutex<Option<mpsc::Receiver<DecodeEvent>>>,
}

impl ConsoleDecodeSource {
    pub fn channel() -> (Arc<Self>, mpsc::Sender<DecodeEvent>) {
        let (tx, rx) = mpsc::channel(8);
        (
            Arc::new(Self {
                rx: Mutex::new(Some(rx)),
            }),
            tx,
        )
    }
}

#[async_trait]
impl DecodeSourcePort for ConsoleDecodeSource {
    async fn subscribe(&self) -> Result<mpsc::Receiver<DecodeEvent>> {
        self.rx
            .lock()
            .await
            .take()
            .ok_or_else(|| anyhow::anyhow!("console decode source already subscribed"))
    }
}

/// Run the console loop until stdin closes.
pub async fn operate(
    session: ScanSession,
    config: ScannerConfig,
    decode_tx: mpsc::Sender<DecodeEvent>,
) -> Result<()> {
    let mut events = session.subscribe_events().await;
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            render(&event);
        }
    });

    println!(
        "qrgate: event {}, mode {} (paste a decoded code and press enter)",
        config.event_id, config.mode
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();

        match session.current_state().await {
            DialogState::Idle => {
                if line.is_empty() {
                    continue;
                }
                if decode_tx.send(DecodeEvent::Decoded(line)).await.is_err() {
                    break;
                }
            }
            DialogState::ConfirmPending { .. } => match line.as_str() {
                "y" | "Y" => session.accept().await,
                "n" | "N" => session.reject().await,
                _ => println!("answer y or n"),
            },
            DialogState::Notice { .. } => session.dismiss_notice().await,
        }
    }

    Ok(())
}

fn render(event: &SessionEvent) {
    match event {
        SessionEvent::ConfirmationRequired { user_id } => {
            println!("register user \"{user_id}\"? [y/n]");
        }
        SessionEvent::NoticePosted { text, is_error } => {
            let marker = if *is_error { "!!" } else { "ok" };
            println!("{marker} {text} (press enter to continue)");
        }
        SessionEvent::DialogClosed => {}
    }
}
