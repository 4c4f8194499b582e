use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use tokio::sync::{mpsc, Mutex};
use tokio::time::timeout;

use qg_core::config::ScannerConfig;
use qg_core::dialog::state_machine::{DUPLICATE_NOTICE, SUCCESS_NOTICE};
use qg_core::ports::{DecodeEvent, DecodeSourcePort, SubmissionPort};
use qg_core::registration::{SubmissionOutcome, SubmissionRequest};
use qg_core::scan::ScanMode;

use super::{session, ScanSession, SessionEvent};

mock! {
    pub Submission {}

    #[async_trait]
    impl SubmissionPort for Submission {
        async fn submit(&self, request: &SubmissionRequest) -> SubmissionOutcome;
    }
}

/// Synthetic decode source backed by a channel, standing in for the camera
/// pipeline.
struct ChannelDecodeSource {
    rx: Mutex<Option<mpsc::Receiver<DecodeEvent>>>,
}

impl ChannelDecodeSource {
    fn new() -> (Arc<Self>, mpsc::Sender<DecodeEvent>) {
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
impl DecodeSourcePort for ChannelDecodeSource {
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<DecodeEvent>> {
        self.rx
            .lock()
            .await
            .take()
            .ok_or_else(|| anyhow::anyhow!("decode source already subscribed"))
    }
}

fn test_config() -> ScannerConfig {
    ScannerConfig {
        mode: ScanMode::Default,
        salt: String::new(),
        event_id: "ev1".to_string(),
        manager_name: Some("alice".to_string()),
        endpoint: "http://localhost:8080/scan".to_string(),
    }
}

fn start_session(submission: MockSubmission) -> (ScanSession, mpsc::Sender<DecodeEvent>) {
    let session = ScanSession::new(&test_config(), Arc::new(submission));
    let (source, decode_tx) = ChannelDecodeSource::new();

    let runner = session.clone();
    tokio::spawn(async move {
        let _ = runner.run(source).await;
    });

    (session, decode_tx)
}

async fn next_event(rx: &mut mpsc::Receiver<SessionEvent>) -> SessionEvent {
    timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for session event")
        .expect("event channel closed")
}

async fn assert_no_event(rx: &mut mpsc::Receiver<SessionEvent>) {
    let result = timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(result.is_err(), "unexpected session event: {result:?}");
}

#[tokio::test]
async fn accepted_scan_submits_and_reports_success() {
    let mut submission = MockSubmission::new();
    submission
        .expect_submit()
        .withf(|request| {
            request.user_id == "u1"
                && request.event_id == "ev1"
                && request.manager_name.as_deref() == Some("alice")
        })
        .times(1)
        .returning(|_| SubmissionOutcome::Success);

    let (session, decode_tx) = start_session(submission);
    let mut events = session.subscribe_events().await;

    decode_tx
        .send(DecodeEvent::Decoded(
            "https://example.com/user/u1".to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::ConfirmationRequired {
            user_id: "u1".to_string()
        }
    );

    session.accept().await;
    assert_eq!(next_event(&mut events).await, SessionEvent::DialogClosed);
    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::NoticePosted {
            text: SUCCESS_NOTICE.to_string(),
            is_error: false,
        }
    );

    session.dismiss_notice().await;
    assert_eq!(next_event(&mut events).await, SessionEvent::DialogClosed);
}

#[tokio::test]
async fn rejected_scan_never_submits() {
    // No expectation on submit: any call would panic the mock.
    let submission = MockSubmission::new();

    let (session, decode_tx) = start_session(submission);
    let mut events = session.subscribe_events().await;

    decode_tx
        .send(DecodeEvent::Decoded("x/user/u1".to_string()))
        .await
        .unwrap();
    next_event(&mut events).await;

    session.reject().await;
    assert_eq!(next_event(&mut events).await, SessionEvent::DialogClosed);

    // The session is idle again and accepts the next scan.
    decode_tx
        .send(DecodeEvent::Decoded("x/user/u2".to_string()))
        .await
        .unwrap();
    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::ConfirmationRequired {
            user_id: "u2".to_string()
        }
    );
}

#[tokio::test]
async fn duplicate_rejection_reports_distinguished_notice() {
    let mut submission = MockSubmission::new();
    submission
        .expect_submit()
        .times(1)
        .returning(|_| SubmissionOutcome::Duplicate);

    let (session, decode_tx) = start_session(submission);
    let mut events = session.subscribe_events().await;

    decode_tx
        .send(DecodeEvent::Decoded("x/user/u1".to_string()))
        .await
        .unwrap();
    next_event(&mut events).await;

    session.accept().await;
    assert_eq!(next_event(&mut events).await, SessionEvent::DialogClosed);
    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::NoticePosted {
            text: DUPLICATE_NOTICE.to_string(),
            is_error: true,
        }
    );
}

#[tokio::test]
async fn submission_error_notice_embeds_reason() {
    let mut submission = MockSubmission::new();
    submission
        .expect_submit()
        .times(1)
        .returning(|_| SubmissionOutcome::Error("connection refused".to_string()));

    let (session, decode_tx) = start_session(submission);
    let mut events = session.subscribe_events().await;

    decode_tx
        .send(DecodeEvent::Decoded("x/user/u1".to_string()))
        .await
        .unwrap();
    next_event(&mut events).await;
    session.accept().await;
    next_event(&mut events).await; // DialogClosed

    match next_event(&mut events).await {
        SessionEvent::NoticePosted { text, is_error } => {
            assert!(is_error);
            assert!(text.contains("connection refused"));
        }
        other => panic!("expected notice, got {other:?}"),
    }
}

#[tokio::test]
async fn rapid_decodes_prompt_once() {
    let submission = MockSubmission::new();

    let (session, decode_tx) = start_session(submission);
    let mut events = session.subscribe_events().await;

    decode_tx
        .send(DecodeEvent::Decoded("x/user/first".to_string()))
        .await
        .unwrap();
    decode_tx
        .send(DecodeEvent::Decoded("x/user/second".to_string()))
        .await
        .unwrap();

    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::ConfirmationRequired {
            user_id: "first".to_string()
        }
    );

    // The second decode must be swallowed by the guard, not queued.
    assert_no_event(&mut events).await;
}

#[tokio::test]
async fn stalled_subscriber_does_not_wedge_the_session() {
    let submission = MockSubmission::new();

    let (session, decode_tx) = start_session(submission);
    let mut events = session.subscribe_events().await;
    // A second subscriber that never drains its channel.
    let _stalled = session.subscribe_events().await;

    // Each scan-then-reject cycle emits two events; fill the stalled
    // subscriber's channel to capacity, draining our own as we go.
    for n in 0..session::EVENT_CHANNEL_CAPACITY / 2 {
        decode_tx
            .send(DecodeEvent::Decoded(format!("x/user/u{n}")))
            .await
            .unwrap();
        next_event(&mut events).await;
        session.reject().await;
        next_event(&mut events).await;
    }

    // The next change leaves the broadcast suspended on the full channel.
    // The session must keep answering state queries regardless.
    decode_tx
        .send(DecodeEvent::Decoded("x/user/next".to_string()))
        .await
        .unwrap();
    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::ConfirmationRequired {
            user_id: "next".to_string()
        }
    );

    let state = timeout(Duration::from_secs(1), session.current_state())
        .await
        .expect("state query wedged behind a stalled subscriber");
    assert_eq!(state.label(), "confirm_pending");
}

#[tokio::test]
async fn decode_failures_are_ignored() {
    let submission = MockSubmission::new();

    let (session, decode_tx) = start_session(submission);
    let mut events = session.subscribe_events().await;

    decode_tx
        .send(DecodeEvent::Failed("blurry frame".to_string()))
        .await
        .unwrap();
    decode_tx
        .send(DecodeEvent::Decoded("x/user/u1".to_string()))
        .await
        .unwrap();

    assert_eq!(
        next_event(&mut events).await,
        SessionEvent::ConfirmationRequired {
            user_id: "u1".to_string()
        }
    );
}
