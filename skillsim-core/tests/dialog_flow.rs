//! End-to-end dialog flows through the conversation controller, using the
//! mock client so no network is involved.

use skillsim_core::mock::MockSimulationClient;
use skillsim_core::{
    ConversationController, ConversationSession, PollConfig, SilentObserver, SimulationError,
    SimulationJob, SimulationSession, SimulationStatus,
};
use std::sync::Arc;
use std::time::Duration;

fn controller(mock: Arc<MockSimulationClient>, max_retry: u32) -> ConversationController {
    let poll = PollConfig::default()
        .with_base(Duration::from_millis(1))
        .with_factor(1.0)
        .with_max_retry(max_retry);
    ConversationController::new(
        ConversationSession::new("skill-1", "en-US", "development"),
        SimulationSession::new(mock, poll),
    )
}

fn submitted(id: &str) -> SimulationJob {
    serde_json::from_value(serde_json::json!({ "id": id })).expect("job fixture")
}

fn polled(id: &str, status: &str) -> SimulationJob {
    serde_json::from_value(serde_json::json!({ "id": id, "status": status }))
        .expect("job fixture")
}

fn successful(id: &str, should_end_session: bool, caption: &str) -> SimulationJob {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "status": "SUCCESSFUL",
        "result": {
            "skillExecutionInfo": {
                "invocations": [
                    { "invocationResponse": { "body": { "response": {
                        "shouldEndSession": should_end_session
                    } } } }
                ]
            },
            "deviceExecutionInfo": {
                "responses": [ { "content": { "caption": caption } } ]
            }
        }
    }))
    .expect("job fixture")
}

/// The concrete scenario from the design notes: submit "turn one" on a new
/// session, poll once through IN_PROGRESS, then read the caption.
#[tokio::test(start_paused = true)]
async fn in_progress_then_successful_yields_caption() {
    let mock = Arc::new(MockSimulationClient::new());
    mock.push_job(submitted("sim-1"));
    mock.push_job(polled("sim-1", "IN_PROGRESS"));
    mock.push_job(successful("sim-1", false, "hello"));

    let mut controller = controller(Arc::clone(&mock), 5);
    let captions = controller
        .evaluate_utterance("turn one", &mut SilentObserver)
        .await
        .expect("turn should succeed");

    assert_eq!(captions, vec!["hello"]);
    assert!(!controller.session().is_new_turn);
    assert_eq!(mock.start_calls(), 1);
    assert_eq!(mock.status_calls(), 2);
}

/// TTL expiry and skill failure must surface as different errors with
/// different wording.
#[tokio::test(start_paused = true)]
async fn expiry_and_failure_are_distinct_errors() {
    let mock = Arc::new(MockSimulationClient::new());
    mock.push_job(submitted("sim-1"));
    mock.push_job(SimulationJob {
        id: "sim-1".to_string(),
        ..Default::default()
    });

    let mut controller = controller(Arc::clone(&mock), 1);
    let expired = controller
        .evaluate_utterance("turn one", &mut SilentObserver)
        .await
        .unwrap_err();
    assert!(matches!(&expired, SimulationError::Expired { .. }));

    mock.push_job(submitted("sim-2"));
    mock.push_job(polled("sim-2", "FAILED"));
    let failed = controller
        .evaluate_utterance("turn two", &mut SilentObserver)
        .await
        .unwrap_err();
    assert!(matches!(&failed, SimulationError::SimulationFailed { .. }));

    assert_ne!(expired.to_string(), failed.to_string());
    assert!(expired.to_string().contains("sim-1"));
    assert!(failed.to_string().contains("sim-2"));
}

/// With a poll budget of 3 the status endpoint is hit exactly 3 times and
/// the unresolved error names the job id and the attempt count.
#[tokio::test(start_paused = true)]
async fn poll_budget_is_bounded() {
    let mock = Arc::new(MockSimulationClient::new());
    mock.push_job(submitted("sim-1"));
    for _ in 0..3 {
        mock.push_job(polled("sim-1", "IN_PROGRESS"));
    }

    let mut controller = controller(Arc::clone(&mock), 3);
    let err = controller
        .evaluate_utterance("turn one", &mut SilentObserver)
        .await
        .unwrap_err();

    assert_eq!(mock.status_calls(), 3);
    let display = err.to_string();
    assert!(display.contains("sim-1"));
    assert!(display.contains('3'));
    assert!(err.is_exhausted());
}

/// A multi-turn conversation: two continuing turns, then an ending one.
#[tokio::test(start_paused = true)]
async fn three_turn_conversation_with_ending() {
    let mock = Arc::new(MockSimulationClient::new());
    mock.push_job(submitted("sim-1"));
    mock.push_job(successful("sim-1", false, "welcome"));
    mock.push_job(submitted("sim-2"));
    mock.push_job(successful("sim-2", false, "sure"));
    mock.push_job(submitted("sim-3"));
    mock.push_job(successful("sim-3", true, "goodbye"));

    let mut controller = controller(Arc::clone(&mock), 5);
    for utterance in ["open my skill", "do the thing", "stop"] {
        controller
            .evaluate_utterance(utterance, &mut SilentObserver)
            .await
            .expect("turn should succeed");
    }

    // The ending turn cleared the cache and reset the session.
    assert!(controller.session().is_new_turn);
    assert!(controller.session().utterance_cache.is_empty());
}
