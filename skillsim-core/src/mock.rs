//! Mock simulation client for offline and deterministic testing.
//!
//! The mock replays a queued sequence of responses: each call to
//! `start_simulation` or `get_simulation_status` pops the next queued
//! result. Calls are recorded so tests can assert on what the dialog
//! engine actually sent.

use crate::error::SimulationError;
use crate::simulation::SimulationJob;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::client::SimulationClient;

/// One observed call against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Start {
        utterance: String,
        force_new_session: bool,
    },
    Status {
        simulation_id: String,
    },
}

/// Simulation client that replays queued responses.
#[derive(Debug, Default)]
pub struct MockSimulationClient {
    responses: Mutex<VecDeque<Result<SimulationJob, SimulationError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockSimulationClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn push_job(&self, job: SimulationJob) {
        self.queue().push_back(Ok(job));
    }

    /// Queue an error response.
    pub fn push_error(&self, error: SimulationError) {
        self.queue().push_back(Err(error));
    }

    /// All calls observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.call_log().clone()
    }

    /// Number of `start_simulation` calls observed.
    pub fn start_calls(&self) -> usize {
        self.call_log()
            .iter()
            .filter(|c| matches!(c, RecordedCall::Start { .. }))
            .count()
    }

    /// Number of `get_simulation_status` calls observed.
    pub fn status_calls(&self) -> usize {
        self.call_log()
            .iter()
            .filter(|c| matches!(c, RecordedCall::Status { .. }))
            .count()
    }

    fn next_response(&self) -> Result<SimulationJob, SimulationError> {
        self.queue().pop_front().unwrap_or_else(|| {
            Err(SimulationError::Service {
                status: 0,
                body: "mock response queue exhausted".to_string(),
            })
        })
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<SimulationJob, SimulationError>>> {
        self.responses.lock().expect("mock response lock poisoned")
    }

    fn call_log(&self) -> std::sync::MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().expect("mock call log lock poisoned")
    }
}

#[async_trait]
impl SimulationClient for MockSimulationClient {
    async fn start_simulation(
        &self,
        utterance: &str,
        force_new_session: bool,
    ) -> Result<SimulationJob, SimulationError> {
        self.call_log().push(RecordedCall::Start {
            utterance: utterance.to_string(),
            force_new_session,
        });
        self.next_response()
    }

    async fn get_simulation_status(
        &self,
        simulation_id: &str,
    ) -> Result<SimulationJob, SimulationError> {
        self.call_log().push(RecordedCall::Status {
            simulation_id: simulation_id.to_string(),
        });
        self.next_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationStatus;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let mock = MockSimulationClient::new();
        mock.push_job(SimulationJob {
            id: "sim-1".to_string(),
            ..Default::default()
        });
        mock.push_job(SimulationJob {
            id: "sim-1".to_string(),
            status: Some(SimulationStatus::Successful),
            ..Default::default()
        });

        let first = mock.start_simulation("hi", true).await.unwrap();
        assert_eq!(first.id, "sim-1");
        assert_eq!(first.status, None);

        let second = mock.get_simulation_status("sim-1").await.unwrap();
        assert_eq!(second.status, Some(SimulationStatus::Successful));

        assert_eq!(
            mock.calls(),
            vec![
                RecordedCall::Start {
                    utterance: "hi".to_string(),
                    force_new_session: true,
                },
                RecordedCall::Status {
                    simulation_id: "sim-1".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_mock_exhaustion_errors() {
        let mock = MockSimulationClient::new();
        let result = mock.get_simulation_status("sim-1").await;
        assert!(matches!(
            result,
            Err(SimulationError::Service { status: 0, .. })
        ));
    }
}
