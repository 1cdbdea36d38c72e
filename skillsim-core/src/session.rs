//! One simulate-and-poll exchange against the simulation service.

use crate::client::SimulationClient;
use crate::config::PollConfig;
use crate::error::SimulationError;
use crate::retry;
use crate::simulation::{SimulationJob, SimulationStatus};
use crate::skill_io::{NoopSessionIo, SessionIo};
use std::sync::Arc;

/// Wraps a single turn's submit-then-poll cycle.
///
/// `submit` sends the utterance and returns a job handle; `await_result`
/// polls that job to a terminal state with bounded exponential backoff and
/// classifies the outcome. The session IO sink is informed when a turn
/// starts and when its terminal payload arrives.
pub struct SimulationSession {
    client: Arc<dyn SimulationClient>,
    io: Box<dyn SessionIo>,
    poll: PollConfig,
}

impl SimulationSession {
    /// Create a session with the default (no-op) IO sink.
    pub fn new(client: Arc<dyn SimulationClient>, poll: PollConfig) -> Self {
        Self {
            client,
            io: Box::new(NoopSessionIo),
            poll,
        }
    }

    /// Attach a session IO sink.
    #[must_use]
    pub fn with_io(mut self, io: Box<dyn SessionIo>) -> Self {
        self.io = io;
        self
    }

    /// Submit one utterance and return the created job.
    ///
    /// After a successful submit only the job id is trusted; its status is
    /// conceptually in-progress until polled.
    pub async fn submit(
        &mut self,
        utterance: &str,
        is_new_turn: bool,
    ) -> Result<SimulationJob, SimulationError> {
        let job = self.client.start_simulation(utterance, is_new_turn).await?;
        if job.id.is_empty() {
            return Err(SimulationError::MissingSimulationId);
        }
        self.io.start_turn(utterance, is_new_turn);
        log::debug!("simulation {} submitted", job.id);
        Ok(job)
    }

    /// Poll a submitted job to a terminal state.
    ///
    /// A response whose status is in-progress or absent schedules another
    /// attempt. The terminal response is classified:
    /// - still in progress after the whole budget: [`SimulationError::Unresolved`]
    /// - no status at all: the job's TTL expired, [`SimulationError::Expired`]
    /// - failed: [`SimulationError::SimulationFailed`] with the service's message
    /// - successful: returned as-is
    pub async fn await_result(
        &mut self,
        simulation_id: &str,
    ) -> Result<SimulationJob, SimulationError> {
        let client = &self.client;
        let job = retry::poll(
            || {
                let client = Arc::clone(client);
                async move { client.get_simulation_status(simulation_id).await }
            },
            SimulationJob::is_pending,
            &self.poll,
        )
        .await?;

        self.io.end_turn(&job);

        match job.status {
            Some(SimulationStatus::Successful) => Ok(job),
            // The poller always makes at least one attempt, so the reported
            // count is clamped the same way.
            Some(SimulationStatus::InProgress) => Err(SimulationError::Unresolved {
                simulation_id: simulation_id.to_string(),
                attempts: self.poll.max_retry.max(1),
            }),
            Some(SimulationStatus::Failed) => {
                let message = job
                    .result
                    .as_ref()
                    .and_then(|r| r.error_message())
                    .unwrap_or("the skill reported a failure")
                    .to_string();
                Err(SimulationError::SimulationFailed {
                    simulation_id: simulation_id.to_string(),
                    message,
                })
            }
            Some(SimulationStatus::Unknown) | None => Err(SimulationError::Expired {
                simulation_id: simulation_id.to_string(),
            }),
        }
    }

    /// Flush the session IO sink.
    pub fn flush_io(&mut self) -> Result<(), SimulationError> {
        self.io.flush()
    }
}
