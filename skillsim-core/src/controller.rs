//! Cross-turn conversation state and the per-turn evaluation pipeline.

use crate::error::SimulationError;
use crate::session::SimulationSession;

/// Hook for progress milestones inside one turn's evaluation.
///
/// The REPL uses this to relabel its spinner once the simulation id is
/// known; tests and replay paths that want silence use [`SilentObserver`].
pub trait TurnObserver {
    /// The utterance was accepted and a simulation job now exists.
    fn on_submitted(&mut self, simulation_id: &str) {
        let _ = simulation_id;
    }
}

/// Observer that ignores all milestones.
#[derive(Debug, Default)]
pub struct SilentObserver;

impl TurnObserver for SilentObserver {}

/// Mutable state shared by every turn of one REPL run.
///
/// `is_new_turn` starts true; it flips to false after the first successful
/// turn and resets to true the instant a turn's result signals
/// end-of-session. `utterance_cache` is append-only within a session and
/// clears exactly when the session ends; the record command serializes it
/// into a replay script.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    pub skill_id: String,
    pub locale: String,
    pub stage: String,
    pub is_new_turn: bool,
    pub utterance_cache: Vec<String>,
}

impl ConversationSession {
    pub fn new(
        skill_id: impl Into<String>,
        locale: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            skill_id: skill_id.into(),
            locale: locale.into(),
            stage: stage.into(),
            is_new_turn: true,
            utterance_cache: Vec::new(),
        }
    }
}

/// Drives one [`SimulationSession`] per turn and owns the conversation
/// state across turns.
pub struct ConversationController {
    session: ConversationSession,
    simulation: SimulationSession,
}

impl ConversationController {
    pub fn new(session: ConversationSession, simulation: SimulationSession) -> Self {
        Self {
            session,
            simulation,
        }
    }

    /// The conversation state, read-only.
    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Evaluate one utterance: submit, poll, classify, extract captions.
    ///
    /// Blank input is rejected locally without a network call. The trimmed
    /// utterance is appended to the cache only once submit succeeds. A
    /// result that ends the session resets the conversation to a new
    /// session and clears the cache; any error leaves the session state
    /// exactly as it was.
    pub async fn evaluate_utterance(
        &mut self,
        input: &str,
        observer: &mut dyn TurnObserver,
    ) -> Result<Vec<String>, SimulationError> {
        let utterance = input.trim();
        if utterance.is_empty() {
            return Err(SimulationError::EmptyUtterance);
        }

        let job = self
            .simulation
            .submit(utterance, self.session.is_new_turn)
            .await?;
        self.session.utterance_cache.push(utterance.to_string());
        observer.on_submitted(&job.id);

        let finished = self.simulation.await_result(&job.id).await?;
        let result = finished.result.unwrap_or_default();

        if result.ends_session() {
            log::debug!("skill ended the session; next turn starts fresh");
            self.session.is_new_turn = true;
            self.session.utterance_cache.clear();
        } else {
            self.session.is_new_turn = false;
        }

        Ok(result.captions())
    }

    /// Flush the underlying session IO sink. Called by the quit command.
    pub fn flush_io(&mut self) -> Result<(), SimulationError> {
        self.simulation.flush_io()
    }
}
