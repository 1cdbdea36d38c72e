use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while submitting and polling a simulation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimulationError {
    /// The utterance was empty after trimming; nothing was sent.
    #[error("utterance cannot be empty")]
    EmptyUtterance,

    /// No response from the simulation service (network failure, DNS, etc.)
    #[error("no response from the simulation service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an HTTP error status (>= 300).
    #[error("simulation service returned status {status}: {body}")]
    Service { status: u16, body: String },

    /// The service accepted the simulation but returned no id to poll.
    #[error("simulation service returned a job without an id")]
    MissingSimulationId,

    /// The terminal poll response carried no status at all, meaning the
    /// simulation's time to live expired before we read its result.
    #[error("simulation {simulation_id} time to live expired; its result is no longer available")]
    Expired { simulation_id: String },

    /// The simulation was still in progress after the whole retry budget.
    #[error("simulation {simulation_id} status was not resolved after {attempts} attempts")]
    Unresolved { simulation_id: String, attempts: u32 },

    /// The skill itself failed to handle the simulated request.
    #[error("simulation {simulation_id} failed: {message}")]
    SimulationFailed {
        simulation_id: String,
        message: String,
    },

    /// Filesystem error from the session IO sink.
    #[error("session IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    /// Check if this error is a local validation failure.
    ///
    /// Validation failures never reach the network and are surfaced as
    /// warnings rather than errors; the turn is a no-op.
    pub fn is_validation(&self) -> bool {
        matches!(self, SimulationError::EmptyUtterance)
    }

    /// Check if this error means the poll budget ran out rather than the
    /// skill failing: the simulation either outlived its TTL or never left
    /// the in-progress state.
    pub fn is_exhausted(&self) -> bool {
        matches!(
            self,
            SimulationError::Expired { .. } | SimulationError::Unresolved { .. }
        )
    }
}

/// Errors that can occur loading or writing a replay script.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReplayError {
    /// The replay file could not be read.
    #[error("failed to read replay script {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The replay file is not valid JSON or misses required fields.
    #[error("failed to parse replay script {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The replay file parsed but lists no utterances to play.
    #[error("replay script {path} contains no user inputs")]
    EmptyScript { path: PathBuf },

    /// The replay file declares a type other than "text".
    #[error("unsupported replay script type {found:?}; only \"text\" is supported")]
    UnsupportedType { found: String },

    /// The replay file could not be written.
    #[error("failed to write replay script {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty(SimulationError::EmptyUtterance, &["empty"])]
    #[case::service(
        SimulationError::Service { status: 403, body: "{\"message\":\"forbidden\"}".into() },
        &["403", "forbidden"]
    )]
    #[case::expired(
        SimulationError::Expired { simulation_id: "sim-1".into() },
        &["sim-1", "time to live expired"]
    )]
    #[case::unresolved(
        SimulationError::Unresolved { simulation_id: "sim-1".into(), attempts: 30 },
        &["sim-1", "not resolved after 30"]
    )]
    #[case::failed(
        SimulationError::SimulationFailed { simulation_id: "sim-1".into(), message: "skill endpoint 500".into() },
        &["sim-1", "failed", "skill endpoint 500"]
    )]
    fn test_simulation_error_display(#[case] error: SimulationError, #[case] expected: &[&str]) {
        let display = error.to_string();
        for s in expected {
            assert!(display.contains(s), "Expected '{}' in '{}'", s, display);
        }
    }

    /// Expiry and failure must stay distinguishable by their message text,
    /// so the user can tell a timeout from a skill-side failure.
    #[test]
    fn test_expired_distinct_from_failed() {
        let expired = SimulationError::Expired {
            simulation_id: "sim-1".into(),
        }
        .to_string();
        let failed = SimulationError::SimulationFailed {
            simulation_id: "sim-1".into(),
            message: "boom".into(),
        }
        .to_string();
        assert_ne!(expired, failed);
        assert!(expired.contains("expired"));
        assert!(!failed.contains("expired"));
    }

    #[rstest]
    #[case::empty(SimulationError::EmptyUtterance, true)]
    #[case::expired(SimulationError::Expired { simulation_id: "s".into() }, false)]
    fn test_is_validation(#[case] error: SimulationError, #[case] expected: bool) {
        assert_eq!(error.is_validation(), expected);
    }

    #[rstest]
    #[case::expired(SimulationError::Expired { simulation_id: "s".into() }, true)]
    #[case::unresolved(SimulationError::Unresolved { simulation_id: "s".into(), attempts: 3 }, true)]
    #[case::failed(
        SimulationError::SimulationFailed { simulation_id: "s".into(), message: "m".into() },
        false
    )]
    #[case::empty(SimulationError::EmptyUtterance, false)]
    fn test_is_exhausted(#[case] error: SimulationError, #[case] expected: bool) {
        assert_eq!(error.is_exhausted(), expected);
    }

    #[test]
    fn test_replay_error_display() {
        let err = ReplayError::EmptyScript {
            path: PathBuf::from("script.json"),
        };
        assert!(err.to_string().contains("script.json"));
        assert!(err.to_string().contains("no user inputs"));
    }
}
