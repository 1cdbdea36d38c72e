//! Session IO sink: where per-turn requests and responses get persisted.
//!
//! The dialog engine notifies the sink at three well-defined points:
//! when a turn is submitted, when its terminal poll result arrives, and
//! when the REPL quits (`flush`). The sink decides what, if anything, to
//! keep.

use crate::error::SimulationError;
use crate::simulation::SimulationJob;
use serde::Serialize;
use std::path::PathBuf;

/// Sink for the request/response transcript of a dialog run.
pub trait SessionIo: Send {
    /// A new turn was submitted.
    fn start_turn(&mut self, utterance: &str, is_new_session: bool);

    /// The turn's terminal poll result arrived (success or failure).
    fn end_turn(&mut self, job: &SimulationJob);

    /// Persist whatever the sink buffered. Called on quit.
    fn flush(&mut self) -> Result<(), SimulationError>;
}

/// Sink that keeps nothing.
#[derive(Debug, Default)]
pub struct NoopSessionIo;

impl SessionIo for NoopSessionIo {
    fn start_turn(&mut self, _utterance: &str, _is_new_session: bool) {}

    fn end_turn(&mut self, _job: &SimulationJob) {}

    fn flush(&mut self) -> Result<(), SimulationError> {
        Ok(())
    }
}

/// One buffered turn: what was said and what came back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct TurnRecord {
    utterance: String,
    is_new_session: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<SimulationJob>,
}

/// Sink that buffers turns in memory and writes them as pretty JSON on
/// flush.
#[derive(Debug)]
pub struct FileSessionIo {
    path: PathBuf,
    turns: Vec<TurnRecord>,
}

impl FileSessionIo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            turns: Vec::new(),
        }
    }
}

impl SessionIo for FileSessionIo {
    fn start_turn(&mut self, utterance: &str, is_new_session: bool) {
        self.turns.push(TurnRecord {
            utterance: utterance.to_string(),
            is_new_session,
            response: None,
        });
    }

    fn end_turn(&mut self, job: &SimulationJob) {
        if let Some(turn) = self.turns.last_mut() {
            turn.response = Some(job.clone());
        } else {
            log::warn!("end_turn without a matching start_turn; dropping payload");
        }
    }

    fn flush(&mut self) -> Result<(), SimulationError> {
        let bytes = serde_json::to_vec_pretty(&self.turns).map_err(std::io::Error::from)?;
        std::fs::write(&self.path, bytes)?;
        log::debug!(
            "wrote {} turn(s) of skill IO to {}",
            self.turns.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationStatus;

    #[test]
    fn test_noop_flush_succeeds() {
        let mut sink = NoopSessionIo;
        sink.start_turn("hello", true);
        assert!(sink.flush().is_ok());
    }

    #[test]
    fn test_file_sink_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("skill-io.json");

        let mut sink = FileSessionIo::new(&path);
        sink.start_turn("open the pod bay doors", true);
        sink.end_turn(&SimulationJob {
            id: "sim-1".to_string(),
            status: Some(SimulationStatus::Successful),
            ..Default::default()
        });
        sink.flush().expect("flush should write the file");

        let contents = std::fs::read_to_string(&path).expect("file should exist");
        let parsed: serde_json::Value = serde_json::from_str(&contents).expect("valid JSON");
        assert_eq!(parsed[0]["utterance"], "open the pod bay doors");
        assert_eq!(parsed[0]["isNewSession"], true);
        assert_eq!(parsed[0]["response"]["id"], "sim-1");
    }

    #[test]
    fn test_turn_without_response_serializes_without_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("skill-io.json");

        let mut sink = FileSessionIo::new(&path);
        sink.start_turn("hello", true);
        sink.flush().expect("flush");

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("file")).expect("JSON");
        assert!(parsed[0].get("response").is_none());
    }
}
