//! Wire types for simulation jobs and their nested results.
//!
//! The simulation service reports results through a deeply nested structure;
//! every layer is optional on the wire, so each struct defaults missing
//! fields rather than failing deserialization. Helper methods on
//! [`SimulationResult`] flatten the nesting into the two facts the dialog
//! engine cares about: did the skill end the session, and what captions
//! should the user see.

use serde::{Deserialize, Serialize};

/// Status of an asynchronous simulation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulationStatus {
    InProgress,
    Successful,
    Failed,
    /// Any status string this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A simulation job as returned by the service.
///
/// Right after submission only `id` is guaranteed to be present. A missing
/// `status` on a polled job means the job's time to live expired.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationJob {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SimulationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SimulationResult>,
}

impl SimulationJob {
    /// Check whether this job still needs another poll: the status is
    /// either reported as in-progress or not reported yet.
    pub fn is_pending(&self) -> bool {
        matches!(self.status, None | Some(SimulationStatus::InProgress))
    }
}

/// The payload of a finished simulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_execution_info: Option<SkillExecutionInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_execution_info: Option<DeviceExecutionInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// Per-skill invocation trace for one turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillExecutionInfo {
    pub invocations: Vec<Invocation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invocation_response: Option<InvocationResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvocationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ResponseBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<SkillResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

/// What the simulated device rendered for one turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceExecutionInfo {
    pub responses: Vec<DeviceResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Error detail attached to a failed simulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SimulationResult {
    /// Check whether any invocation's response asked to end the session.
    pub fn ends_session(&self) -> bool {
        self.skill_execution_info
            .iter()
            .flat_map(|info| &info.invocations)
            .filter_map(|invocation| invocation.invocation_response.as_ref())
            .filter_map(|response| response.body.as_ref())
            .filter_map(|body| body.response.as_ref())
            .any(|response| response.should_end_session.unwrap_or(false))
    }

    /// Collect the user-visible captions, one per response entry that
    /// carries one. Absent structures yield an empty list, never an error.
    pub fn captions(&self) -> Vec<String> {
        self.device_execution_info
            .iter()
            .flat_map(|info| &info.responses)
            .filter_map(|response| response.content.as_ref())
            .filter_map(|content| content.caption.clone())
            .collect()
    }

    /// The failure message attached by the service, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SimulationJob {
        serde_json::from_value(value).expect("job should deserialize")
    }

    #[test]
    fn test_status_parses_wire_names() {
        let job = parse(json!({ "id": "sim-1", "status": "IN_PROGRESS" }));
        assert_eq!(job.status, Some(SimulationStatus::InProgress));
        assert!(job.is_pending());

        let job = parse(json!({ "id": "sim-1", "status": "SUCCESSFUL" }));
        assert_eq!(job.status, Some(SimulationStatus::Successful));
        assert!(!job.is_pending());
    }

    #[test]
    fn test_absent_status_is_pending() {
        let job = parse(json!({ "id": "sim-1" }));
        assert_eq!(job.status, None);
        assert!(job.is_pending());
    }

    #[test]
    fn test_unrecognized_status_maps_to_unknown() {
        let job = parse(json!({ "id": "sim-1", "status": "THROTTLED" }));
        assert_eq!(job.status, Some(SimulationStatus::Unknown));
    }

    #[test]
    fn test_full_result_extraction() {
        let job = parse(json!({
            "id": "sim-1",
            "status": "SUCCESSFUL",
            "result": {
                "skillExecutionInfo": {
                    "invocations": [
                        { "invocationResponse": { "body": { "response": { "shouldEndSession": false } } } }
                    ]
                },
                "deviceExecutionInfo": {
                    "responses": [
                        { "content": { "caption": "hello" } },
                        { "content": { "caption": "anything else?" } }
                    ]
                }
            }
        }));

        let result = job.result.expect("result should be present");
        assert!(!result.ends_session());
        assert_eq!(result.captions(), vec!["hello", "anything else?"]);
    }

    #[test]
    fn test_end_of_session_flag() {
        let job = parse(json!({
            "id": "sim-1",
            "status": "SUCCESSFUL",
            "result": {
                "skillExecutionInfo": {
                    "invocations": [
                        { "invocationResponse": { "body": { "response": {} } } },
                        { "invocationResponse": { "body": { "response": { "shouldEndSession": true } } } }
                    ]
                }
            }
        }));

        assert!(job.result.expect("result").ends_session());
    }

    #[test]
    fn test_missing_structures_yield_empty_captions() {
        let result = SimulationResult::default();
        assert!(result.captions().is_empty());
        assert!(!result.ends_session());

        // Responses without content, and content without captions.
        let job = parse(json!({
            "id": "sim-1",
            "status": "SUCCESSFUL",
            "result": { "deviceExecutionInfo": { "responses": [ {}, { "content": {} } ] } }
        }));
        assert!(job.result.expect("result").captions().is_empty());
    }

    #[test]
    fn test_error_message_extraction() {
        let job = parse(json!({
            "id": "sim-1",
            "status": "FAILED",
            "result": { "error": { "message": "skill endpoint returned 500" } }
        }));

        let result = job.result.expect("result");
        assert_eq!(result.error_message(), Some("skill endpoint returned 500"));
    }
}
