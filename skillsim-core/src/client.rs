//! Simulation service client: the trait the dialog engine talks to, plus
//! the HTTP implementation against the remote simulation API.

use crate::error::SimulationError;
use crate::simulation::SimulationJob;
use async_trait::async_trait;
use serde::Serialize;

/// Default endpoint of the public simulation service.
pub const DEFAULT_ENDPOINT: &str = "https://api.skillsim.dev";

/// Session mode sent with a submission: start fresh or continue.
const MODE_FORCE_NEW_SESSION: &str = "FORCE_NEW_SESSION";
const MODE_DEFAULT: &str = "DEFAULT";

/// Client for the asynchronous simulation service.
///
/// `start_simulation` submits one utterance and returns a job handle;
/// `get_simulation_status` polls that job. Implementations carry the
/// skill id, stage and locale fixed for the whole run.
#[async_trait]
pub trait SimulationClient: Send + Sync {
    /// Submit an utterance for simulation and return the created job.
    async fn start_simulation(
        &self,
        utterance: &str,
        force_new_session: bool,
    ) -> Result<SimulationJob, SimulationError>;

    /// Fetch the current state of a previously started simulation.
    async fn get_simulation_status(
        &self,
        simulation_id: &str,
    ) -> Result<SimulationJob, SimulationError>;
}

/// Request body for starting a simulation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationRequest<'a> {
    input: SimulationInput<'a>,
    device: SimulationDevice<'a>,
    session: SimulationSessionMode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationInput<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationDevice<'a> {
    locale: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationSessionMode {
    mode: &'static str,
}

/// reqwest-based client for the remote simulation service.
pub struct HttpSimulationClient {
    http: reqwest::Client,
    endpoint: String,
    skill_id: String,
    stage: String,
    locale: String,
    access_token: String,
}

impl std::fmt::Debug for HttpSimulationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSimulationClient")
            .field("endpoint", &self.endpoint)
            .field("skill_id", &self.skill_id)
            .field("stage", &self.stage)
            .field("locale", &self.locale)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl HttpSimulationClient {
    /// Create a client against the given endpoint.
    pub fn new(
        endpoint: impl Into<String>,
        skill_id: impl Into<String>,
        stage: impl Into<String>,
        locale: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            skill_id: skill_id.into(),
            stage: stage.into(),
            locale: locale.into(),
            access_token: access_token.into(),
        }
    }

    fn simulations_url(&self) -> String {
        format!(
            "{}/v1/skills/{}/stages/{}/simulations",
            self.endpoint, self.skill_id, self.stage
        )
    }

    /// Convert an HTTP response into a job, mapping any status >= 300 into
    /// a service error that embeds the serialized body.
    async fn parse_response(
        response: reqwest::Response,
    ) -> Result<SimulationJob, SimulationError> {
        let status = response.status().as_u16();
        if status >= 300 {
            let body = response.text().await.unwrap_or_default();
            return Err(SimulationError::Service { status, body });
        }
        Ok(response.json::<SimulationJob>().await?)
    }
}

#[async_trait]
impl SimulationClient for HttpSimulationClient {
    async fn start_simulation(
        &self,
        utterance: &str,
        force_new_session: bool,
    ) -> Result<SimulationJob, SimulationError> {
        let body = SimulationRequest {
            input: SimulationInput { content: utterance },
            device: SimulationDevice {
                locale: &self.locale,
            },
            session: SimulationSessionMode {
                mode: if force_new_session {
                    MODE_FORCE_NEW_SESSION
                } else {
                    MODE_DEFAULT
                },
            },
        };

        log::debug!(
            "submitting simulation for skill {} (new session: {})",
            self.skill_id,
            force_new_session
        );

        let response = self
            .http
            .post(self.simulations_url())
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn get_simulation_status(
        &self,
        simulation_id: &str,
    ) -> Result<SimulationJob, SimulationError> {
        let url = format!("{}/{}", self.simulations_url(), simulation_id);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
