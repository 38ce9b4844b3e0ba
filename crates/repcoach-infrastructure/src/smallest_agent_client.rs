//! SmallestAgentClient - REST implementation of the agent service.
//!
//! Talks to the Smallest.ai Atoms API directly over HTTP. Configuration
//! comes from the `SMALLEST_API_KEY` environment variable.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use repcoach_core::error::{CoachError, Result};
use repcoach_core::services::AgentService;

const BASE_URL: &str = "https://atoms-api.smallest.ai/api/v1";

/// Agent service implementation that talks to the Atoms HTTP API.
#[derive(Clone, Debug)]
pub struct SmallestAgentClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SmallestAgentClient {
    /// Creates a new client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Loads the API key from `SMALLEST_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Config` when the variable is unset.
    pub fn try_from_env() -> Result<Self> {
        let api_key = std::env::var("SMALLEST_API_KEY")
            .map_err(|_| CoachError::config("SMALLEST_API_KEY not set"))?;
        Ok(Self::new(api_key))
    }

    /// Overrides the API base URL after construction.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn post_json<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| CoachError::agent_unavailable(format!("request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| CoachError::agent_unavailable(format!("malformed response: {err}")))
    }
}

#[async_trait]
impl AgentService for SmallestAgentClient {
    async fn create_agent(&self, display_name: &str, persona_prompt: &str) -> Result<String> {
        let request = CreateAgentRequest {
            name: display_name,
            global_prompt: persona_prompt,
        };
        let response: CreateAgentResponse = self.post_json("agents", &request).await?;
        let agent_id = response
            .id
            .or(response.agent_id)
            .ok_or_else(|| CoachError::agent_unavailable("response carried no agent id"))?;

        tracing::info!(target: "agent", agent_id = %agent_id, name = display_name, "agent created");
        Ok(agent_id)
    }

    async fn converse_text(&self, agent_id: &str, user_text: &str) -> Result<String> {
        let request = ConverseRequest {
            message: user_text,
        };
        let path = format!("agents/{agent_id}/converse");
        let response: ConverseResponse = self.post_json(&path, &request).await?;
        response
            .reply
            .or(response.message)
            .ok_or_else(|| CoachError::agent_unavailable("response carried no reply text"))
    }
}

#[derive(Serialize)]
struct CreateAgentRequest<'a> {
    name: &'a str,
    #[serde(rename = "globalPrompt")]
    global_prompt: &'a str,
}

#[derive(Deserialize)]
struct CreateAgentResponse {
    id: Option<String>,
    #[serde(rename = "agentId")]
    agent_id: Option<String>,
}

#[derive(Serialize)]
struct ConverseRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ConverseResponse {
    reply: Option<String>,
    message: Option<String>,
}

fn map_http_error(status: StatusCode, body: &str) -> CoachError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CoachError::config(format!("agent API rejected credentials ({status})"))
        }
        _ => CoachError::agent_unavailable(format!("{status}: {body}")),
    }
}
