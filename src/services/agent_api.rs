use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::config::AgentApiSettings;

/// Errors that can occur when asking an agent to act
#[derive(Debug, Error)]
pub enum AgentApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid experience API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Kind of action requested from an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// Opening message of a date
    Post,
    /// Answer to the partner's previous message
    Reply,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Post => f.write_str("post"),
            ActionType::Reply => f.write_str("reply"),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionRequest<'a> {
    experience_id: &'a str,
    agent_username: &'a str,
    action_type: ActionType,
    context: &'a str,
    api_key: &'a str,
}

/// Client for the experience platform's agent-action webhook
///
/// Each call relays a prompt to one agent and waits for its reply.
pub struct AgentActionClient {
    action_url: String,
    experience_id: String,
    api_key: String,
    client: Client,
}

impl AgentActionClient {
    pub fn new(
        action_url: String,
        experience_id: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, AgentApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            action_url,
            experience_id,
            api_key,
            client,
        })
    }

    pub fn from_settings(settings: &AgentApiSettings) -> Result<Self, AgentApiError> {
        if settings.api_key.is_empty() {
            tracing::warn!("No experience API key configured; agent actions will likely be rejected");
        }

        Self::new(
            settings.action_url.clone(),
            settings.experience_id.clone(),
            settings.api_key.clone(),
            Duration::from_secs(settings.timeout_secs.unwrap_or(30)),
        )
    }

    /// Ask an agent to act on `context`.
    ///
    /// Returns the agent's `response` text as sent (possibly empty), or
    /// `None` when the platform answered without one.
    pub async fn request_action(
        &self,
        agent_username: &str,
        action_type: ActionType,
        context: &str,
    ) -> Result<Option<String>, AgentApiError> {
        let body = ActionRequest {
            experience_id: &self.experience_id,
            agent_username,
            action_type,
            context,
            api_key: &self.api_key,
        };

        let request_id = uuid::Uuid::new_v4();
        tracing::debug!(
            "Requesting {} action from {} (request {})",
            action_type,
            agent_username,
            request_id
        );

        let response = self
            .client
            .post(&self.action_url)
            .header("X-Request-Id", request_id.to_string())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AgentApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(AgentApiError::ApiError(format!(
                "Action for {} failed: {}",
                agent_username, status
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| AgentApiError::InvalidResponse(e.to_string()))?;

        Ok(json.get("response").and_then(Value::as_str).map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> AgentActionClient {
        AgentActionClient::new(
            format!("{}/action", server.url()),
            "mesh".to_string(),
            "secret".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_request_action_sends_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/action")
            .match_header("x-request-id", Matcher::Regex("^[0-9a-f-]{36}$".to_string()))
            .match_body(Matcher::Json(json!({
                "experienceId": "mesh",
                "agentUsername": "nova",
                "actionType": "post",
                "context": "Say hi",
                "apiKey": "secret"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response":"Hi there"}"#)
            .create_async()
            .await;

        let reply = client_for(&server)
            .request_action("nova", ActionType::Post, "Say hi")
            .await
            .unwrap();

        assert_eq!(reply.as_deref(), Some("Hi there"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_response_field() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/action")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"queued":true}"#)
            .create_async()
            .await;

        let reply = client_for(&server)
            .request_action("nova", ActionType::Reply, "...")
            .await
            .unwrap();

        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_empty_response_is_kept() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/action")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response":""}"#)
            .create_async()
            .await;

        let reply = client_for(&server)
            .request_action("nova", ActionType::Reply, "...")
            .await
            .unwrap();

        assert_eq!(reply.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/action")
            .match_body(Matcher::PartialJson(json!({ "agentUsername": "locked" })))
            .with_status(401)
            .create_async()
            .await;
        server
            .mock("POST", "/action")
            .match_body(Matcher::PartialJson(json!({ "agentUsername": "broken" })))
            .with_status(502)
            .create_async()
            .await;

        let client = client_for(&server);

        let err = client.request_action("locked", ActionType::Post, "hi").await.unwrap_err();
        assert!(matches!(err, AgentApiError::Unauthorized));

        let err = client.request_action("broken", ActionType::Post, "hi").await.unwrap_err();
        assert!(matches!(err, AgentApiError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/action")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = client_for(&server)
            .request_action("nova", ActionType::Post, "hi")
            .await
            .unwrap_err();

        assert!(matches!(err, AgentApiError::InvalidResponse(_)));
    }
}
