//! OpenAI-compatible reasoning oracle adapter.
//!
//! Talks to a chat-completions endpoint with function calling: the tool
//! catalog rides in the `tools` field, and the oracle's decision comes back
//! as either message content (direct answer) or `tool_calls` (invocation
//! requests, arguments as encoded JSON text). Transient transport failures
//! are retried here with exponential backoff; the orchestrator above never
//! retries.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::AiConfig;
use crate::domain::assistant::ToolInvocation;
use crate::ports::{
    ChatMessage, MessageRole, OracleError, OracleReply, OracleRequest, ReasoningOracle,
};

/// Configuration for the OpenAI oracle adapter.
#[derive(Debug, Clone)]
pub struct OpenAiOracleConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model sent with every request.
    pub model: String,
    /// Base URL of the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAiOracleConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4.1-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    /// Builds adapter configuration from the application config section.
    pub fn from_app_config(config: &AiConfig) -> Self {
        Self {
            api_key: Secret::new(config.api_key.clone().unwrap_or_default()),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            max_retries: config.max_retries,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible oracle implementation.
pub struct OpenAiOracle {
    config: OpenAiOracleConfig,
    client: Client,
}

impl OpenAiOracle {
    /// Creates a new oracle client with the given configuration.
    pub fn new(config: OpenAiOracleConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts a port request to the wire format.
    fn to_wire_request(&self, request: &OracleRequest) -> WireRequest {
        WireRequest {
            model: self.config.model.clone(),
            messages: request.messages.iter().map(to_wire_message).collect(),
            tools: if request.tools.is_empty() {
                None
            } else {
                Some(request.tools.clone())
            },
        }
    }

    /// Sends one request attempt.
    async fn send_request(&self, request: &OracleRequest) -> Result<Response, OracleError> {
        let wire_request = self.to_wire_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    OracleError::network(format!("Connection failed: {}", e))
                } else {
                    OracleError::network(e.to_string())
                }
            })
    }

    /// Maps the response status to the error taxonomy.
    async fn handle_response_status(&self, response: Response) -> Result<Response, OracleError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(OracleError::AuthenticationFailed),
            429 => Err(OracleError::rate_limited(parse_retry_after(&error_body))),
            400 => Err(OracleError::InvalidRequest(error_body)),
            500..=599 => Err(OracleError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(OracleError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses a successful response body into an oracle reply.
    async fn parse_response(&self, response: Response) -> Result<OracleReply, OracleError> {
        let response = self.handle_response_status(response).await?;

        let wire_response: WireResponse = response
            .json()
            .await
            .map_err(|e| OracleError::parse(format!("Failed to parse response: {}", e)))?;

        let choice = wire_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| OracleError::parse("No choices in response"))?;

        decode_reply(choice.message)
    }
}

#[async_trait]
impl ReasoningOracle for OpenAiOracle {
    async fn decide(&self, request: OracleRequest) -> Result<OracleReply, OracleError> {
        let mut last_error = OracleError::network("No attempts made");
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            match self.send_request(&request).await {
                Ok(response) => match self.parse_response(response).await {
                    Ok(reply) => return Ok(reply),
                    Err(err) => {
                        if !err.is_retryable() || retry_count >= self.config.max_retries {
                            return Err(err);
                        }
                        last_error = err;
                    }
                },
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    last_error = err;
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            let delay = Duration::from_secs(1 << retry_count);
            sleep(delay).await;
            retry_count += 1;
        }

        Err(last_error)
    }
}

/// Converts a conversation message to the wire shape.
fn to_wire_message(message: &ChatMessage) -> WireMessage {
    let role = match message.role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
        MessageRole::Tool => "tool",
    };

    let tool_calls = if message.tool_calls.is_empty() {
        None
    } else {
        Some(
            message
                .tool_calls
                .iter()
                .map(|call| WireToolCall {
                    id: call.id().to_string(),
                    kind: "function".to_string(),
                    function: WireFunction {
                        name: call.name().to_string(),
                        arguments: call.arguments_json(),
                    },
                })
                .collect(),
        )
    };

    WireMessage {
        role: role.to_string(),
        // An assistant turn that only requests tools has no content field.
        content: if message.content.is_empty() && tool_calls.is_some() {
            None
        } else {
            Some(message.content.clone())
        },
        tool_calls,
        tool_call_id: message.tool_call_id.clone(),
    }
}

/// Decodes a response message into a reply, argument text decoded leniently.
fn decode_reply(message: WireResponseMessage) -> Result<OracleReply, OracleError> {
    if let Some(calls) = message.tool_calls {
        if !calls.is_empty() {
            let invocations = calls
                .into_iter()
                .map(|call| {
                    ToolInvocation::from_encoded(call.id, call.function.name, &call.function.arguments)
                })
                .collect();
            return Ok(OracleReply::ToolCalls(invocations));
        }
    }

    match message.content {
        Some(text) => Ok(OracleReply::Text(text)),
        None => Err(OracleError::parse(
            "Response carried neither content nor tool calls",
        )),
    }
}

/// Parses retry-after from an error response body, defaulting to 30s.
fn parse_retry_after(error_body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
        if let Some(msg) = parsed.get("error").and_then(|e| e.get("message")) {
            if let Some(s) = msg.as_str() {
                if let Some(idx) = s.find("try again in ") {
                    let rest = &s[idx + 13..];
                    if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                        if let Ok(secs) = rest[..num_end].parse::<u32>() {
                            return secs;
                        }
                    }
                }
            }
        }
    }
    30
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    function: WireFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}
