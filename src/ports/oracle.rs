//! Reasoning oracle port - interface to the external decision-maker.
//!
//! The oracle is an opaque, stateless text-and-tool-call service: given the
//! conversation so far and the tool catalog, it either answers directly or
//! requests tool invocations. Adapters translate between this vocabulary and
//! a concrete provider protocol.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::assistant::ToolInvocation;

/// Port for reasoning oracle interactions.
#[async_trait]
pub trait ReasoningOracle: Send + Sync {
    /// Submits one conversation turn and returns the oracle's decision.
    async fn decide(&self, request: OracleRequest) -> Result<OracleReply, OracleError>;
}

/// One request to the oracle: conversation plus selectable operations.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    /// Conversation messages, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Tool declarations the oracle may select from. Empty means the oracle
    /// must answer in text (synthesis phase).
    pub tools: Vec<serde_json::Value>,
}

impl OracleRequest {
    /// Creates a request with no selectable tools.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            tools: Vec::new(),
        }
    }

    /// Attaches tool declarations.
    pub fn with_tools(mut self, tools: Vec<serde_json::Value>) -> Self {
        self.tools = tools;
        self
    }
}

/// A message in the oracle conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who produced this entry.
    pub role: MessageRole,
    /// Text content. Empty for a pure tool-call turn.
    pub content: String,
    /// Correlation id linking a tool result to the call it answers.
    pub tool_call_id: Option<String>,
    /// Tool calls carried by an assistant turn.
    pub tool_calls: Vec<ToolInvocation>,
}

impl ChatMessage {
    /// System instruction.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
            tool_call_id: None,
            tool_calls: Vec::new(),
        }
    }

    /// End-user input.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            tool_call_id: None,
            tool_calls: Vec::new(),
        }
    }

    /// Assistant text reply.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tool_call_id: None,
            tool_calls: Vec::new(),
        }
    }

    /// Assistant turn that requested tool calls; echoed back before results.
    pub fn assistant_tool_calls(calls: Vec<ToolInvocation>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: String::new(),
            tool_call_id: None,
            tool_calls: calls,
        }
    }

    /// One executed tool's result, tagged with its correlation id.
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: content.into(),
            tool_call_id: Some(call_id.into()),
            tool_calls: Vec::new(),
        }
    }
}

/// Role of a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions (guides oracle behavior).
    System,
    /// End-user input.
    User,
    /// Oracle output.
    Assistant,
    /// Executed tool result fed back to the oracle.
    Tool,
}

/// The oracle's decision for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleReply {
    /// Plain text answer.
    Text(String),
    /// One or more tool invocations, in the oracle's declaration order.
    ToolCalls(Vec<ToolInvocation>),
}

/// Oracle transport errors.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("oracle unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl OracleError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is worth retrying at the transport layer.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OracleError::RateLimited { .. }
                | OracleError::Unavailable { .. }
                | OracleError::Network(_)
                | OracleError::Timeout { .. }
        )
    }
}
