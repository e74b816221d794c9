//! Query orchestrator - the two-phase oracle protocol.
//!
//! Phase one presents the user query and the tool catalog; the oracle either
//! answers directly or requests tool calls. Phase two feeds every executed
//! tool's normalized result back (keyed by correlation id) and takes the
//! single synthesis reply as the final answer. The protocol is an explicit
//! typed state machine so retry or timeout policy can later attach to a
//! specific state without touching the business logic.
//!
//! Dispatcher failures never abort a turn - they are content for the oracle.
//! Oracle transport failures abort the turn; retrying them is the transport
//! adapter's job, not this layer's.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::ports::{ChatMessage, OracleReply, OracleRequest, ReasoningOracle};

use super::catalog::CATALOG;
use super::dispatcher::ToolDispatcher;
use super::errors::AssistantError;
use super::invocation::ToolInvocation;
use super::normalize;
use super::selection::SelectionKey;

/// Fixed phase-one instruction: the oracle must retrieve, not invent.
const SYSTEM_INSTRUCTION: &str = "You are the ERP data assistant. Answer questions about \
     employees, vendors, customers and inventory. Use the provided tools to read the record \
     store; never guess data you have not retrieved. If a question needs no record data, \
     answer it directly.";

/// Fixed phase-two instruction appended after the tool results.
const SYNTHESIS_INSTRUCTION: &str =
    "Using the tool results above, format a clean, plain-language answer for the user.";

/// States of one assistant turn.
enum TurnState {
    Start {
        query: String,
    },
    AwaitingDecision {
        messages: Vec<ChatMessage>,
    },
    ExecutingTools {
        messages: Vec<ChatMessage>,
        invocations: Vec<ToolInvocation>,
    },
    AwaitingSynthesis {
        messages: Vec<ChatMessage>,
    },
    Done(String),
}

/// Drives the two-phase protocol for one query at a time.
pub struct QueryOrchestrator {
    oracle: Arc<dyn ReasoningOracle>,
    dispatcher: Arc<ToolDispatcher>,
}

impl QueryOrchestrator {
    pub fn new(oracle: Arc<dyn ReasoningOracle>, dispatcher: Arc<ToolDispatcher>) -> Self {
        Self { oracle, dispatcher }
    }

    /// Runs one query through the protocol and returns the final reply text.
    #[instrument(skip_all, fields(session = key.as_str()))]
    pub async fn answer(&self, key: &SelectionKey, query: &str) -> Result<String, AssistantError> {
        let mut state = TurnState::Start {
            query: query.to_string(),
        };

        loop {
            state = match state {
                TurnState::Start { query } => TurnState::AwaitingDecision {
                    messages: vec![
                        ChatMessage::system(SYSTEM_INSTRUCTION),
                        ChatMessage::user(query),
                    ],
                },

                TurnState::AwaitingDecision { messages } => {
                    let request =
                        OracleRequest::new(messages.clone()).with_tools(CATALOG.to_wire());
                    match self.oracle.decide(request).await? {
                        OracleReply::Text(text) => TurnState::Done(text),
                        OracleReply::ToolCalls(invocations) if invocations.is_empty() => {
                            return Err(AssistantError::MalformedReply(
                                "decision turn carried an empty tool-call list".to_string(),
                            ));
                        }
                        OracleReply::ToolCalls(invocations) => TurnState::ExecutingTools {
                            messages,
                            invocations,
                        },
                    }
                }

                TurnState::ExecutingTools {
                    mut messages,
                    invocations,
                } => {
                    // Echo the requesting turn, then execute every invocation
                    // in the oracle's declaration order.
                    messages.push(ChatMessage::assistant_tool_calls(invocations.clone()));
                    for invocation in &invocations {
                        debug!(tool = invocation.name(), id = invocation.id(), "executing tool");
                        let result = self
                            .dispatcher
                            .execute(key, invocation.name(), invocation.arguments())
                            .await;
                        let normalized = normalize::normalize(result);
                        messages
                            .push(ChatMessage::tool_result(invocation.id(), normalized.to_string()));
                    }
                    TurnState::AwaitingSynthesis { messages }
                }

                TurnState::AwaitingSynthesis { mut messages } => {
                    messages.push(ChatMessage::system(SYNTHESIS_INSTRUCTION));
                    // No tools offered: the synthesis turn must be text.
                    match self.oracle.decide(OracleRequest::new(messages)).await? {
                        OracleReply::Text(text) => TurnState::Done(text),
                        OracleReply::ToolCalls(_) => {
                            return Err(AssistantError::MalformedReply(
                                "oracle requested tools during synthesis".to_string(),
                            ));
                        }
                    }
                }

                TurnState::Done(text) => return Ok(text),
            };
        }
    }
}
