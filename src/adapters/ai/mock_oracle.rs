//! Scripted mock oracle for testing.
//!
//! Replies are queued up front and consumed in order, so a test can script a
//! whole two-phase exchange (tool calls, then synthesis text) without any
//! network. Requests are captured for verification.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::assistant::ToolInvocation;
use crate::ports::{OracleError, OracleReply, OracleRequest, ReasoningOracle};

/// A scripted reply or failure.
#[derive(Debug)]
enum Scripted {
    Reply(OracleReply),
    Error(OracleError),
}

/// Mock implementation of [`ReasoningOracle`].
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    /// Scripted outcomes, consumed front to back.
    script: Arc<Mutex<VecDeque<Scripted>>>,
    /// Captured requests for verification.
    calls: Arc<Mutex<Vec<OracleRequest>>>,
}

impl MockOracle {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a plain text reply.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(Scripted::Reply(OracleReply::Text(text.into())));
        self
    }

    /// Queues a tool-call reply.
    pub fn with_tool_calls(self, invocations: Vec<ToolInvocation>) -> Self {
        self.push(Scripted::Reply(OracleReply::ToolCalls(invocations)));
        self
    }

    /// Queues a transport failure.
    pub fn with_error(self, error: OracleError) -> Self {
        self.push(Scripted::Error(error));
        self
    }

    /// Builds an invocation with a generated correlation id.
    pub fn invocation(name: impl Into<String>, raw_arguments: &str) -> ToolInvocation {
        let id = format!("call_{}", Uuid::new_v4().simple());
        ToolInvocation::from_encoded(id, name, raw_arguments)
    }

    /// Returns the captured requests.
    pub fn calls(&self) -> Vec<OracleRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn push(&self, scripted: Scripted) {
        self.script.lock().unwrap().push_back(scripted);
    }
}

#[async_trait]
impl ReasoningOracle for MockOracle {
    async fn decide(&self, request: OracleRequest) -> Result<OracleReply, OracleError> {
        self.calls.lock().unwrap().push(request);

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Error(error)) => Err(error),
            None => Err(OracleError::unavailable("mock oracle script exhausted")),
        }
    }
}
