//! Data transfer objects for the assistant endpoint.

use serde::{Deserialize, Serialize};

/// Inbound query. A missing `query` field is an empty string, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// Free-text question for the assistant.
    #[serde(default)]
    pub query: String,
}

/// The assistant's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// Final answer text.
    pub reply: String,
}
