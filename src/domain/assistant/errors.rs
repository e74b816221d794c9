//! Assistant error taxonomy.
//!
//! Tool-level failures (bad arguments, empty lookups, missing selection
//! state) are not errors here - they travel as `{"error": ...}` result
//! values. Only oracle transport failures and malformed oracle replies fail
//! a turn.

use thiserror::Error;

use crate::ports::OracleError;

/// Failures that abort an assistant turn.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The reasoning oracle was unreachable or rejected the request.
    #[error("reasoning oracle failure: {0}")]
    ExternalService(#[from] OracleError),

    /// The oracle replied with something the protocol does not allow.
    #[error("malformed oracle reply: {0}")]
    MalformedReply(String),
}
