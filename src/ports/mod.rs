//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world; adapters implement them.
//!
//! - `RecordStore` - read-only queries against the external data owner
//! - `ReasoningOracle` - the text-and-tool-call decision service

mod oracle;
mod record_store;

pub use oracle::{
    ChatMessage, MessageRole, OracleError, OracleReply, OracleRequest, ReasoningOracle,
};
pub use record_store::{RecordStore, StoreError};
