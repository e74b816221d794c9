//! Tool invocations issued by the reasoning oracle.
//!
//! An invocation is transient: created while decoding one oracle response,
//! consumed immediately by the dispatcher. The oracle encodes arguments as
//! text; decoding is lenient by contract - malformed argument text becomes an
//! empty argument map rather than failing the turn.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single tool call requested by the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Correlation token issued by the oracle for this call.
    id: String,

    /// Requested tool name (may or may not be in the catalog).
    name: String,

    /// Decoded arguments.
    arguments: Map<String, Value>,
}

impl ToolInvocation {
    /// Creates an invocation from already-decoded arguments.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Creates an invocation from the oracle's encoded argument text.
    pub fn from_encoded(id: impl Into<String>, name: impl Into<String>, raw_arguments: &str) -> Self {
        Self::new(id, name, decode_arguments(raw_arguments))
    }

    /// Returns the correlation id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the requested tool name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the decoded arguments.
    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }

    /// Re-encodes the arguments for echoing the call back to the oracle.
    pub fn arguments_json(&self) -> String {
        Value::Object(self.arguments.clone()).to_string()
    }
}

/// Decodes oracle argument text into a key/value mapping.
///
/// Anything that is not a well-formed JSON object decodes to an empty map:
/// the dispatcher then reports missing required arguments as an ordinary
/// error value instead of the whole turn failing.
pub fn decode_arguments(raw: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_well_formed_arguments() {
        let invocation =
            ToolInvocation::from_encoded("call_1", "top_inventory", r#"{"metric":"value","limit":2}"#);

        assert_eq!(invocation.id(), "call_1");
        assert_eq!(invocation.name(), "top_inventory");
        assert_eq!(invocation.arguments()["metric"], "value");
        assert_eq!(invocation.arguments()["limit"], 2);
    }

    #[test]
    fn malformed_arguments_decode_to_empty_map() {
        assert!(decode_arguments("not json").is_empty());
        assert!(decode_arguments("{\"unterminated\":").is_empty());
        // Well-formed JSON that is not an object is also not a mapping.
        assert!(decode_arguments("[1,2,3]").is_empty());
        assert!(decode_arguments("42").is_empty());
    }

    #[test]
    fn empty_object_decodes_to_empty_map() {
        assert!(decode_arguments("{}").is_empty());
    }

    #[test]
    fn arguments_json_round_trips() {
        let invocation =
            ToolInvocation::from_encoded("call_2", "count_records", r#"{"collection":"vendors"}"#);
        let encoded = invocation.arguments_json();
        assert_eq!(decode_arguments(&encoded), *invocation.arguments());
    }
}
