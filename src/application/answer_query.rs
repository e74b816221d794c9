//! AnswerQueryHandler - resolve one inbound free-text query.
//!
//! Control flow: the follow-up detector checks selection memory first; a hit
//! runs the memory-consuming aggregation directly and formats a fixed reply,
//! skipping the oracle entirely. Everything else goes through the two-phase
//! oracle protocol.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::assistant::{
    AssistantError, FollowUpDetector, QueryOrchestrator, SelectionKey, ToolDispatcher, ToolName,
};

/// Handles inbound assistant queries.
pub struct AnswerQueryHandler {
    detector: FollowUpDetector,
    dispatcher: Arc<ToolDispatcher>,
    orchestrator: Arc<QueryOrchestrator>,
}

impl AnswerQueryHandler {
    pub fn new(
        detector: FollowUpDetector,
        dispatcher: Arc<ToolDispatcher>,
        orchestrator: Arc<QueryOrchestrator>,
    ) -> Self {
        Self {
            detector,
            dispatcher,
            orchestrator,
        }
    }

    /// Resolves one query to a reply.
    pub async fn handle(&self, key: &SelectionKey, query: &str) -> Result<String, AssistantError> {
        if self.detector.is_followup(key, query) {
            debug!(session = key.as_str(), "follow-up fast path");
            let result = self
                .dispatcher
                .execute(key, ToolName::SelectionValue.as_str(), &Map::new())
                .await;
            return Ok(format_selection_reply(&result));
        }

        self.orchestrator.answer(key, query).await
    }
}

/// Fixed formatter for the follow-up fast path.
fn format_selection_reply(result: &Value) -> String {
    if let Some(reason) = result.get("error").and_then(Value::as_str) {
        return format!("I can't total that selection: {reason}.");
    }

    let breakdown = result["breakdown"].as_array().cloned().unwrap_or_default();
    let total = result["total"].as_f64().unwrap_or(0.0);

    if breakdown.is_empty() {
        return "None of the previously selected items are still on record; \
                their total value is 0.00."
            .to_string();
    }

    let mut lines = vec![format!("Total value of your last selection: {total:.2}")];
    for row in &breakdown {
        lines.push(format!(
            "- {}: {} x {:.2} = {:.2}",
            row["name"].as_str().unwrap_or("?"),
            row["quantity"].as_i64().unwrap_or(0),
            row["price"].as_f64().unwrap_or(0.0),
            row["value"].as_f64().unwrap_or(0.0),
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockOracle;
    use crate::adapters::store::InMemoryRecordStore;
    use crate::domain::assistant::SelectionStore;
    use crate::domain::records::InventoryItem;
    use bigdecimal::BigDecimal;
    use serde_json::json;

    fn items() -> Vec<InventoryItem> {
        vec![
            InventoryItem {
                name: "A".into(),
                quantity: 5,
                price: BigDecimal::from(10),
                unit: "pcs".into(),
            },
            InventoryItem {
                name: "B".into(),
                quantity: 2,
                price: BigDecimal::from(100),
                unit: "pcs".into(),
            },
        ]
    }

    fn handler_with(
        oracle: MockOracle,
        items: Vec<InventoryItem>,
    ) -> (AnswerQueryHandler, Arc<SelectionStore>) {
        let store = Arc::new(InMemoryRecordStore::with_records(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            items,
        ));
        let selections = Arc::new(SelectionStore::new());
        let dispatcher = Arc::new(ToolDispatcher::new(store, Arc::clone(&selections)));
        let orchestrator = Arc::new(QueryOrchestrator::new(
            Arc::new(oracle),
            Arc::clone(&dispatcher),
        ));
        let detector = FollowUpDetector::new(Arc::clone(&selections));
        (
            AnswerQueryHandler::new(detector, dispatcher, orchestrator),
            selections,
        )
    }

    #[tokio::test]
    async fn followup_fast_path_skips_the_oracle() {
        let oracle = MockOracle::new();
        let (handler, selections) = handler_with(oracle.clone(), items());
        let key = SelectionKey::anonymous();

        selections.remember(&key, vec!["B".to_string(), "A".to_string()]);

        let reply = handler.handle(&key, "what's their total value?").await.unwrap();
        assert!(reply.contains("250.00"));
        assert!(reply.contains("- B: 2 x 100.00 = 200.00"));
        assert!(reply.contains("- A: 5 x 10.00 = 50.00"));

        // The oracle was never consulted.
        assert_eq!(oracle.call_count(), 0);
        // And the fast path consumed the selection.
        assert!(!selections.has_pending(&key));
    }

    #[tokio::test]
    async fn non_followup_goes_through_the_oracle() {
        let oracle = MockOracle::new().with_text("There are 2 items.");
        let (handler, selections) = handler_with(oracle.clone(), items());
        let key = SelectionKey::anonymous();

        selections.remember(&key, vec!["B".to_string()]);

        let reply = handler.handle(&key, "how many items do we stock?").await.unwrap();
        assert_eq!(reply, "There are 2 items.");
        assert_eq!(oracle.call_count(), 1);
        // A non-follow-up query leaves the pending selection alone.
        assert!(selections.has_pending(&key));
    }

    #[tokio::test]
    async fn trigger_phrase_without_pending_selection_uses_oracle() {
        let oracle = MockOracle::new().with_text("Which items do you mean?");
        let (handler, _) = handler_with(oracle.clone(), items());
        let key = SelectionKey::anonymous();

        let reply = handler.handle(&key, "what is their total value?").await.unwrap();
        assert_eq!(reply, "Which items do you mean?");
        assert_eq!(oracle.call_count(), 1);
    }

    #[tokio::test]
    async fn fast_path_formats_vanished_selection_as_zero() {
        let oracle = MockOracle::new();
        let (handler, selections) = handler_with(oracle, items());
        let key = SelectionKey::anonymous();

        selections.remember(&key, vec!["Gone".to_string()]);

        let reply = handler.handle(&key, "their total value?").await.unwrap();
        assert!(reply.contains("0.00"));
        assert!(reply.contains("still on record"));
    }

    #[test]
    fn formatter_surfaces_error_reason() {
        let reply = format_selection_reply(&json!({"error": "no pending selection"}));
        assert!(reply.contains("no pending selection"));
    }
}
