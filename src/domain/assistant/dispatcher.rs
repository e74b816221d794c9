//! Tool dispatcher - executes catalog operations against the record store.
//!
//! The dispatch contract: `execute` never fails. Every failure mode -
//! unknown tool, bad arguments, missing state, even a record store outage -
//! becomes an `{"error": ...}` JSON value, because tool results re-enter the
//! oracle conversation as plain content and the oracle decides how to present
//! them. Tool names resolve through the closed [`ToolName`] enum, so the
//! unknown-name case is one explicit branch.

use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::domain::records::{Collection, RankMetric};
use crate::ports::{RecordStore, StoreError};

use super::catalog::ToolName;
use super::normalize;
use super::selection::{SelectionKey, SelectionStore};
use super::stats;

/// Default quantity threshold for the low-stock tool.
const LOW_STOCK_DEFAULT_THRESHOLD: i64 = 20;

/// Builds the `{"error": reason}` result value.
pub fn error_value(reason: impl Into<String>) -> Value {
    json!({ "error": reason.into() })
}

/// A tool-level failure, carried as a value until it becomes result content.
struct ToolFailure(String);

impl ToolFailure {
    fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl From<StoreError> for ToolFailure {
    fn from(err: StoreError) -> Self {
        warn!(error = %err, "record store query failed during tool dispatch");
        Self(format!("record store error: {err}"))
    }
}

type ToolOutput = Result<Value, ToolFailure>;

/// Executes catalog tools against the record store.
pub struct ToolDispatcher {
    store: Arc<dyn RecordStore>,
    selections: Arc<SelectionStore>,
}

impl ToolDispatcher {
    pub fn new(store: Arc<dyn RecordStore>, selections: Arc<SelectionStore>) -> Self {
        Self { store, selections }
    }

    /// Runs one tool call and returns its result value.
    ///
    /// `key` selects which caller's pending selection the ranking and
    /// follow-up tools operate on.
    pub async fn execute(
        &self,
        key: &SelectionKey,
        name: &str,
        arguments: &Map<String, Value>,
    ) -> Value {
        let tool = match ToolName::from_str(name) {
            Ok(tool) => tool,
            Err(_) => return error_value(format!("unknown tool {name}")),
        };

        let output = match tool {
            ToolName::CountRecords => self.count_records(arguments).await,
            ToolName::StatusSummary => self.status_summary(arguments).await,
            ToolName::InventoryValueTotal => self.inventory_value_total().await,
            ToolName::TopInventory => self.top_inventory(key, arguments).await,
            ToolName::SelectionValue => self.selection_value(key).await,
            ToolName::SalaryStatistics => self.salary_statistics().await,
            ToolName::DepartmentSalarySummary => self.department_salary_summary().await,
            ToolName::VendorCategoryBreakdown => self.vendor_category_breakdown().await,
            ToolName::LowStockItems => self.low_stock_items(arguments).await,
            ToolName::SearchRecords => self.search_records(arguments).await,
        };

        output.unwrap_or_else(|failure| error_value(failure.0))
    }

    async fn count_records(&self, arguments: &Map<String, Value>) -> ToolOutput {
        let collection = require_collection(arguments)?;
        let count = self.store.count(collection).await?;
        Ok(json!({ "collection": collection.as_str(), "count": count }))
    }

    async fn status_summary(&self, arguments: &Map<String, Value>) -> ToolOutput {
        let collection = require_collection(arguments)?;
        if !collection.has_status() {
            return Err(ToolFailure::new(format!(
                "collection {collection} has no status field"
            )));
        }
        let split = self.store.status_split(collection).await?;
        Ok(json!({
            "collection": collection.as_str(),
            "active": split.active,
            "inactive": split.inactive,
        }))
    }

    async fn inventory_value_total(&self) -> ToolOutput {
        let total = self.store.inventory_value_total().await?;
        Ok(json!({ "total_value": normalize::number(&total) }))
    }

    async fn top_inventory(
        &self,
        key: &SelectionKey,
        arguments: &Map<String, Value>,
    ) -> ToolOutput {
        let metric: RankMetric = require_str(arguments, "metric")?
            .parse()
            .map_err(|_| ToolFailure::new("metric must be one of quantity, price, value"))?;
        let limit = require_integer(arguments, "limit")?;
        if limit < 0 {
            return Err(ToolFailure::new("limit must not be negative"));
        }

        let items = self.store.top_inventory(metric, limit as usize).await?;

        let rows: Vec<Value> = items
            .iter()
            .map(|item| {
                json!({
                    "name": item.name,
                    "quantity": item.quantity,
                    "price": normalize::number(&item.price),
                    "value": normalize::number(&item.value()),
                })
            })
            .collect();

        // Remembering the returned names is the contract that makes a
        // follow-up "their total value" answerable.
        let names: Vec<String> = items.into_iter().map(|item| item.name).collect();
        self.selections.remember(key, names);

        Ok(json!({ "metric": metric.as_str(), "items": rows }))
    }

    async fn selection_value(&self, key: &SelectionKey) -> ToolOutput {
        // `take` clears the slot regardless of how many names still resolve.
        let Some(names) = self.selections.take(key) else {
            return Err(ToolFailure::new("no pending selection"));
        };

        let mut breakdown = Vec::new();
        let mut total = BigDecimal::from(0);
        for name in &names {
            // Names that vanished from the store since the ranking are
            // skipped individually.
            let Some(item) = self.store.inventory_by_name(name).await? else {
                continue;
            };
            let value = item.value();
            breakdown.push(json!({
                "name": item.name,
                "quantity": item.quantity,
                "price": normalize::number(&item.price),
                "value": normalize::number(&value),
            }));
            total += value;
        }

        Ok(json!({
            "breakdown": breakdown,
            "total": normalize::number(&total),
        }))
    }

    async fn salary_statistics(&self) -> ToolOutput {
        let salaries = self.store.salaries().await?;
        let Some(d) = stats::distribution(&salaries) else {
            return Err(ToolFailure::new("no employee salaries recorded"));
        };
        Ok(json!({
            "count": salaries.len(),
            "min": d.min,
            "q1": d.q1,
            "median": d.median,
            "q3": d.q3,
            "max": d.max,
        }))
    }

    async fn department_salary_summary(&self) -> ToolOutput {
        let mut rows = Vec::new();
        for department in self.store.departments().await? {
            let salaries = self.store.department_salaries(&department).await?;
            // A department with no matching rows is omitted, not an error.
            if salaries.is_empty() {
                continue;
            }
            let headcount = salaries.len();
            let max = salaries.iter().copied().max().unwrap_or(0);
            let average = salaries.iter().sum::<i64>() as f64 / headcount as f64;
            rows.push(json!({
                "department": department,
                "headcount": headcount,
                "max_salary": max,
                "average_salary": average,
            }));
        }
        Ok(json!({ "departments": rows }))
    }

    async fn vendor_category_breakdown(&self) -> ToolOutput {
        let categories = self.store.vendor_categories().await?;
        let rows: Vec<Value> = categories
            .iter()
            .map(|c| json!({ "category": c.category, "count": c.count }))
            .collect();
        Ok(json!({ "categories": rows }))
    }

    async fn low_stock_items(&self, arguments: &Map<String, Value>) -> ToolOutput {
        let threshold = match arguments.get("threshold") {
            None | Some(Value::Null) => LOW_STOCK_DEFAULT_THRESHOLD,
            Some(_) => require_integer(arguments, "threshold")?,
        };
        let items = self.store.low_stock(threshold).await?;
        let rows: Vec<Value> = items
            .iter()
            .map(|item| json!({ "name": item.name, "quantity": item.quantity, "unit": item.unit }))
            .collect();
        Ok(json!({ "threshold": threshold, "count": rows.len(), "items": rows }))
    }

    async fn search_records(&self, arguments: &Map<String, Value>) -> ToolOutput {
        let collection = require_collection(arguments)?;
        let fragment = require_str(arguments, "query")?;

        let matches: Vec<Value> = match collection {
            Collection::Employees => self
                .store
                .search_employees(fragment)
                .await?
                .into_iter()
                .map(|e| json!({ "name": e.name, "department": e.department, "status": e.status }))
                .collect(),
            Collection::Vendors => self
                .store
                .search_vendors(fragment)
                .await?
                .into_iter()
                .map(|v| {
                    json!({ "name": v.name, "contact_person": v.contact_person, "category": v.category })
                })
                .collect(),
            Collection::Customers => self
                .store
                .search_customers(fragment)
                .await?
                .into_iter()
                .map(|c| json!({ "name": c.name, "phone": c.phone, "status": c.status }))
                .collect(),
            Collection::Inventory => self
                .store
                .search_inventory(fragment)
                .await?
                .into_iter()
                .map(|i| {
                    json!({
                        "name": i.name,
                        "quantity": i.quantity,
                        "price": normalize::number(&i.price),
                        "unit": i.unit,
                    })
                })
                .collect(),
        };

        Ok(json!({ "collection": collection.as_str(), "matches": matches }))
    }
}

fn require_str<'a>(arguments: &'a Map<String, Value>, name: &str) -> Result<&'a str, ToolFailure> {
    arguments
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolFailure::new(format!("missing or invalid argument: {name}")))
}

/// Accepts JSON integers and integer-shaped strings; anything else is a
/// validation failure reported as content.
fn require_integer(arguments: &Map<String, Value>, name: &str) -> Result<i64, ToolFailure> {
    let value = arguments
        .get(name)
        .ok_or_else(|| ToolFailure::new(format!("missing or invalid argument: {name}")))?;

    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| ToolFailure::new(format!("argument {name} must be an integer")))
}

fn require_collection(arguments: &Map<String, Value>) -> Result<Collection, ToolFailure> {
    require_str(arguments, "collection")?
        .parse()
        .map_err(|err: crate::domain::records::UnknownCollection| ToolFailure::new(err.to_string()))
}
