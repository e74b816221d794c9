//! Record store port - the external data owner's read-only surface.
//!
//! The authoritative store (and its persistence, migrations and write paths)
//! belongs to another part of the system; this subsystem only consumes narrow
//! read queries. The store owns the aggregation primitives: count, sum,
//! group-by, order-by-descending with limit, and substring match.

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::records::{
    CategoryCount, Collection, Customer, Employee, InventoryItem, RankMetric, StatusSplit, Vendor,
};

/// Record store transport/query errors.
///
/// These never reach the end user directly; the dispatcher converts them into
/// error values presented to the oracle as content.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store unreachable.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// A query failed inside the store.
    #[error("record store query failed: {0}")]
    Query(String),
}

/// Read-only queries over the four record collections.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Number of records in a collection. Empty collection counts as zero.
    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;

    /// Active/inactive split for a status-carrying collection.
    async fn status_split(&self, collection: Collection) -> Result<StatusSplit, StoreError>;

    /// Total stock value: sum of quantity x unit price over all items.
    async fn inventory_value_total(&self) -> Result<BigDecimal, StoreError>;

    /// Top `limit` inventory items ordered by `metric`, descending.
    ///
    /// Ties preserve the store's natural row order (stable sort contract).
    /// Returns all items when `limit` exceeds the population.
    async fn top_inventory(
        &self,
        metric: RankMetric,
        limit: usize,
    ) -> Result<Vec<InventoryItem>, StoreError>;

    /// Exact-name lookup of a single inventory item.
    async fn inventory_by_name(&self, name: &str) -> Result<Option<InventoryItem>, StoreError>;

    /// Items with quantity strictly below the threshold, in natural order.
    async fn low_stock(&self, threshold: i64) -> Result<Vec<InventoryItem>, StoreError>;

    /// All employee salaries, unordered.
    async fn salaries(&self) -> Result<Vec<i64>, StoreError>;

    /// Distinct department names, in first-seen order.
    async fn departments(&self) -> Result<Vec<String>, StoreError>;

    /// Salaries of one department's employees.
    async fn department_salaries(&self, department: &str) -> Result<Vec<i64>, StoreError>;

    /// Vendor counts grouped by category, in first-seen order.
    async fn vendor_categories(&self) -> Result<Vec<CategoryCount>, StoreError>;

    /// Case-insensitive substring match over employee names.
    async fn search_employees(&self, fragment: &str) -> Result<Vec<Employee>, StoreError>;

    /// Case-insensitive substring match over vendor names.
    async fn search_vendors(&self, fragment: &str) -> Result<Vec<Vendor>, StoreError>;

    /// Case-insensitive substring match over customer names.
    async fn search_customers(&self, fragment: &str) -> Result<Vec<Customer>, StoreError>;

    /// Case-insensitive substring match over inventory item names.
    async fn search_inventory(&self, fragment: &str) -> Result<Vec<InventoryItem>, StoreError>;
}
