//! Record collections and entity projections.
//!
//! The authoritative data lives in an external record store; these types are
//! the narrow read-only views the query tools operate on. Each tool maps a
//! declared subset of fields, never the full record.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// The four record collections the agent can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Employees,
    Vendors,
    Customers,
    Inventory,
}

impl Collection {
    /// All collections, in catalog presentation order.
    pub const ALL: [Collection; 4] = [
        Collection::Employees,
        Collection::Vendors,
        Collection::Customers,
        Collection::Inventory,
    ];

    /// Collections whose records carry an active/inactive status field.
    pub fn has_status(self) -> bool {
        matches!(self, Collection::Employees | Collection::Customers)
    }

    /// Canonical lowercase name, as used in tool arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Employees => "employees",
            Collection::Vendors => "vendors",
            Collection::Customers => "customers",
            Collection::Inventory => "inventory",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "employees" | "staff" => Ok(Collection::Employees),
            "vendors" | "suppliers" => Ok(Collection::Vendors),
            "customers" | "clients" => Ok(Collection::Customers),
            "inventory" | "stock" => Ok(Collection::Inventory),
            _ => Err(UnknownCollection(s.to_string())),
        }
    }
}

/// Error for collection names outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown collection: {0}")]
pub struct UnknownCollection(pub String);

/// Staff projection: name, department, status, salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub department: String,
    pub status: RecordStatus,
    pub salary: i64,
}

/// Supplier projection: name, contact person, category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub name: String,
    pub contact_person: String,
    pub category: String,
}

/// Client projection: name, phone, status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub status: RecordStatus,
}

/// Stock item projection: name, quantity, unit price, unit.
///
/// Prices are exact decimals; they only become floats at the result
/// serializer boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: i64,
    pub price: BigDecimal,
    pub unit: String,
}

impl InventoryItem {
    /// Stock value of this item: quantity x unit price.
    pub fn value(&self) -> BigDecimal {
        BigDecimal::from(self.quantity) * &self.price
    }
}

/// Active/inactive marker shared by employee and customer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn is_active(self) -> bool {
        self == RecordStatus::Active
    }
}

/// Active/inactive counts for one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSplit {
    pub active: u64,
    pub inactive: u64,
}

/// Metric an inventory ranking is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMetric {
    Quantity,
    Price,
    /// quantity x unit price
    Value,
}

impl RankMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            RankMetric::Quantity => "quantity",
            RankMetric::Price => "price",
            RankMetric::Value => "value",
        }
    }
}

impl FromStr for RankMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quantity" => Ok(RankMetric::Quantity),
            "price" => Ok(RankMetric::Price),
            "value" => Ok(RankMetric::Value),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

/// Error for ranking metrics outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ranking metric: {0}")]
pub struct UnknownMetric(pub String);

/// Vendor count for one category (group-by result row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_parses_canonical_and_alias_names() {
        assert_eq!("employees".parse::<Collection>(), Ok(Collection::Employees));
        assert_eq!("Staff".parse::<Collection>(), Ok(Collection::Employees));
        assert_eq!("suppliers".parse::<Collection>(), Ok(Collection::Vendors));
        assert_eq!("INVENTORY".parse::<Collection>(), Ok(Collection::Inventory));
        assert!("orders".parse::<Collection>().is_err());
    }

    #[test]
    fn collection_roundtrips_display() {
        for c in Collection::ALL {
            assert_eq!(c.as_str().parse::<Collection>(), Ok(c));
        }
    }

    #[test]
    fn status_field_presence() {
        assert!(Collection::Employees.has_status());
        assert!(Collection::Customers.has_status());
        assert!(!Collection::Vendors.has_status());
        assert!(!Collection::Inventory.has_status());
    }

    #[test]
    fn rank_metric_parses_case_insensitively() {
        assert_eq!("value".parse::<RankMetric>(), Ok(RankMetric::Value));
        assert_eq!("Quantity".parse::<RankMetric>(), Ok(RankMetric::Quantity));
        assert!("volume".parse::<RankMetric>().is_err());
    }

    #[test]
    fn item_value_is_quantity_times_price() {
        let item = InventoryItem {
            name: "Steel Rod".to_string(),
            quantity: 5,
            price: BigDecimal::from(10),
            unit: "pcs".to_string(),
        };
        assert_eq!(item.value(), BigDecimal::from(50));
    }
}
