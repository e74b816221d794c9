//! In-memory record store.
//!
//! Stands in for the external data owner: record persistence lives elsewhere
//! in the system, so this adapter keeps the four collections as plain vectors
//! and implements the port's aggregation primitives over them. Used by the
//! binary as demo wiring and by the test suites as a seedable fixture.

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::records::{
    CategoryCount, Collection, Customer, Employee, InventoryItem, RankMetric, RecordStatus,
    StatusSplit, Vendor,
};
use crate::ports::{RecordStore, StoreError};

/// Seedable in-memory implementation of [`RecordStore`].
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    employees: Vec<Employee>,
    vendors: Vec<Vendor>,
    customers: Vec<Customer>,
    inventory: Vec<InventoryItem>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store over the given collections, kept in insertion order.
    pub fn with_records(
        employees: Vec<Employee>,
        vendors: Vec<Vendor>,
        customers: Vec<Customer>,
        inventory: Vec<InventoryItem>,
    ) -> Self {
        Self {
            employees,
            vendors,
            customers,
            inventory,
        }
    }

    /// Demo dataset for running the binary without the real record system.
    pub fn sample() -> Self {
        fn dec(s: &str) -> BigDecimal {
            s.parse().expect("literal decimal")
        }

        let employees = vec![
            employee("Asha Patel", "Engineering", RecordStatus::Active, 98_000),
            employee("Marcus Webb", "Engineering", RecordStatus::Active, 87_500),
            employee("Lena Fischer", "Sales", RecordStatus::Active, 64_000),
            employee("Tom Okafor", "Sales", RecordStatus::Inactive, 58_000),
            employee("Ines Moreau", "Finance", RecordStatus::Active, 72_000),
        ];
        let vendors = vec![
            vendor("Northline Metals", "G. Serrano", "Raw Materials"),
            vendor("PackRight Co", "D. Huang", "Packaging"),
            vendor("Brightway Logistics", "S. Ameen", "Freight"),
            vendor("Ferro Supplies", "M. Keller", "Raw Materials"),
        ];
        let customers = vec![
            customer("Orbit Hardware", "555-0101", RecordStatus::Active),
            customer("Galloway & Sons", "555-0144", RecordStatus::Active),
            customer("Pinecrest Retail", "555-0169", RecordStatus::Inactive),
        ];
        let inventory = vec![
            item("Steel Rod 12mm", 140, dec("4.75"), "pcs"),
            item("Copper Wire Spool", 35, dec("28.00"), "roll"),
            item("Hex Bolt M8", 900, dec("0.12"), "pcs"),
            item("Bearing 6204", 12, dec("3.40"), "pcs"),
            item("Hydraulic Oil 46", 18, dec("52.50"), "drum"),
        ];

        Self::with_records(employees, vendors, customers, inventory)
    }
}

fn employee(name: &str, department: &str, status: RecordStatus, salary: i64) -> Employee {
    Employee {
        name: name.to_string(),
        department: department.to_string(),
        status,
        salary,
    }
}

fn vendor(name: &str, contact_person: &str, category: &str) -> Vendor {
    Vendor {
        name: name.to_string(),
        contact_person: contact_person.to_string(),
        category: category.to_string(),
    }
}

fn customer(name: &str, phone: &str, status: RecordStatus) -> Customer {
    Customer {
        name: name.to_string(),
        phone: phone.to_string(),
        status,
    }
}

fn item(name: &str, quantity: i64, price: BigDecimal, unit: &str) -> InventoryItem {
    InventoryItem {
        name: name.to_string(),
        quantity,
        price,
        unit: unit.to_string(),
    }
}

fn matches(name: &str, fragment: &str) -> bool {
    name.to_lowercase().contains(&fragment.to_lowercase())
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        let count = match collection {
            Collection::Employees => self.employees.len(),
            Collection::Vendors => self.vendors.len(),
            Collection::Customers => self.customers.len(),
            Collection::Inventory => self.inventory.len(),
        };
        Ok(count as u64)
    }

    async fn status_split(&self, collection: Collection) -> Result<StatusSplit, StoreError> {
        let statuses: Vec<RecordStatus> = match collection {
            Collection::Employees => self.employees.iter().map(|e| e.status).collect(),
            Collection::Customers => self.customers.iter().map(|c| c.status).collect(),
            other => {
                return Err(StoreError::Query(format!(
                    "collection {other} has no status field"
                )))
            }
        };
        let active = statuses.iter().filter(|s| s.is_active()).count() as u64;
        Ok(StatusSplit {
            active,
            inactive: statuses.len() as u64 - active,
        })
    }

    async fn inventory_value_total(&self) -> Result<BigDecimal, StoreError> {
        Ok(self
            .inventory
            .iter()
            .fold(BigDecimal::from(0), |acc, item| acc + item.value()))
    }

    async fn top_inventory(
        &self,
        metric: RankMetric,
        limit: usize,
    ) -> Result<Vec<InventoryItem>, StoreError> {
        let mut items: Vec<InventoryItem> = self.inventory.clone();
        // Stable descending sort: equal keys keep natural row order.
        match metric {
            RankMetric::Quantity => items.sort_by(|a, b| b.quantity.cmp(&a.quantity)),
            RankMetric::Price => items.sort_by(|a, b| b.price.cmp(&a.price)),
            RankMetric::Value => items.sort_by(|a, b| b.value().cmp(&a.value())),
        }
        items.truncate(limit);
        Ok(items)
    }

    async fn inventory_by_name(&self, name: &str) -> Result<Option<InventoryItem>, StoreError> {
        Ok(self.inventory.iter().find(|i| i.name == name).cloned())
    }

    async fn low_stock(&self, threshold: i64) -> Result<Vec<InventoryItem>, StoreError> {
        Ok(self
            .inventory
            .iter()
            .filter(|i| i.quantity < threshold)
            .cloned()
            .collect())
    }

    async fn salaries(&self) -> Result<Vec<i64>, StoreError> {
        Ok(self.employees.iter().map(|e| e.salary).collect())
    }

    async fn departments(&self) -> Result<Vec<String>, StoreError> {
        let mut seen = Vec::new();
        for employee in &self.employees {
            if !seen.contains(&employee.department) {
                seen.push(employee.department.clone());
            }
        }
        Ok(seen)
    }

    async fn department_salaries(&self, department: &str) -> Result<Vec<i64>, StoreError> {
        Ok(self
            .employees
            .iter()
            .filter(|e| e.department == department)
            .map(|e| e.salary)
            .collect())
    }

    async fn vendor_categories(&self) -> Result<Vec<CategoryCount>, StoreError> {
        let mut counts: Vec<CategoryCount> = Vec::new();
        for vendor in &self.vendors {
            match counts.iter_mut().find(|c| c.category == vendor.category) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    category: vendor.category.clone(),
                    count: 1,
                }),
            }
        }
        Ok(counts)
    }

    async fn search_employees(&self, fragment: &str) -> Result<Vec<Employee>, StoreError> {
        Ok(self
            .employees
            .iter()
            .filter(|e| matches(&e.name, fragment))
            .cloned()
            .collect())
    }

    async fn search_vendors(&self, fragment: &str) -> Result<Vec<Vendor>, StoreError> {
        Ok(self
            .vendors
            .iter()
            .filter(|v| matches(&v.name, fragment))
            .cloned()
            .collect())
    }

    async fn search_customers(&self, fragment: &str) -> Result<Vec<Customer>, StoreError> {
        Ok(self
            .customers
            .iter()
            .filter(|c| matches(&c.name, fragment))
            .cloned()
            .collect())
    }

    async fn search_inventory(&self, fragment: &str) -> Result<Vec<InventoryItem>, StoreError> {
        Ok(self
            .inventory
            .iter()
            .filter(|i| matches(&i.name, fragment))
            .cloned()
            .collect())
    }
}
