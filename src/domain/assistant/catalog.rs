//! Tool catalog - the closed set of operations the oracle may invoke.
//!
//! Descriptors are pure data: name, description, and a declared parameter
//! table. The catalog is built once at startup and never changes; its
//! declaration order is stable so oracle behavior is reproducible in tests.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Closed set of tool identifiers.
///
/// Dispatch goes through this enum, so an unknown name is a single explicit
/// branch rather than a scattered string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    CountRecords,
    StatusSummary,
    InventoryValueTotal,
    TopInventory,
    SelectionValue,
    SalaryStatistics,
    DepartmentSalarySummary,
    VendorCategoryBreakdown,
    LowStockItems,
    SearchRecords,
}

impl ToolName {
    /// Catalog declaration order. This is the order presented to the oracle.
    pub const ALL: [ToolName; 10] = [
        ToolName::CountRecords,
        ToolName::StatusSummary,
        ToolName::InventoryValueTotal,
        ToolName::TopInventory,
        ToolName::SelectionValue,
        ToolName::SalaryStatistics,
        ToolName::DepartmentSalarySummary,
        ToolName::VendorCategoryBreakdown,
        ToolName::LowStockItems,
        ToolName::SearchRecords,
    ];

    /// Wire name of the tool.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::CountRecords => "count_records",
            ToolName::StatusSummary => "status_summary",
            ToolName::InventoryValueTotal => "inventory_value_total",
            ToolName::TopInventory => "top_inventory",
            ToolName::SelectionValue => "selection_value",
            ToolName::SalaryStatistics => "salary_statistics",
            ToolName::DepartmentSalarySummary => "department_salary_summary",
            ToolName::VendorCategoryBreakdown => "vendor_category_breakdown",
            ToolName::LowStockItems => "low_stock_items",
            ToolName::SearchRecords => "search_records",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

/// Error for tool names outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool {0}")]
pub struct UnknownTool(pub String);

/// Declared type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
}

impl ParamType {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
        }
    }
}

/// One declared parameter: name, type, and whether it is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: ParamType,
    pub required: bool,
}

impl ParamSpec {
    const fn required(name: &'static str, ty: ParamType) -> Self {
        Self {
            name,
            ty,
            required: true,
        }
    }

    const fn optional(name: &'static str, ty: ParamType) -> Self {
        Self {
            name,
            ty,
            required: false,
        }
    }
}

/// Definition of a tool the oracle can select: schema and documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    name: ToolName,
    description: &'static str,
    parameters: &'static [ParamSpec],
}

impl ToolDescriptor {
    /// Returns the tool identifier.
    pub fn tool(&self) -> ToolName {
        self.name
    }

    /// Returns the wire name.
    pub fn name(&self) -> &'static str {
        self.name.as_str()
    }

    /// Returns the description shown to the oracle.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns the declared parameter table.
    pub fn parameters(&self) -> &'static [ParamSpec] {
        self.parameters
    }

    /// Converts to the function-declaration envelope the oracle consumes.
    ///
    /// The declared parameter table is carried verbatim into the JSON-schema
    /// `properties`/`required` fields of the chat-completions tool format.
    pub fn to_wire(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in self.parameters {
            properties.insert(
                param.name.to_string(),
                serde_json::json!({ "type": param.ty.as_str() }),
            );
            if param.required {
                required.push(serde_json::Value::String(param.name.to_string()));
            }
        }

        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                }
            }
        })
    }
}

/// The complete, ordered tool catalog.
#[derive(Debug)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    fn build() -> Self {
        let tools = ToolName::ALL.into_iter().map(descriptor_for).collect();
        Self { tools }
    }

    /// Looks up a descriptor by wire name.
    pub fn describe(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    /// All descriptors, in declaration order.
    pub fn all(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Wire-format declarations for the oracle request, in declaration order.
    pub fn to_wire(&self) -> Vec<serde_json::Value> {
        self.tools.iter().map(ToolDescriptor::to_wire).collect()
    }

    /// Number of tools in the catalog.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// The catalog is never empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// The process-wide catalog. Built once, immutable afterwards.
pub static CATALOG: Lazy<ToolCatalog> = Lazy::new(ToolCatalog::build);

fn descriptor_for(name: ToolName) -> ToolDescriptor {
    match name {
        ToolName::CountRecords => ToolDescriptor {
            name,
            description: "Count the records in one collection. Valid collections: \
                          employees, vendors, customers, inventory.",
            parameters: {
                const P: &[ParamSpec] = &[ParamSpec::required("collection", ParamType::String)];
                P
            },
        },
        ToolName::StatusSummary => ToolDescriptor {
            name,
            description: "Active/inactive record counts for a collection with a \
                          status field (employees or customers).",
            parameters: {
                const P: &[ParamSpec] = &[ParamSpec::required("collection", ParamType::String)];
                P
            },
        },
        ToolName::InventoryValueTotal => ToolDescriptor {
            name,
            description: "Total stock value across all inventory items \
                          (sum of quantity times unit price).",
            parameters: &[],
        },
        ToolName::TopInventory => ToolDescriptor {
            name,
            description: "Top-N inventory items ranked by a metric: quantity, price, \
                          or value (quantity times price). Returns name, quantity, \
                          unit price and value per item. The returned selection can \
                          be totalled by a follow-up selection_value call.",
            parameters: {
                const P: &[ParamSpec] = &[
                    ParamSpec::required("metric", ParamType::String),
                    ParamSpec::required("limit", ParamType::Integer),
                ];
                P
            },
        },
        ToolName::SelectionValue => ToolDescriptor {
            name,
            description: "Total value of the item selection returned by the most \
                          recent top_inventory call. Returns a per-item breakdown \
                          (name, quantity, price, value) and the grand total.",
            parameters: &[],
        },
        ToolName::SalaryStatistics => ToolDescriptor {
            name,
            description: "Salary distribution across all employees: minimum, maximum, \
                          median and quartiles.",
            parameters: &[],
        },
        ToolName::DepartmentSalarySummary => ToolDescriptor {
            name,
            description: "Per-department salary summary: headcount, highest salary \
                          and average salary. Departments without employees are \
                          omitted.",
            parameters: &[],
        },
        ToolName::VendorCategoryBreakdown => ToolDescriptor {
            name,
            description: "Vendor counts grouped by category.",
            parameters: &[],
        },
        ToolName::LowStockItems => ToolDescriptor {
            name,
            description: "Inventory items with quantity below a threshold \
                          (default 20). Returns name, quantity and unit per item.",
            parameters: {
                const P: &[ParamSpec] = &[ParamSpec::optional("threshold", ParamType::Integer)];
                P
            },
        },
        ToolName::SearchRecords => ToolDescriptor {
            name,
            description: "Case-insensitive substring search over record names in one \
                          collection. Employees return name, department and status; \
                          vendors return name, contact person and category; customers \
                          return name, phone and status; inventory returns name, \
                          quantity, unit price and unit.",
            parameters: {
                const P: &[ParamSpec] = &[
                    ParamSpec::required("collection", ParamType::String),
                    ParamSpec::required("query", ParamType::String),
                ];
                P
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_all_tools_in_declaration_order() {
        assert_eq!(CATALOG.len(), ToolName::ALL.len());
        let names: Vec<&str> = CATALOG.all().iter().map(|t| t.name()).collect();
        assert_eq!(names[0], "count_records");
        assert_eq!(names[3], "top_inventory");
        assert_eq!(names[4], "selection_value");
        assert_eq!(names[9], "search_records");
    }

    #[test]
    fn describe_finds_known_tools() {
        let descriptor = CATALOG.describe("top_inventory").unwrap();
        assert_eq!(descriptor.tool(), ToolName::TopInventory);
        assert_eq!(descriptor.parameters().len(), 2);
        assert!(CATALOG.describe("drop_tables").is_none());
    }

    #[test]
    fn tool_name_round_trips_from_str() {
        for name in ToolName::ALL {
            assert_eq!(name.as_str().parse::<ToolName>(), Ok(name));
        }
        assert!("unknown_tool".parse::<ToolName>().is_err());
    }

    #[test]
    fn wire_format_declares_required_parameters() {
        let wire = CATALOG.describe("top_inventory").unwrap().to_wire();

        assert_eq!(wire["type"], "function");
        assert_eq!(wire["function"]["name"], "top_inventory");
        assert_eq!(
            wire["function"]["parameters"]["properties"]["metric"]["type"],
            "string"
        );
        assert_eq!(
            wire["function"]["parameters"]["properties"]["limit"]["type"],
            "integer"
        );
        let required = wire["function"]["parameters"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 2);
    }

    #[test]
    fn wire_format_keeps_optional_parameters_out_of_required() {
        let wire = CATALOG.describe("low_stock_items").unwrap().to_wire();
        let required = wire["function"]["parameters"]["required"]
            .as_array()
            .unwrap();
        assert!(required.is_empty());
        assert!(wire["function"]["parameters"]["properties"]["threshold"].is_object());
    }

    #[test]
    fn catalog_wire_order_is_stable() {
        let first: Vec<String> = CATALOG
            .to_wire()
            .iter()
            .map(|t| t["function"]["name"].as_str().unwrap().to_string())
            .collect();
        let second: Vec<String> = CATALOG
            .to_wire()
            .iter()
            .map(|t| t["function"]["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(first, second);
    }
}
