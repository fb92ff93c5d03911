//! Raw catalog types matching the JSON config shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Operations a resource can expose. The builtin catalog enables all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    List,
    Search,
    Bulk,
    Export,
    Stats,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::List => "list",
            Operation::Search => "search",
            Operation::Bulk => "bulk",
            Operation::Export => "export",
            Operation::Stats => "stats",
        }
    }
}

pub fn all_operations() -> Vec<Operation> {
    vec![
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
        Operation::List,
        Operation::Search,
        Operation::Bulk,
        Operation::Export,
        Operation::Stats,
    ]
}

/// Per-field constraint set shared by create and update validation.
///
/// `required` defaults to true for create validation and is ignored for
/// update validation; the remaining constraints apply whenever the field is
/// present with a matching JSON type.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub min_length: Option<u32>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub min_items: Option<u32>,
    #[serde(default)]
    pub max_items: Option<u32>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub allowed: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
}

/// One manageable resource: its path segment, id prefix, field rules, and the
/// field lists driving search, filters, export, and stats.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub path_segment: String,
    /// Display label used in response messages; defaults to the path segment.
    #[serde(default)]
    pub label: Option<String>,
    pub id_prefix: String,
    #[serde(default = "all_operations")]
    pub operations: Vec<Operation>,
    /// Whether records carry the `active` boolean, defaulted true at create.
    #[serde(default)]
    pub has_active: bool,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldRule>,
    #[serde(default)]
    pub search_fields: Vec<String>,
    #[serde(default)]
    pub filter_fields: Vec<String>,
    #[serde(default)]
    pub export_fields: Vec<String>,
    #[serde(default)]
    pub stats_fields: Vec<String>,
}

/// Whole catalog as loaded from JSON or built in code.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Collection path prefix every resource lives under, e.g. `root/southAfrica`.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    pub resources: Vec<ResourceConfig>,
}

fn default_root_path() -> String {
    "root/southAfrica".to_string()
}
