//! Resolved catalog: validated config flattened for runtime lookups.

use crate::catalog::types::{FieldRule, Operation};
use std::collections::{BTreeMap, HashMap};

/// Runtime view of one resource with its collection path already joined.
#[derive(Clone, Debug)]
pub struct ResolvedResource {
    pub path_segment: String,
    pub label: String,
    pub id_prefix: String,
    /// Full collection path, e.g. `root/southAfrica/lookups`.
    pub collection: String,
    pub operations: Vec<Operation>,
    pub has_active: bool,
    pub fields: BTreeMap<String, FieldRule>,
    pub search_fields: Vec<String>,
    pub filter_fields: Vec<String>,
    pub export_fields: Vec<String>,
    pub stats_fields: Vec<String>,
}

impl ResolvedResource {
    pub fn allows(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    /// Field set for the free-text search endpoint: the configured search
    /// fields plus the audit actor paths.
    pub fn wide_search_fields(&self) -> Vec<String> {
        let mut fields = self.search_fields.clone();
        for extra in ["created.by", "updated.by"] {
            if !fields.iter().any(|f| f == extra) {
                fields.push(extra.to_string());
            }
        }
        fields
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedCatalog {
    pub resources: Vec<ResolvedResource>,
    pub by_path: HashMap<String, ResolvedResource>,
}

impl ResolvedCatalog {
    pub fn resource_by_path(&self, segment: &str) -> Option<&ResolvedResource> {
        self.by_path.get(segment)
    }
}
