//! Builtin catalog, JSON loading, and resolution into the runtime model.

use crate::catalog::resolved::{ResolvedCatalog, ResolvedResource};
use crate::catalog::types::{all_operations, CatalogConfig, FieldRule, ResourceConfig};
use crate::catalog::validator::validate;
use crate::error::ConfigError;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Build the runtime catalog from config (validates first).
pub fn resolve(config: &CatalogConfig) -> Result<ResolvedCatalog, ConfigError> {
    validate(config)?;
    let root = config.root_path.trim_matches('/');

    let mut resources = Vec::with_capacity(config.resources.len());
    let mut by_path = HashMap::new();
    for rc in &config.resources {
        let resource = ResolvedResource {
            path_segment: rc.path_segment.clone(),
            label: rc.label.clone().unwrap_or_else(|| rc.path_segment.clone()),
            id_prefix: rc.id_prefix.clone(),
            collection: format!("{}/{}", root, rc.path_segment),
            operations: rc.operations.clone(),
            has_active: rc.has_active,
            fields: rc.fields.clone(),
            search_fields: rc.search_fields.clone(),
            filter_fields: rc.filter_fields.clone(),
            export_fields: rc.export_fields.clone(),
            stats_fields: rc.stats_fields.clone(),
        };
        by_path.insert(resource.path_segment.clone(), resource.clone());
        resources.push(resource);
    }

    Ok(ResolvedCatalog { resources, by_path })
}

/// Parse catalog JSON.
pub fn from_json_str(raw: &str) -> Result<CatalogConfig, ConfigError> {
    serde_json::from_str(raw).map_err(|e| ConfigError::Load(e.to_string()))
}

/// Load catalog config from a JSON file.
pub fn from_file(path: impl AsRef<Path>) -> Result<CatalogConfig, ConfigError> {
    let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Load(e.to_string()))?;
    from_json_str(&raw)
}

fn required_text(min: u32, max: u32) -> FieldRule {
    FieldRule { min_length: Some(min), max_length: Some(max), ..FieldRule::default() }
}

fn optional_text(max: u32) -> FieldRule {
    FieldRule { required: Some(false), max_length: Some(max), ..FieldRule::default() }
}

fn email(required: bool) -> FieldRule {
    FieldRule {
        required: if required { None } else { Some(false) },
        format: Some("email".into()),
        max_length: Some(200),
        ..FieldRule::default()
    }
}

fn resource(segment: &str, label: &str, prefix: &str, has_active: bool) -> ResourceConfig {
    ResourceConfig {
        path_segment: segment.to_string(),
        label: Some(label.to_string()),
        id_prefix: prefix.to_string(),
        operations: all_operations(),
        has_active,
        fields: BTreeMap::new(),
        search_fields: Vec::new(),
        filter_fields: Vec::new(),
        export_fields: Vec::new(),
        stats_fields: Vec::new(),
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// The builtin administrative catalog: the resource set the dashboard
/// manages out of the box. Callers can load their own catalog JSON instead.
pub fn builtin() -> CatalogConfig {
    let mut lookups = resource("lookups", "lookup", "LOOKUP", true);
    lookups.fields = BTreeMap::from([
        ("category".into(), required_text(2, 100)),
        ("subCategory".into(), required_text(2, 100)),
        (
            "items".into(),
            FieldRule { min_items: Some(1), max_items: Some(200), ..FieldRule::default() },
        ),
        ("description".into(), required_text(2, 500)),
    ]);
    lookups.search_fields = strings(&["category", "subCategory", "description"]);
    lookups.filter_fields = strings(&["category", "subCategory", "active"]);
    lookups.export_fields = strings(&[
        "id",
        "category",
        "subCategory",
        "description",
        "active",
        "created.by",
        "created.when",
    ]);
    lookups.stats_fields = strings(&["category"]);

    let mut lookup_categories = resource("lookup-categories", "lookup category", "LOOKUPCAT", true);
    lookup_categories.fields = BTreeMap::from([
        ("name".into(), required_text(2, 100)),
        ("description".into(), optional_text(500)),
    ]);
    lookup_categories.search_fields = strings(&["name", "description"]);
    lookup_categories.filter_fields = strings(&["name", "active"]);
    lookup_categories.export_fields = strings(&["id", "name", "description", "active", "created.when"]);

    let mut tenants = resource("tenants", "tenant", "TENANT", true);
    tenants.fields = BTreeMap::from([
        ("name".into(), required_text(2, 150)),
        (
            "code".into(),
            FieldRule {
                min_length: Some(2),
                max_length: Some(20),
                pattern: Some("^[a-zA-Z0-9_-]+$".into()),
                ..FieldRule::default()
            },
        ),
        ("contactEmail".into(), email(false)),
        (
            "tier".into(),
            FieldRule {
                required: Some(false),
                allowed: Some(vec![json!("standard"), json!("premium")]),
                ..FieldRule::default()
            },
        ),
        (
            "seatLimit".into(),
            FieldRule {
                required: Some(false),
                minimum: Some(1.0),
                maximum: Some(100_000.0),
                ..FieldRule::default()
            },
        ),
    ]);
    tenants.search_fields = strings(&["name", "code"]);
    tenants.filter_fields = strings(&["name", "code", "tier", "active"]);
    tenants.export_fields =
        strings(&["id", "name", "code", "contactEmail", "tier", "active", "created.when"]);
    tenants.stats_fields = strings(&["tier"]);

    let mut persons = resource("persons", "person", "PERSON", true);
    persons.fields = BTreeMap::from([
        ("firstName".into(), required_text(1, 100)),
        ("lastName".into(), required_text(1, 100)),
        ("email".into(), email(true)),
        (
            "phone".into(),
            FieldRule {
                required: Some(false),
                min_length: Some(7),
                max_length: Some(20),
                pattern: Some(r"^\+?[0-9 -]+$".into()),
                ..FieldRule::default()
            },
        ),
        ("tenantId".into(), optional_text(50)),
    ]);
    persons.search_fields = strings(&["firstName", "lastName", "email"]);
    persons.filter_fields = strings(&["firstName", "lastName", "email", "tenantId", "active"]);
    persons.export_fields = strings(&[
        "id",
        "firstName",
        "lastName",
        "email",
        "phone",
        "tenantId",
        "active",
        "created.when",
    ]);
    persons.stats_fields = strings(&["tenantId"]);

    let mut roles = resource("roles", "role", "ROLE", true);
    roles.fields = BTreeMap::from([
        ("name".into(), required_text(2, 100)),
        ("description".into(), optional_text(500)),
        (
            "permissions".into(),
            FieldRule { min_items: Some(1), max_items: Some(100), ..FieldRule::default() },
        ),
    ]);
    roles.search_fields = strings(&["name", "description"]);
    roles.filter_fields = strings(&["name", "active"]);
    roles.export_fields = strings(&["id", "name", "description", "active", "created.when"]);

    let mut admins = resource("admins", "admin", "ADMIN", true);
    admins.fields = BTreeMap::from([
        ("email".into(), email(true)),
        ("displayName".into(), required_text(2, 150)),
        ("roleId".into(), optional_text(50)),
    ]);
    admins.search_fields = strings(&["email", "displayName"]);
    admins.filter_fields = strings(&["email", "roleId", "active"]);
    admins.export_fields = strings(&["id", "email", "displayName", "roleId", "active", "created.when"]);
    admins.stats_fields = strings(&["roleId"]);

    let mut permissions = resource("permissions", "permission", "PERMISSION", false);
    permissions.fields = BTreeMap::from([
        (
            "code".into(),
            FieldRule {
                min_length: Some(3),
                max_length: Some(100),
                pattern: Some("^[a-z][a-z0-9]*([.:][a-z][a-z0-9]*)*$".into()),
                ..FieldRule::default()
            },
        ),
        ("description".into(), optional_text(300)),
    ]);
    permissions.search_fields = strings(&["code", "description"]);
    permissions.filter_fields = strings(&["code"]);
    permissions.export_fields = strings(&["id", "code", "description", "created.when"]);

    CatalogConfig {
        root_path: "root/southAfrica".into(),
        resources: vec![lookups, lookup_categories, tenants, persons, roles, admins, permissions],
    }
}
