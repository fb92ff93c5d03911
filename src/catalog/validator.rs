//! Catalog validation: path and prefix uniqueness plus rule sanity.

use crate::catalog::types::{CatalogConfig, FieldRule};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

/// Path segments taken by non-resource routes.
pub const RESERVED_SEGMENTS: &[&str] = &["resources", "health", "version", "ready"];

pub fn validate(config: &CatalogConfig) -> Result<(), ConfigError> {
    if config.root_path.trim().is_empty() {
        return Err(ConfigError::Validation("root_path must not be empty".into()));
    }
    if config.resources.is_empty() {
        return Err(ConfigError::Validation("at least one resource required".into()));
    }

    let mut segments = HashSet::new();
    let mut prefixes = HashSet::new();
    for resource in &config.resources {
        let segment = resource.path_segment.as_str();
        if segment.is_empty() || segment.contains('/') {
            return Err(ConfigError::Validation(format!(
                "path_segment '{segment}' must be a single non-empty segment"
            )));
        }
        if RESERVED_SEGMENTS.contains(&segment) {
            return Err(ConfigError::ReservedPathSegment(segment.to_string()));
        }
        if !segments.insert(segment) {
            return Err(ConfigError::DuplicatePathSegment(segment.to_string()));
        }
        if !valid_prefix(&resource.id_prefix) {
            return Err(ConfigError::InvalidIdPrefix {
                segment: segment.to_string(),
                prefix: resource.id_prefix.clone(),
            });
        }
        if !prefixes.insert(resource.id_prefix.as_str()) {
            return Err(ConfigError::DuplicateIdPrefix(resource.id_prefix.clone()));
        }
        for (field, rule) in &resource.fields {
            check_rule(segment, field, rule)?;
        }
    }

    Ok(())
}

/// Prefixes start with an uppercase letter and stay in `[A-Z0-9]`, so ids
/// split cleanly into prefix and millisecond suffix.
fn valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

fn check_rule(segment: &str, field: &str, rule: &FieldRule) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidRule {
        segment: segment.to_string(),
        field: field.to_string(),
        reason,
    };
    if let (Some(min), Some(max)) = (rule.min_length, rule.max_length) {
        if min > max {
            return Err(invalid(format!("min_length {min} exceeds max_length {max}")));
        }
    }
    if let (Some(min), Some(max)) = (rule.min_items, rule.max_items) {
        if min > max {
            return Err(invalid(format!("min_items {min} exceeds max_items {max}")));
        }
    }
    if let (Some(min), Some(max)) = (rule.minimum, rule.maximum) {
        if min > max {
            return Err(invalid(format!("minimum {min} exceeds maximum {max}")));
        }
    }
    if let Some(pattern) = &rule.pattern {
        if Regex::new(pattern).is_err() {
            return Err(invalid(format!("pattern does not compile: {pattern}")));
        }
    }
    if let Some(format) = &rule.format {
        if !format.eq_ignore_ascii_case("email") {
            return Err(invalid(format!("unknown format: {format}")));
        }
    }
    if let Some(allowed) = &rule.allowed {
        if allowed.is_empty() {
            return Err(invalid("allowed must not be empty".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::loader::builtin;
    use crate::catalog::types::ResourceConfig;

    fn resource(segment: &str, prefix: &str) -> ResourceConfig {
        ResourceConfig {
            path_segment: segment.to_string(),
            label: None,
            id_prefix: prefix.to_string(),
            operations: crate::catalog::types::all_operations(),
            has_active: false,
            fields: Default::default(),
            search_fields: Vec::new(),
            filter_fields: Vec::new(),
            export_fields: Vec::new(),
            stats_fields: Vec::new(),
        }
    }

    fn config(resources: Vec<ResourceConfig>) -> CatalogConfig {
        CatalogConfig { root_path: "root/test".into(), resources }
    }

    #[test]
    fn builtin_catalog_validates() {
        assert!(validate(&builtin()).is_ok());
    }

    #[test]
    fn duplicate_path_segments_are_rejected() {
        let cfg = config(vec![resource("lookups", "LOOKUP"), resource("lookups", "OTHER")]);
        assert!(matches!(validate(&cfg), Err(ConfigError::DuplicatePathSegment(s)) if s == "lookups"));
    }

    #[test]
    fn reserved_path_segments_are_rejected() {
        let cfg = config(vec![resource("resources", "RES")]);
        assert!(matches!(validate(&cfg), Err(ConfigError::ReservedPathSegment(_))));
    }

    #[test]
    fn duplicate_id_prefixes_are_rejected() {
        let cfg = config(vec![resource("lookups", "LOOKUP"), resource("tenants", "LOOKUP")]);
        assert!(matches!(validate(&cfg), Err(ConfigError::DuplicateIdPrefix(_))));
    }

    #[test]
    fn prefixes_must_be_uppercase_alphanumeric() {
        for bad in ["lookup", "Lookup", "1LOOKUP", "LOOK-UP", ""] {
            let cfg = config(vec![resource("lookups", bad)]);
            assert!(
                matches!(validate(&cfg), Err(ConfigError::InvalidIdPrefix { .. })),
                "prefix {bad:?} should be rejected"
            );
        }
        assert!(validate(&config(vec![resource("lookups", "LOOKUP2")])).is_ok());
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut bad = resource("lookups", "LOOKUP");
        bad.fields.insert(
            "name".into(),
            FieldRule { min_length: Some(10), max_length: Some(2), ..FieldRule::default() },
        );
        assert!(matches!(validate(&config(vec![bad])), Err(ConfigError::InvalidRule { .. })));
    }

    #[test]
    fn broken_patterns_are_rejected() {
        let mut bad = resource("lookups", "LOOKUP");
        bad.fields.insert(
            "code".into(),
            FieldRule { pattern: Some("([".into()), ..FieldRule::default() },
        );
        assert!(matches!(validate(&config(vec![bad])), Err(ConfigError::InvalidRule { .. })));
    }

    #[test]
    fn empty_catalogs_are_rejected() {
        assert!(validate(&config(Vec::new())).is_err());
        let mut cfg = config(vec![resource("lookups", "LOOKUP")]);
        cfg.root_path = "  ".into();
        assert!(validate(&cfg).is_err());
    }
}
