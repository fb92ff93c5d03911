//! Payload validation from catalog field rules.

use crate::catalog::FieldRule;
use crate::error::Violation;
use crate::store::Document;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct PayloadValidator;

impl PayloadValidator {
    /// Validate a create payload against the field rules. Declared fields are
    /// required unless the rule opts out with `required: false`; present
    /// fields must satisfy their constraints. Collects every violation
    /// instead of stopping at the first.
    pub fn validate(
        payload: &Document,
        rules: &BTreeMap<String, FieldRule>,
    ) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        for (field, rule) in rules {
            let value = payload.get(field);
            if value.is_none() || value == Some(&Value::Null) {
                if rule.required.unwrap_or(true) {
                    violations.push(Violation {
                        field: field.clone(),
                        rule: "required",
                        message: format!("{field} is required"),
                    });
                }
                continue;
            }
            if let Some(v) = value {
                check_field(field, v, rule, &mut violations);
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Validate only the fields present in an update payload. `required` is
    /// not enforced; merge semantics keep prior values for omitted fields.
    pub fn validate_partial(
        payload: &Document,
        rules: &BTreeMap<String, FieldRule>,
    ) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        for (field, value) in payload {
            if let Some(rule) = rules.get(field) {
                check_field(field, value, rule, &mut violations);
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn check_field(field: &str, value: &Value, rule: &FieldRule, violations: &mut Vec<Violation>) {
    if value.is_null() {
        return;
    }
    if let Some(s) = value.as_str() {
        if let Some(min) = rule.min_length {
            if s.len() < min as usize {
                violations.push(Violation {
                    field: field.to_string(),
                    rule: "minLength",
                    message: format!("{field} must be at least {min} characters"),
                });
            }
        }
        if let Some(max) = rule.max_length {
            if s.len() > max as usize {
                violations.push(Violation {
                    field: field.to_string(),
                    rule: "maxLength",
                    message: format!("{field} must be at most {max} characters"),
                });
            }
        }
        if let Some(pattern) = &rule.pattern {
            // Patterns are compile-checked at catalog load; a broken one here
            // just skips the check.
            if let Ok(re) = Regex::new(pattern) {
                if !re.is_match(s) {
                    violations.push(Violation {
                        field: field.to_string(),
                        rule: "pattern",
                        message: format!("{field} does not match the required pattern"),
                    });
                }
            }
        }
        if let Some(format) = &rule.format {
            if format.eq_ignore_ascii_case("email") && !looks_like_email(s) {
                violations.push(Violation {
                    field: field.to_string(),
                    rule: "format",
                    message: format!("{field} must be a valid email"),
                });
            }
        }
    }
    if let Some(items) = value.as_array() {
        if let Some(min) = rule.min_items {
            if items.len() < min as usize {
                violations.push(Violation {
                    field: field.to_string(),
                    rule: "minItems",
                    message: format!("{field} must have at least {min} items"),
                });
            }
        }
        if let Some(max) = rule.max_items {
            if items.len() > max as usize {
                violations.push(Violation {
                    field: field.to_string(),
                    rule: "maxItems",
                    message: format!("{field} must have at most {max} items"),
                });
            }
        }
    }
    if let Some(n) = value.as_f64() {
        if let Some(min) = rule.minimum {
            if n < min {
                violations.push(Violation {
                    field: field.to_string(),
                    rule: "minimum",
                    message: format!("{field} must be at least {min}"),
                });
            }
        }
        if let Some(max) = rule.maximum {
            if n > max {
                violations.push(Violation {
                    field: field.to_string(),
                    rule: "maximum",
                    message: format!("{field} must be at most {max}"),
                });
            }
        }
    }
    if let Some(allowed) = &rule.allowed {
        if !allowed.iter().any(|a| value_eq(value, a)) {
            violations.push(Violation {
                field: field.to_string(),
                rule: "allowed",
                message: format!(
                    "{field} must be one of: {:?}",
                    allowed.iter().take(5).collect::<Vec<_>>()
                ),
            });
        }
    }
}

fn value_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(n), Value::Number(m)) => n.as_f64() == m.as_f64(),
        _ => a == b,
    }
}

fn looks_like_email(s: &str) -> bool {
    s.contains('@') && s.len() >= 3
}
