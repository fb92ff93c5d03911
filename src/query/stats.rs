//! Distinct-value counts for stats endpoints.

use crate::query::path::{display_value, value_at};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Bucket used for null or missing values.
pub const UNSET_BUCKET: &str = "(unset)";

/// Counts per distinct value for each grouped field, plus the grand total.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Aggregates {
    pub total: usize,
    pub fields: BTreeMap<String, BTreeMap<String, usize>>,
}

/// Count items per distinct value of each dotted `group_fields` path. Null
/// and missing values land in the [`UNSET_BUCKET`].
pub fn aggregate(items: &[Map<String, Value>], group_fields: &[String]) -> Aggregates {
    let mut fields: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for field in group_fields {
        let counts = fields.entry(field.clone()).or_default();
        for item in items {
            let bucket = match value_at(item, field) {
                None | Some(Value::Null) => UNSET_BUCKET.to_string(),
                Some(value) => display_value(value),
            };
            *counts.entry(bucket).or_insert(0) += 1;
        }
    }
    Aggregates { total: items.len(), fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<Map<String, Value>> {
        [
            json!({ "category": "Emergency", "region": "west" }),
            json!({ "category": "Emergency", "region": null }),
            json!({ "category": "Vehicle" }),
        ]
        .into_iter()
        .map(|v| match v {
            Value::Object(map) => map,
            _ => unreachable!(),
        })
        .collect()
    }

    #[test]
    fn counts_distinct_values_per_field() {
        let fields = vec!["category".to_string()];
        let stats = aggregate(&items(), &fields);
        assert_eq!(stats.total, 3);
        let category = &stats.fields["category"];
        assert_eq!(category["Emergency"], 2);
        assert_eq!(category["Vehicle"], 1);
    }

    #[test]
    fn null_and_missing_fall_into_the_unset_bucket() {
        let fields = vec!["region".to_string()];
        let stats = aggregate(&items(), &fields);
        let region = &stats.fields["region"];
        assert_eq!(region[UNSET_BUCKET], 2);
        assert_eq!(region["west"], 1);
    }

    #[test]
    fn no_group_fields_still_reports_the_total() {
        let stats = aggregate(&items(), &[]);
        assert_eq!(stats.total, 3);
        assert!(stats.fields.is_empty());
    }
}
