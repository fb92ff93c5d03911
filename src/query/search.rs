//! Case-insensitive substring matching across named field paths.

use crate::query::path::{display_value, value_at};
use serde_json::{Map, Value};

/// Keep items whose stringified value at any of the dotted `fields` contains
/// `term`, case-insensitively. An empty or whitespace-only term keeps
/// everything.
pub fn search(
    items: Vec<Map<String, Value>>,
    term: &str,
    fields: &[String],
) -> Vec<Map<String, Value>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items.into_iter().filter(|item| matches_any(item, &needle, fields)).collect()
}

/// Per-field filters: every `(field, needle)` pair must match, again by
/// case-insensitive substring containment. Blank needles are ignored.
pub fn filter_by_fields(
    items: Vec<Map<String, Value>>,
    filters: &[(String, String)],
) -> Vec<Map<String, Value>> {
    if filters.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| {
            filters.iter().all(|(field, raw)| {
                let needle = raw.trim().to_lowercase();
                needle.is_empty() || matches_field(item, &needle, field)
            })
        })
        .collect()
}

fn matches_any(item: &Map<String, Value>, needle: &str, fields: &[String]) -> bool {
    fields.iter().any(|field| matches_field(item, needle, field))
}

fn matches_field(item: &Map<String, Value>, needle: &str, field: &str) -> bool {
    value_at(item, field)
        .map(|value| display_value(value).to_lowercase().contains(needle))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<Map<String, Value>> {
        [
            json!({ "category": "Emergency Types", "subCategory": "Fire", "created": { "by": "amy" } }),
            json!({ "category": "Vehicle Types", "subCategory": "Truck", "created": { "by": "bob" } }),
            json!({ "category": "Emergency Types", "subCategory": "Flood", "created": { "by": "carol" } }),
        ]
        .into_iter()
        .map(|v| match v {
            Value::Object(map) => map,
            _ => unreachable!(),
        })
        .collect()
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_term_keeps_everything() {
        let all = items();
        assert_eq!(search(all.clone(), "", &fields(&["category"])).len(), 3);
        assert_eq!(search(all, "   ", &fields(&["category"])).len(), 3);
    }

    #[test]
    fn matches_are_case_insensitive_substrings() {
        let hits = search(items(), "FIRE", &fields(&["subCategory"]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["subCategory"], json!("Fire"));
    }

    #[test]
    fn any_listed_field_can_match() {
        let hits = search(items(), "truck", &fields(&["category", "subCategory"]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["category"], json!("Vehicle Types"));
    }

    #[test]
    fn dotted_fields_reach_into_audit_blocks() {
        let hits = search(items(), "carol", &fields(&["created.by"]));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["subCategory"], json!("Flood"));
    }

    #[test]
    fn no_fields_means_no_hits() {
        assert!(search(items(), "fire", &[]).is_empty());
    }

    #[test]
    fn field_filters_are_conjunctive() {
        let filters = vec![
            ("category".to_string(), "emergency".to_string()),
            ("subCategory".to_string(), "flo".to_string()),
        ];
        let hits = filter_by_fields(items(), &filters);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["subCategory"], json!("Flood"));
    }

    #[test]
    fn blank_filter_values_are_ignored() {
        let filters = vec![("category".to_string(), "  ".to_string())];
        assert_eq!(filter_by_fields(items(), &filters).len(), 3);
    }
}
