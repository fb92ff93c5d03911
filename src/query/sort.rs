//! Stable field sort over documents.

use crate::query::path::{display_value, value_at};
use chrono::DateTime;
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Sort direction parsed from query input; anything but `desc` is ascending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Stable sort by a dotted `field` path.
///
/// Missing and null values sort lowest. Strings compare case-insensitively,
/// numbers numerically, and RFC 3339 timestamps chronologically. Sorting by
/// a field no document carries leaves the order unchanged, since every key
/// compares equal under a stable sort.
pub fn sort_by_field(items: &mut [Map<String, Value>], field: &str, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ordering = compare_values(value_at(a, field), value_at(b, field));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => compare_strings(x, y),
        // Mixed types order by a fixed type rank, then by rendered text.
        _ => type_rank(a)
            .cmp(&type_rank(b))
            .then_with(|| display_value(a).to_lowercase().cmp(&display_value(b).to_lowercase())),
    }
}

fn compare_strings(a: &str, b: &str) -> Ordering {
    if let (Ok(x), Ok(y)) = (DateTime::parse_from_rfc3339(a), DateTime::parse_from_rfc3339(b)) {
        return x.cmp(&y);
    }
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
