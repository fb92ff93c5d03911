//! Dotted field-path resolution over JSON documents.

use serde_json::{Map, Value};

/// Resolve a dotted path such as `created.by` against a document. Returns
/// `None` when any segment is missing or a non-object shows up mid-path.
pub fn value_at<'a>(doc: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Leaf name of a dotted path: `created.by` becomes `by`.
pub fn leaf_name(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Plain-text form of a JSON value: bare strings keep their content, null is
/// empty, everything else renders as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
