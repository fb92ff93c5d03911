//! Record id generation: uppercase resource prefix plus epoch milliseconds.

use chrono::Utc;

/// Returns `<PREFIX><ms-since-epoch>`, e.g. `LOOKUP1704067200000`.
///
/// Ids are a pure function of wall-clock time, so they sort by creation
/// order. Two calls inside the same millisecond collide; acceptable for a
/// low-traffic internal tool, callers that seed in a loop should space
/// their writes.
pub fn resource_id(prefix: &str) -> String {
    format!("{}{}", prefix, Utc::now().timestamp_millis())
}
