//! CSV and JSON rendering for export downloads.

use crate::query::path::{display_value, leaf_name, value_at};
use serde_json::{Map, Value};

/// Export output format. Unknown inputs fall back to JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    #[default]
    Json,
}

impl ExportFormat {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("csv") {
            ExportFormat::Csv
        } else {
            ExportFormat::Json
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Render `items` in the requested format.
///
/// CSV projects the dotted `fields`: the header row uses leaf names and a
/// missing path leaves the cell empty. JSON emits the full records as a
/// pretty-printed array regardless of `fields`.
pub fn export(items: &[Map<String, Value>], format: ExportFormat, fields: &[String]) -> String {
    match format {
        ExportFormat::Csv => to_csv(items, fields),
        ExportFormat::Json => to_json(items),
    }
}

fn to_json(items: &[Map<String, Value>]) -> String {
    serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
}

fn to_csv(items: &[Map<String, Value>], fields: &[String]) -> String {
    let mut out = String::new();
    let header: Vec<String> = fields.iter().map(|f| escape_cell(leaf_name(f))).collect();
    out.push_str(&header.join(","));
    for item in items {
        out.push('\n');
        let row: Vec<String> = fields
            .iter()
            .map(|f| escape_cell(&value_at(item, f).map(display_value).unwrap_or_default()))
            .collect();
        out.push_str(&row.join(","));
    }
    out
}

/// Quote a cell when it holds the delimiter, quotes, or line breaks; embedded
/// quotes double per RFC 4180.
fn escape_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<Map<String, Value>> {
        [
            json!({
                "id": "LOOKUP1",
                "category": "Emergency, Fire",
                "note": "said \"now\"",
                "created": { "by": "amy" }
            }),
            json!({
                "id": "LOOKUP2",
                "category": "Plain",
                "created": { "by": "bob" }
            }),
        ]
        .into_iter()
        .map(|v| match v {
            Value::Object(map) => map,
            _ => unreachable!(),
        })
        .collect()
    }

    fn export_fields() -> Vec<String> {
        ["id", "category", "note", "created.by"].iter().map(|s| s.to_string()).collect()
    }

    /// Minimal RFC 4180 reader, enough to check our own output.
    fn parse_csv(text: &str) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut cell = String::new();
        let mut quoted = false;
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if quoted {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        cell.push('"');
                    }
                    '"' => quoted = false,
                    other => cell.push(other),
                }
            } else {
                match c {
                    '"' => quoted = true,
                    ',' => row.push(std::mem::take(&mut cell)),
                    '\n' => {
                        row.push(std::mem::take(&mut cell));
                        rows.push(std::mem::take(&mut row));
                    }
                    other => cell.push(other),
                }
            }
        }
        row.push(cell);
        rows.push(row);
        rows
    }

    #[test]
    fn csv_header_uses_leaf_names() {
        let csv = export(&items(), ExportFormat::Csv, &export_fields());
        let first = csv.lines().next().unwrap();
        assert_eq!(first, "id,category,note,by");
    }

    #[test]
    fn csv_escapes_commas_and_quotes() {
        let csv = export(&items(), ExportFormat::Csv, &export_fields());
        assert!(csv.contains(r#""Emergency, Fire""#));
        assert!(csv.contains(r#""said ""now""""#));
    }

    #[test]
    fn csv_missing_paths_leave_empty_cells() {
        let csv = export(&items(), ExportFormat::Csv, &export_fields());
        let rows = parse_csv(&csv);
        assert_eq!(rows[2][2], "");
    }

    #[test]
    fn csv_cells_round_trip_against_json() {
        let fields = export_fields();
        let items = items();
        let rows = parse_csv(&export(&items, ExportFormat::Csv, &fields));
        let json: Vec<Map<String, Value>> =
            serde_json::from_str(&export(&items, ExportFormat::Json, &fields)).unwrap();
        assert_eq!(rows.len(), json.len() + 1);
        for (row, item) in rows.iter().skip(1).zip(json.iter()) {
            for (cell, field) in row.iter().zip(fields.iter()) {
                let expected = value_at(item, field).map(display_value).unwrap_or_default();
                assert_eq!(cell, &expected, "field {field}");
            }
        }
    }

    #[test]
    fn json_export_keeps_full_records() {
        let text = export(&items(), ExportFormat::Json, &export_fields());
        let parsed: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["created"]["by"], json!("amy"));
    }

    #[test]
    fn empty_input_still_emits_the_header() {
        let csv = export(&[], ExportFormat::Csv, &export_fields());
        assert_eq!(csv, "id,category,note,by");
        let json = export(&[], ExportFormat::Json, &export_fields());
        assert_eq!(json.trim(), "[]");
    }

    #[test]
    fn format_parsing_falls_back_to_json() {
        assert_eq!(ExportFormat::parse("csv"), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("CSV"), ExportFormat::Csv);
        assert_eq!(ExportFormat::parse("json"), ExportFormat::Json);
        assert_eq!(ExportFormat::parse("xml"), ExportFormat::Json);
    }
}
