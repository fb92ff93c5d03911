//! Standard response envelope helpers.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::query::Pagination;

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { success: true, data, message: None }))
}

pub fn ok_message<T: Serialize>(data: T, message: impl Into<String>) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { success: true, data, message: Some(message.into()) }))
}

pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::CREATED, Json(SuccessOne { success: true, data, message: Some(message.into()) }))
}

/// Caller-chosen status, for outcomes like 207 Multi-Status on partial bulk
/// failures.
pub fn with_status<T: Serialize>(
    status: StatusCode,
    success: bool,
    data: T,
    message: impl Into<String>,
) -> (StatusCode, Json<SuccessOne<T>>) {
    (status, Json(SuccessOne { success, data, message: Some(message.into()) }))
}

pub fn page<T: Serialize>(data: Vec<T>, pagination: Pagination) -> (StatusCode, Json<SuccessMany<T>>) {
    (StatusCode::OK, Json(SuccessMany { success: true, data, pagination }))
}

/// File-download response with `Content-Disposition: attachment`.
pub fn attachment(filename: &str, content_type: &'static str, body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn one_envelope_skips_absent_messages() {
        let (_, Json(body)) = ok(json!({ "id": "LOOKUP1" }));
        let rendered = serde_json::to_value(&body).unwrap();
        assert_eq!(rendered, json!({ "success": true, "data": { "id": "LOOKUP1" } }));
    }

    #[test]
    fn created_carries_message_and_201() {
        let (status, Json(body)) = created(json!({ "id": "LOOKUP1" }), "lookup created");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.message.as_deref(), Some("lookup created"));
        assert!(body.success);
    }

    #[test]
    fn many_envelope_includes_pagination() {
        let pagination = Pagination { page: 1, limit: 10, total: 2, pages: 1 };
        let (status, Json(body)) = page(vec![json!({}), json!({})], pagination);
        assert_eq!(status, StatusCode::OK);
        let rendered = serde_json::to_value(&body).unwrap();
        assert_eq!(rendered["pagination"]["total"], json!(2));
        assert_eq!(rendered["success"], json!(true));
    }

    #[test]
    fn attachment_sets_download_headers() {
        let response = attachment("lookups-export.csv", "text/csv", "id\nLOOKUP1".into());
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/csv");
        assert_eq!(
            headers.get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"lookups-export.csv\""
        );
    }
}
