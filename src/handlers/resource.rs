//! Resource handlers: create, read, update, delete, list, search, bulk,
//! export, stats.

use crate::catalog::{Operation, ResolvedResource};
use crate::error::AppError;
use crate::extractors::Actor;
use crate::query::ExportFormat;
use crate::response;
use crate::service::{as_object, BulkOperation, ListQuery, ResourceService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    Path(segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resource(&segment)?;
    allow(&resource, Operation::Create)?;
    let payload = as_object(body)?;
    let record = ResourceService::create(state.store.as_ref(), &resource, payload, &actor.0).await?;
    Ok(response::created(record, format!("{} created", resource.label)))
}

pub async fn read(
    State(state): State<AppState>,
    Path((segment, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resource(&segment)?;
    allow(&resource, Operation::Read)?;
    let record = ResourceService::get_by_id(state.store.as_ref(), &resource, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{segment}/{id}")))?;
    Ok(response::ok(record))
}

/// PUT and PATCH share merge semantics: omitted fields keep their prior
/// values either way.
pub async fn replace(
    State(state): State<AppState>,
    actor: Actor,
    Path((segment, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    apply_update(state, actor, segment, id, body).await
}

pub async fn update(
    State(state): State<AppState>,
    actor: Actor,
    Path((segment, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    apply_update(state, actor, segment, id, body).await
}

async fn apply_update(
    state: AppState,
    actor: Actor,
    segment: String,
    id: String,
    body: Value,
) -> Result<(StatusCode, Json<response::SuccessOne<crate::store::Document>>), AppError> {
    let resource = state.resource(&segment)?;
    allow(&resource, Operation::Update)?;
    let payload = as_object(body)?;
    let record =
        ResourceService::update(state.store.as_ref(), &resource, &id, payload, &actor.0).await?;
    Ok(response::ok_message(record, format!("{} updated", resource.label)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((segment, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resource(&segment)?;
    allow(&resource, Operation::Delete)?;
    ResourceService::delete(state.store.as_ref(), &resource, &id).await?;
    Ok(response::ok_message(json!({ "id": id }), format!("{} deleted", resource.label)))
}

pub async fn list(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resource(&segment)?;
    allow(&resource, Operation::List)?;
    let query = ListQuery::from_params(&resource, &params);
    let page = ResourceService::list(state.store.as_ref(), &resource, &query).await?;
    Ok(response::page(page.data, page.pagination))
}

pub async fn search(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resource(&segment)?;
    allow(&resource, Operation::Search)?;
    let query = ListQuery::from_params(&resource, &params);
    let page = ResourceService::search(state.store.as_ref(), &resource, &query).await?;
    Ok(response::page(page.data, page.pagination))
}

pub async fn bulk(
    State(state): State<AppState>,
    actor: Actor,
    Path(segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resource(&segment)?;
    allow(&resource, Operation::Bulk)?;
    let operation: BulkOperation = body
        .get("operation")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::BadRequest("body must carry an operation".into()))?
        .parse()?;
    let items = match body.get("data") {
        Some(Value::Array(items)) => items.clone(),
        _ => return Err(AppError::BadRequest("body must carry a data array".into())),
    };
    let outcome =
        ResourceService::bulk(state.store.as_ref(), &resource, operation, items, &actor.0).await?;
    let status = if outcome.failed > 0 { StatusCode::MULTI_STATUS } else { StatusCode::OK };
    let message = format!(
        "processed {} items: {} succeeded, {} failed",
        outcome.processed, outcome.successful, outcome.failed
    );
    Ok(response::with_status(status, outcome.failed == 0, outcome, message))
}

pub async fn export(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resource(&segment)?;
    allow(&resource, Operation::Export)?;
    let format = params.get("format").map(|raw| ExportFormat::parse(raw)).unwrap_or_default();
    let query = ListQuery::from_params(&resource, &params);
    let file = ResourceService::export(state.store.as_ref(), &resource, format, &query).await?;
    Ok(response::attachment(&file.filename, file.content_type, file.body))
}

pub async fn stats(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let resource = state.resource(&segment)?;
    allow(&resource, Operation::Stats)?;
    let summary = ResourceService::stats(state.store.as_ref(), &resource).await?;
    Ok(response::ok(summary))
}

fn allow(resource: &ResolvedResource, operation: Operation) -> Result<(), AppError> {
    if resource.allows(operation) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "{} not allowed for {}",
            operation.name(),
            resource.path_segment
        )))
    }
}
