//! Catalog introspection: which resources exist and what they support.

use crate::error::AppError;
use crate::response;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct ResourceSummary {
    pub name: String,
    pub label: String,
    pub id_prefix: String,
    pub collection: String,
    pub operations: Vec<crate::catalog::Operation>,
}

pub async fn list_resources(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog_snapshot()?;
    let summaries: Vec<ResourceSummary> = catalog
        .resources
        .iter()
        .map(|resource| ResourceSummary {
            name: resource.path_segment.clone(),
            label: resource.label.clone(),
            id_prefix: resource.id_prefix.clone(),
            collection: resource.collection.clone(),
            operations: resource.operations.clone(),
        })
        .collect();
    Ok(response::ok(summaries))
}
