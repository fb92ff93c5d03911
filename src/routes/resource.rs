//! Resource routes built from the resolved catalog.
//! Paths are parameterized so handlers resolve `:resource` at request time; an
//! unknown segment is a 404 without touching the store.

use crate::handlers::catalog::list_resources;
use crate::handlers::resource::{
    bulk, create, export, list, read, remove, replace, search, stats, update,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/resources", get(list_resources))
        .route("/:resource", get(list).post(create))
        .route("/:resource/search", get(search))
        .route("/:resource/query", get(search))
        .route("/:resource/export", get(export))
        .route("/:resource/stats", get(stats))
        .route("/:resource/bulk", post(bulk))
        .route("/:resource/:id", get(read).put(replace).patch(update).delete(remove))
        .with_state(state)
}
