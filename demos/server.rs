//! Example server: resolves the builtin catalog (or CATALOG_PATH), backs it
//! with the in-memory store, and mounts common plus resource routes under
//! /internal.

use backoffice_sdk::{
    builtin, common_routes_with_ready, from_file, resolve, resource_routes, AppState, MemoryStore,
};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("backoffice_sdk=info".parse()?))
        .init();

    let config = match std::env::var("CATALOG_PATH") {
        Ok(path) => from_file(path)?,
        Err(_) => builtin(),
    };
    let catalog = resolve(&config)?;
    let state = AppState::new(Arc::new(MemoryStore::new()), catalog);

    let app = Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/internal", resource_routes(state))
        .layer(RequestBodyLimitLayer::new(1024 * 1024));

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let listener = TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
