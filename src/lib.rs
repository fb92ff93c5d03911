//! Backoffice SDK: catalog-driven REST backend library.

pub mod catalog;
pub mod error;
pub mod extractors;
pub mod ident;
pub mod query;
pub mod repo;
pub mod response;
pub mod state;
pub mod store;
pub mod service;
pub mod handlers;
pub mod routes;

pub use catalog::{builtin, from_file, from_json_str, resolve, CatalogConfig, ResolvedCatalog, ResolvedResource};
pub use error::{AppError, ConfigError, Violation};
pub use extractors::Actor;
pub use state::AppState;
pub use store::{Document, DocumentStore, MemoryStore, StoreError};
pub use routes::{common_routes, common_routes_with_ready, resource_routes};
pub use service::{ResourceService, PayloadValidator};
