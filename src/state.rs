//! Shared application state for all routes. The catalog is reloadable so new
//! resources show up without a restart.

use crate::catalog::{resolve, CatalogConfig, ResolvedCatalog, ResolvedResource};
use crate::error::{AppError, ConfigError};
use crate::store::DocumentStore;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub catalog: Arc<RwLock<ResolvedCatalog>>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, catalog: ResolvedCatalog) -> Self {
        AppState { store, catalog: Arc::new(RwLock::new(catalog)) }
    }

    /// Look up one resource by path segment. Cloned out of the lock so
    /// handlers never hold the guard across an await.
    pub fn resource(&self, segment: &str) -> Result<ResolvedResource, AppError> {
        let catalog = self.catalog.read().map_err(|_| poisoned())?;
        catalog
            .resource_by_path(segment)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("resource {segment}")))
    }

    /// Snapshot of the whole catalog for introspection.
    pub fn catalog_snapshot(&self) -> Result<ResolvedCatalog, AppError> {
        Ok(self.catalog.read().map_err(|_| poisoned())?.clone())
    }

    /// Validate, resolve, and swap in a new catalog config.
    pub fn reload_catalog(&self, config: &CatalogConfig) -> Result<(), AppError> {
        let resolved = resolve(config)?;
        let mut guard = self.catalog.write().map_err(|_| poisoned())?;
        *guard = resolved;
        tracing::info!(resources = guard.resources.len(), "catalog reloaded");
        Ok(())
    }
}

fn poisoned() -> AppError {
    AppError::Config(ConfigError::Load("catalog lock poisoned".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use crate::store::MemoryStore;

    fn state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), resolve(&builtin()).unwrap())
    }

    #[test]
    fn resource_lookup_clones_out_of_the_lock() {
        let state = state();
        let lookups = state.resource("lookups").unwrap();
        assert_eq!(lookups.collection, "root/southAfrica/lookups");
        assert!(matches!(state.resource("widgets"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn reload_swaps_the_catalog() {
        let state = state();
        let mut config = builtin();
        config.resources.retain(|r| r.path_segment == "lookups");
        state.reload_catalog(&config).unwrap();

        assert!(state.resource("lookups").is_ok());
        assert!(state.resource("tenants").is_err());
        assert_eq!(state.catalog_snapshot().unwrap().resources.len(), 1);
    }

    #[test]
    fn reload_rejects_invalid_configs_and_keeps_the_old_catalog() {
        let state = state();
        let mut config = builtin();
        config.resources[1].path_segment = "lookups".into();
        assert!(state.reload_catalog(&config).is_err());
        // old catalog still answers
        assert!(state.resource("tenants").is_ok());
    }
}
