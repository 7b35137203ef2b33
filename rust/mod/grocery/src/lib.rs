//! Grocery module: a catalog of common items with default prices, immutable
//! saved lists, PDF export and the HTML pages that drive them.
//!
//! # Usage
//!
//! ```ignore
//! use grocery::GroceryModule;
//!
//! let module = GroceryModule::new(Arc::new(SqliteStore::open(path)?))?;
//! module.seed()?;
//! let router = module.routes(); // Mounted at the root.
//! ```

pub mod api;
pub mod catalog;
pub mod lists;
pub mod model;
pub mod render;
pub mod views;

use std::sync::Arc;

use axum::Router;

use grocer_core::{Module, ServiceError};
use grocer_sql::SQLStore;

use crate::api::GroceryState;
use crate::catalog::CatalogStore;
use crate::lists::ListStore;

/// Grocery module implementing the Module trait.
///
/// Both stores share one SQLStore; their tables live in the same database.
pub struct GroceryModule {
    catalog: Arc<CatalogStore>,
    lists: Arc<ListStore>,
}

impl GroceryModule {
    /// Create the module and initialise both schemas.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        let catalog = CatalogStore::new(Arc::clone(&db))?;
        let lists = ListStore::new(db)?;
        Ok(Self {
            catalog: Arc::new(catalog),
            lists: Arc::new(lists),
        })
    }

    /// Load the common items into the catalog, keeping existing entries.
    pub fn seed(&self) -> Result<usize, ServiceError> {
        let inserted = self.catalog.seed()?;
        tracing::info!(inserted, "catalog seeded");
        Ok(inserted)
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    pub fn lists(&self) -> &Arc<ListStore> {
        &self.lists
    }
}

impl Module for GroceryModule {
    fn name(&self) -> &str {
        "grocery"
    }

    fn routes(&self) -> Router {
        api::build_router(GroceryState {
            catalog: Arc::clone(&self.catalog),
            lists: Arc::clone(&self.lists),
        })
    }
}
