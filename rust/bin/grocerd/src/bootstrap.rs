//! Bootstrap: configuration checks, storage and first-start seeding.
//!
//! When grocerd starts:
//! 1. Verify the resolved configuration, refusing to start on an empty
//!    listen address.
//! 2. Create the data directory and open the SQLite database.
//! 3. Create the tables and load the common items into the catalog.

use std::sync::Arc;

use tracing::info;

use grocer_core::ServiceConfig;
use grocer_sql::{SQLStore, SqliteStore};
use grocery::GroceryModule;

/// Verify the configuration is usable before touching the disk.
pub fn verify_config(config: &ServiceConfig) -> anyhow::Result<()> {
    if config.listen.trim().is_empty() {
        anyhow::bail!("listen address is empty in configuration.");
    }
    if config.resolve_sqlite_path().as_os_str().is_empty() {
        anyhow::bail!("sqlite path is empty in configuration.");
    }
    Ok(())
}

/// Create the data directory and open the database.
pub fn init_storage(config: &ServiceConfig) -> anyhow::Result<Arc<dyn SQLStore>> {
    if let Some(dir) = &config.data_dir {
        std::fs::create_dir_all(dir)?;
    }
    let path = config.resolve_sqlite_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let sql = SqliteStore::open(&path)
        .map_err(|e| anyhow::anyhow!("failed to open SQL store {}: {}", path.display(), e))?;
    info!("SQLite database at {}", path.display());
    Ok(Arc::new(sql))
}

/// Build the grocery module and seed its catalog.
pub fn init_module(sql: Arc<dyn SQLStore>) -> anyhow::Result<GroceryModule> {
    let module = GroceryModule::new(sql)?;
    module.seed()?;
    Ok(module)
}
