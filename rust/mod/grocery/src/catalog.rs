use std::sync::Arc;

use grocer_core::ServiceError;
use grocer_sql::{Row, SQLError, SQLStore, Value};

use crate::model::{check_name, check_price, CatalogItem};

/// SQL schema for the catalog table.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS common_items (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL UNIQUE,
    default_price REAL NOT NULL
);
";

/// Items loaded into an empty catalog, with their default prices.
pub const COMMON_ITEMS: &[(&str, f64)] = &[
    ("Coconuts", 50.00),
    ("Rice (1kg)", 80.00),
    ("Wheat Flour (1kg)", 45.00),
    ("Sugar (1kg)", 60.00),
    ("Salt (1kg)", 25.00),
    ("Cooking Oil (1L)", 120.00),
    ("Onions (1kg)", 40.00),
    ("Potatoes (1kg)", 35.00),
    ("Tomatoes (1kg)", 55.00),
    ("Milk (1L)", 65.00),
    ("Eggs (12pcs)", 75.00),
    ("Bread", 35.00),
    ("Bananas (1kg)", 70.00),
    ("Apples (1kg)", 150.00),
    ("Chicken (1kg)", 280.00),
    ("Fish (1kg)", 320.00),
    ("Dal/Lentils (1kg)", 90.00),
    ("Tea Powder (250g)", 85.00),
    ("Coffee Powder (200g)", 120.00),
    ("Biscuits", 45.00),
];

/// Persistent catalog of common items, backed by SQLStore (SQLite).
pub struct CatalogStore {
    db: Arc<dyn SQLStore>,
}

impl CatalogStore {
    /// Create a new CatalogStore and initialise the schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        db.exec_batch(SCHEMA)
            .map_err(|e| ServiceError::Storage(format!("catalog schema init: {e}")))?;
        Ok(Self { db })
    }

    /// Insert every [`COMMON_ITEMS`] entry whose name is not taken yet.
    /// Existing rows, including user edits, are left alone.
    ///
    /// Returns the number of rows inserted.
    pub fn seed(&self) -> Result<usize, ServiceError> {
        let mut inserted = 0;
        for (name, price) in COMMON_ITEMS {
            inserted += self
                .db
                .exec(
                    "INSERT OR IGNORE INTO common_items (name, default_price) VALUES (?1, ?2)",
                    &[Value::Text(name.to_string()), Value::Real(*price)],
                )
                .map_err(storage)?;
        }
        Ok(inserted as usize)
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// All items, sorted by name.
    pub fn list_items(&self) -> Result<Vec<CatalogItem>, ServiceError> {
        let rows = self
            .db
            .query(
                "SELECT id, name, default_price FROM common_items ORDER BY name",
                &[],
            )
            .map_err(storage)?;

        rows.iter().map(row_to_item).collect()
    }

    /// Get one item by id.
    pub fn get_item(&self, id: i64) -> Result<CatalogItem, ServiceError> {
        let rows = self
            .db
            .query(
                "SELECT id, name, default_price FROM common_items WHERE id = ?1",
                &[Value::Integer(id)],
            )
            .map_err(storage)?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("catalog item {id} not found")))?;
        row_to_item(row)
    }

    /// Add an item and return its generated id.
    pub fn add_item(&self, name: &str, price: f64) -> Result<i64, ServiceError> {
        let name = check_name(name)?;
        let price = check_price(price)?;

        let id = self
            .db
            .insert(
                "INSERT INTO common_items (name, default_price) VALUES (?1, ?2)",
                &[Value::Text(name.clone()), Value::Real(price)],
            )
            .map_err(|e| conflict_or_storage(e, &name))?;

        tracing::info!(id, name = %name, price, "catalog item added");
        Ok(id)
    }

    /// Rename and/or reprice an item in place.
    pub fn update_item(&self, id: i64, name: &str, price: f64) -> Result<(), ServiceError> {
        let name = check_name(name)?;
        let price = check_price(price)?;

        let affected = self
            .db
            .exec(
                "UPDATE common_items SET name = ?1, default_price = ?2 WHERE id = ?3",
                &[Value::Text(name.clone()), Value::Real(price), Value::Integer(id)],
            )
            .map_err(|e| conflict_or_storage(e, &name))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("catalog item {id} not found")));
        }
        Ok(())
    }

    /// Delete an item by id.
    pub fn delete_item(&self, id: i64) -> Result<(), ServiceError> {
        let affected = self
            .db
            .exec(
                "DELETE FROM common_items WHERE id = ?1",
                &[Value::Integer(id)],
            )
            .map_err(storage)?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("catalog item {id} not found")));
        }
        tracing::info!(id, "catalog item deleted");
        Ok(())
    }
}

fn row_to_item(row: &Row) -> Result<CatalogItem, ServiceError> {
    Ok(CatalogItem {
        id: row
            .get_i64("id")
            .ok_or_else(|| ServiceError::Storage("missing id column".into()))?,
        name: row
            .get_str("name")
            .ok_or_else(|| ServiceError::Storage("missing name column".into()))?
            .to_string(),
        default_price: row
            .get_f64("default_price")
            .ok_or_else(|| ServiceError::Storage("missing default_price column".into()))?,
    })
}

fn conflict_or_storage(e: SQLError, name: &str) -> ServiceError {
    match e {
        SQLError::Constraint(_) => {
            ServiceError::Conflict(format!("an item named '{name}' already exists"))
        }
        other => storage(other),
    }
}

fn storage(e: SQLError) -> ServiceError {
    tracing::error!("catalog store: {e}");
    ServiceError::Storage(e.to_string())
}
