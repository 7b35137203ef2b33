use std::sync::Arc;

use grocer_core::ServiceError;
use grocer_sql::{Row, SQLError, SQLStore, Value};

use crate::model::{GroceryList, LineItem, ListSummary};

/// SQL schema for saved lists. `items` holds the JSON snapshot.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS grocery_lists (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    created_date     TEXT NOT NULL,
    delivery_address TEXT,
    items            TEXT NOT NULL,
    total_amount     REAL NOT NULL
);
";

/// Persistent storage for saved grocery lists. Lists are written once and
/// never modified.
pub struct ListStore {
    db: Arc<dyn SQLStore>,
}

impl ListStore {
    /// Create a new ListStore and initialise the schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        db.exec_batch(SCHEMA)
            .map_err(|e| ServiceError::Storage(format!("list schema init: {e}")))?;
        Ok(Self { db })
    }

    /// Snapshot a list and return its generated id.
    pub fn save_list(
        &self,
        created_date: &str,
        delivery_address: Option<&str>,
        items: &[LineItem],
        total_amount: f64,
    ) -> Result<i64, ServiceError> {
        for item in items {
            item.validate()?;
        }
        if !total_amount.is_finite() {
            return Err(ServiceError::Validation("total must be a number".into()));
        }

        let items_json =
            serde_json::to_string(items).map_err(|e| ServiceError::Internal(e.to_string()))?;

        let id = self
            .db
            .insert(
                "INSERT INTO grocery_lists (created_date, delivery_address, items, total_amount) \
                 VALUES (?1, ?2, ?3, ?4)",
                &[
                    Value::Text(created_date.to_string()),
                    match delivery_address {
                        Some(a) => Value::Text(a.to_string()),
                        None => Value::Null,
                    },
                    Value::Text(items_json),
                    Value::Real(total_amount),
                ],
            )
            .map_err(storage)?;

        tracing::info!(id, items = items.len(), total_amount, "grocery list saved");
        Ok(id)
    }

    /// Get a saved list by id.
    pub fn get_list(&self, id: i64) -> Result<GroceryList, ServiceError> {
        let rows = self
            .db
            .query(
                "SELECT id, created_date, delivery_address, items, total_amount \
                 FROM grocery_lists WHERE id = ?1",
                &[Value::Integer(id)],
            )
            .map_err(storage)?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("grocery list {id} not found")))?;

        let items_json = row
            .get_str("items")
            .ok_or_else(|| ServiceError::Storage("missing items column".into()))?;
        let items: Vec<LineItem> = serde_json::from_str(items_json)
            .map_err(|e| ServiceError::Storage(format!("bad items json in list {id}: {e}")))?;

        let summary = row_to_summary(row)?;
        Ok(GroceryList {
            id: summary.id,
            created_date: summary.created_date,
            delivery_address: summary.delivery_address,
            items,
            total_amount: summary.total_amount,
        })
    }

    /// All saved lists, newest first.
    pub fn list_summaries(&self) -> Result<Vec<ListSummary>, ServiceError> {
        let rows = self
            .db
            .query(
                "SELECT id, created_date, delivery_address, total_amount \
                 FROM grocery_lists ORDER BY id DESC",
                &[],
            )
            .map_err(storage)?;

        rows.iter().map(row_to_summary).collect()
    }
}

fn row_to_summary(row: &Row) -> Result<ListSummary, ServiceError> {
    Ok(ListSummary {
        id: row
            .get_i64("id")
            .ok_or_else(|| ServiceError::Storage("missing id column".into()))?,
        created_date: row
            .get_str("created_date")
            .ok_or_else(|| ServiceError::Storage("missing created_date column".into()))?
            .to_string(),
        delivery_address: row.get_str("delivery_address").map(str::to_string),
        total_amount: row
            .get_f64("total_amount")
            .ok_or_else(|| ServiceError::Storage("missing total_amount column".into()))?,
    })
}

fn storage(e: SQLError) -> ServiceError {
    tracing::error!("list store: {e}");
    ServiceError::Storage(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::model::ADDRESS_NOT_SPECIFIED;
    use grocer_sql::SqliteStore;

    fn test_db() -> (Arc<dyn SQLStore>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db: Arc<dyn SQLStore> =
            Arc::new(SqliteStore::open(&dir.path().join("grocery.db")).unwrap());
        (db, dir)
    }

    fn item(name: &str, quantity: f64, price: f64) -> LineItem {
        LineItem {
            name: name.into(),
            quantity,
            price,
            total: quantity * price,
        }
    }

    #[test]
    fn rice_scenario() {
        let (db, _dir) = test_db();
        let store = ListStore::new(db).unwrap();
        let items = vec![item("Rice (1kg)", 2.0, 80.0)];
        let id = store.save_list("2024-01-15", Some(""), &items, 160.0).unwrap();

        let list = store.get_list(id).unwrap();
        assert_eq!(list.created_date, "2024-01-15");
        assert_eq!(list.display_address(), ADDRESS_NOT_SPECIFIED);
        assert_eq!(list.items, items);
        assert_eq!(list.total_amount, 160.0);
    }

    #[test]
    fn round_trip_keeps_order_and_precision() {
        let (db, _dir) = test_db();
        let store = ListStore::new(db).unwrap();
        let items = vec![
            item("Tomatoes (1kg)", 0.75, 55.0),
            item("Apples (1kg)", 1.0, 150.0),
            LineItem {
                name: "Odd".into(),
                quantity: 3.0,
                price: 0.1,
                total: 0.30000000000000004,
            },
            item("Bread", 2.0, 35.0),
        ];
        let id = store.save_list("today", Some("Flat 4B"), &items, 263.55).unwrap();

        let list = store.get_list(id).unwrap();
        assert_eq!(list.items, items);
        assert_eq!(list.items[2].total.to_bits(), 0.30000000000000004f64.to_bits());
        assert_eq!(list.delivery_address.as_deref(), Some("Flat 4B"));
    }

    #[test]
    fn total_is_stored_as_given() {
        let (db, _dir) = test_db();
        let store = ListStore::new(db).unwrap();
        let mut wrong = item("Milk (1L)", 2.0, 65.0);
        wrong.total = 1.0;
        let id = store.save_list("d", None, &[wrong.clone()], 999.0).unwrap();
        let list = store.get_list(id).unwrap();
        assert_eq!(list.items[0].total, 1.0);
        assert_eq!(list.total_amount, 999.0);
    }

    #[test]
    fn summaries_newest_first() {
        let (db, _dir) = test_db();
        let store = ListStore::new(db).unwrap();
        for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            store.save_list(day, None, &[], 0.0).unwrap();
        }
        let ids: Vec<i64> = store.list_summaries().unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn missing_list_is_not_found() {
        let (db, _dir) = test_db();
        let store = ListStore::new(db).unwrap();
        assert!(matches!(store.get_list(42), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn bad_line_item_is_rejected_before_insert() {
        let (db, _dir) = test_db();
        let store = ListStore::new(db).unwrap();
        let err = store
            .save_list("d", None, &[item("Eggs (12pcs)", 0.0, 75.0)], 0.0)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(store.list_summaries().unwrap().is_empty());
    }

    #[test]
    fn catalog_changes_do_not_touch_saved_lists() {
        let (db, _dir) = test_db();
        let catalog = CatalogStore::new(Arc::clone(&db)).unwrap();
        let lists = ListStore::new(db).unwrap();

        let sugar = catalog.add_item("Sugar (1kg)", 60.0).unwrap();
        let items = vec![item("Sugar (1kg)", 2.0, 60.0)];
        let id = lists.save_list("2024-02-01", None, &items, 120.0).unwrap();

        catalog.update_item(sugar, "Sugar (1kg)", 75.0).unwrap();
        catalog.delete_item(sugar).unwrap();

        let list = lists.get_list(id).unwrap();
        assert_eq!(list.items, items);
        assert_eq!(list.total_amount, 120.0);
    }
}
