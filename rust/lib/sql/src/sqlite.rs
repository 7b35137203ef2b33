use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::error::SQLError;
use crate::traits::{Row, SQLStore, Value};

/// SqliteStore is a SQLStore implementation backed by rusqlite (bundled SQLite).
///
/// The store only remembers the database path. Each operation opens its own
/// connection and drops it before returning. Concurrent writers are
/// serialized by SQLite's own locking.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path. The file is
    /// created here, not on first use.
    pub fn open(path: &Path) -> Result<Self, SQLError> {
        let conn = Connection::open(path)
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        // WAL is persistent in the file header; later connections inherit it.
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        tracing::debug!("opened sqlite database at {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, SQLError> {
        Connection::open(&self.path).map_err(|e| SQLError::Connection(e.to_string()))
    }
}

/// Convert our Value enum to rusqlite's ToSql.
fn bind_params(params: &[Value]) -> Vec<Box<dyn rusqlite::types::ToSql + '_>> {
    params
        .iter()
        .map(|v| -> Box<dyn rusqlite::types::ToSql + '_> {
            match v {
                Value::Null => Box::new(rusqlite::types::Null),
                Value::Integer(i) => Box::new(*i),
                Value::Real(f) => Box::new(*f),
                Value::Text(s) => Box::new(s.as_str()),
                Value::Blob(b) => Box::new(b.as_slice()),
            }
        })
        .collect()
}

impl SQLStore for SqliteStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
        let conn = self.connect()?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                let columns = column_names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name.clone(), row_value_at(row, i)))
                    .collect();
                Ok(Row { columns })
            })
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| SQLError::Query(e.to_string()))?);
        }
        Ok(result)
    }

    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
        let conn = self.connect()?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        let affected = conn
            .execute(sql, param_refs.as_slice())
            .map_err(SQLError::from_exec)?;

        Ok(affected as u64)
    }

    fn insert(&self, sql: &str, params: &[Value]) -> Result<i64, SQLError> {
        let conn = self.connect()?;

        let bound = bind_params(params);
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            bound.iter().map(|b| b.as_ref()).collect();

        conn.execute(sql, param_refs.as_slice())
            .map_err(SQLError::from_exec)?;

        // Same connection as the INSERT, so the rowid is ours.
        Ok(conn.last_insert_rowid())
    }

    fn exec_batch(&self, sql: &str) -> Result<(), SQLError> {
        let conn = self.connect()?;
        conn.execute_batch(sql).map_err(SQLError::from_exec)
    }
}

/// Extract a Value from a rusqlite row at a given column index.
fn row_value_at(row: &rusqlite::Row, idx: usize) -> Value {
    match row.get_ref(idx) {
        Ok(ValueRef::Integer(i)) => Value::Integer(i),
        Ok(ValueRef::Real(f)) => Value::Real(f),
        Ok(ValueRef::Text(t)) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        Ok(ValueRef::Blob(b)) => Value::Blob(b.to_vec()),
        Ok(ValueRef::Null) | Err(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (SqliteStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("test.db")).unwrap();
        store
            .exec_batch(
                "CREATE TABLE things (
                     id    INTEGER PRIMARY KEY AUTOINCREMENT,
                     name  TEXT UNIQUE,
                     value REAL
                 );",
            )
            .unwrap();
        (store, dir)
    }

    #[test]
    fn insert_returns_rowid() {
        let (store, _dir) = temp_store();
        let first = store
            .insert(
                "INSERT INTO things (name, value) VALUES (?1, ?2)",
                &[Value::Text("a".into()), Value::Real(1.5)],
            )
            .unwrap();
        let second = store
            .insert(
                "INSERT INTO things (name, value) VALUES (?1, ?2)",
                &[Value::Text("b".into()), Value::Real(2.5)],
            )
            .unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn data_survives_between_connections() {
        let (store, _dir) = temp_store();
        store
            .exec(
                "INSERT INTO things (name, value) VALUES (?1, ?2)",
                &[Value::Text("kept".into()), Value::Real(42.25)],
            )
            .unwrap();

        let rows = store
            .query("SELECT id, name, value FROM things", &[])
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_i64("id"), Some(1));
        assert_eq!(rows[0].get_str("name"), Some("kept"));
        assert_eq!(rows[0].get_f64("value"), Some(42.25));
    }

    #[test]
    fn unique_violation_is_constraint_error() {
        let (store, _dir) = temp_store();
        let sql = "INSERT INTO things (name, value) VALUES (?1, ?2)";
        store
            .exec(sql, &[Value::Text("dup".into()), Value::Real(1.0)])
            .unwrap();
        let err = store
            .exec(sql, &[Value::Text("dup".into()), Value::Real(2.0)])
            .unwrap_err();
        assert!(matches!(err, SQLError::Constraint(_)), "got {err:?}");
    }

    #[test]
    fn exec_reports_affected_rows() {
        let (store, _dir) = temp_store();
        let affected = store
            .exec("DELETE FROM things WHERE id = ?1", &[Value::Integer(99)])
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[test]
    fn bad_sql_is_query_error() {
        let (store, _dir) = temp_store();
        let err = store.query("SELECT nope FROM missing", &[]).unwrap_err();
        assert!(matches!(err, SQLError::Query(_)));
    }

    #[test]
    fn null_and_integer_columns() {
        let (store, _dir) = temp_store();
        store
            .exec(
                "INSERT INTO things (name, value) VALUES (?1, ?2)",
                &[Value::Null, Value::Integer(3)],
            )
            .unwrap();
        let rows = store.query("SELECT name, value FROM things", &[]).unwrap();
        assert_eq!(rows[0].get("name"), Some(&Value::Null));
        // REAL affinity turns the integer into 3.0; either way it reads as f64.
        assert_eq!(rows[0].get_f64("value"), Some(3.0));
    }
}
