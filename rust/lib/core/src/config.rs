use std::path::PathBuf;

/// Default SQLite file name, relative to the data directory.
pub const DEFAULT_SQLITE_FILE: &str = "grocery.db";

/// Default HTTP listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:5000";

/// Runtime configuration handed to storage initialization and the server.
///
/// The binary fills this from its TOML file and command-line flags. Unset
/// paths fall back to defaults resolved here.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the database file. Created on startup if missing.
    pub data_dir: Option<PathBuf>,

    /// Path to the SQLite database file.
    /// Defaults to `{data_dir}/grocery.db` if not specified.
    pub sqlite_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            sqlite_path: None,
            listen: DEFAULT_LISTEN.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the SQLite database path, falling back to `{data_dir}/grocery.db`.
    pub fn resolve_sqlite_path(&self) -> PathBuf {
        self.sqlite_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath(DEFAULT_SQLITE_FILE))
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}
