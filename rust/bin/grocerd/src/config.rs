//! Server configuration file.
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0:5000"
//!
//! [storage]
//! data_dir = "/var/lib/grocer"
//! sqlite_path = "/var/lib/grocer/grocery.db"   # optional
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use grocer_core::config::DEFAULT_LISTEN;
use grocer_core::ServiceConfig;

/// Directory searched for named configurations.
pub const CONFIG_DIR: &str = "/etc/grocer";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    /// HTTP listen address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the database. Created on startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Explicit database file, overriding `{data_dir}/grocery.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqlite_path: Option<String>,
}

impl ServerConfig {
    /// Resolve a config argument: anything that looks like a path is used
    /// as-is, a bare name maps to `/etc/grocer/<name>.toml`.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            Path::new(CONFIG_DIR).join(format!("{name_or_path}.toml"))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Merge with command-line overrides. Flags win over the file, the file
    /// wins over built-in defaults.
    pub fn to_service_config(&self, listen: Option<&str>, db: Option<&Path>) -> ServiceConfig {
        let listen = listen
            .map(str::to_string)
            .or_else(|| self.server.listen.clone())
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string());

        ServiceConfig {
            data_dir: self.storage.data_dir.as_ref().map(PathBuf::from),
            sqlite_path: db
                .map(Path::to_path_buf)
                .or_else(|| self.storage.sqlite_path.as_ref().map(PathBuf::from)),
            listen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            ServerConfig::resolve_path("shop"),
            PathBuf::from("/etc/grocer/shop.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./grocer.toml"),
            PathBuf::from("./grocer.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("/tmp/x/grocer.toml"),
            PathBuf::from("/tmp/x/grocer.toml")
        );
    }

    #[test]
    fn test_parse_full() {
        let config = ServerConfig::parse(
            r#"
            [server]
            listen = "0.0.0.0:8000"

            [storage]
            data_dir = "/var/lib/grocer"
            sqlite_path = "/srv/lists.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.listen.as_deref(), Some("0.0.0.0:8000"));
        assert_eq!(config.storage.data_dir.as_deref(), Some("/var/lib/grocer"));
        assert_eq!(config.storage.sqlite_path.as_deref(), Some("/srv/lists.db"));
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = ServerConfig::parse("").unwrap();
        let svc = config.to_service_config(None, None);
        assert_eq!(svc.listen, "127.0.0.1:5000");
        assert_eq!(svc.resolve_sqlite_path(), PathBuf::from("grocery.db"));
    }

    #[test]
    fn test_flags_override_file() {
        let config = ServerConfig::parse(
            r#"
            [server]
            listen = "0.0.0.0:8000"
            [storage]
            data_dir = "/var/lib/grocer"
            "#,
        )
        .unwrap();

        let svc = config.to_service_config(None, None);
        assert_eq!(svc.listen, "0.0.0.0:8000");
        assert_eq!(
            svc.resolve_sqlite_path(),
            PathBuf::from("/var/lib/grocer/grocery.db")
        );

        let svc = config.to_service_config(Some("127.0.0.1:9000"), Some(Path::new("/tmp/g.db")));
        assert_eq!(svc.listen, "127.0.0.1:9000");
        assert_eq!(svc.resolve_sqlite_path(), PathBuf::from("/tmp/g.db"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ServerConfig::load(Path::new("/nonexistent/grocer.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(ServerConfig::parse("[server]\nlisten = 5000\n").is_err());
    }
}
