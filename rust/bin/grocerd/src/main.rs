//! `grocerd`: the grocery list server.
//!
//! Usage:
//!   grocerd [-c <name-or-path>] [--listen <addr>] [--db <path>]
//!
//! A bare config name resolves to `/etc/grocer/<name>.toml`. Without a
//! config file the server listens on 127.0.0.1:5000 and keeps its database
//! in `./grocery.db`.

mod bootstrap;
mod config;
mod routes;

use std::path::PathBuf;

use clap::Parser;
use grocer_core::Module;
use tracing::info;

use config::ServerConfig;

/// Grocery list server.
#[derive(Parser, Debug)]
#[command(name = "grocerd", about = "Grocery list server")]
struct Cli {
    /// Config name or path to a TOML file.
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Listen address (overrides the config file, default 127.0.0.1:5000).
    #[arg(long = "listen")]
    listen: Option<String>,

    /// SQLite database file (overrides the config file).
    #[arg(long = "db")]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let server_config = match &cli.config {
        Some(name) => {
            let path = ServerConfig::resolve_path(name);
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(&path)?
        }
        None => ServerConfig::default(),
    };
    let service_config = server_config.to_service_config(cli.listen.as_deref(), cli.db.as_deref());

    bootstrap::verify_config(&service_config)?;

    // Storage and module.
    let sql = bootstrap::init_storage(&service_config)?;
    let grocery = bootstrap::init_module(sql)?;
    info!("Grocery module initialized");

    let app = routes::build_router(vec![(grocery.name(), grocery.routes())]);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&service_config.listen).await?;
    info!("grocerd listening on {}", service_config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
