//! Hare and Hounds - server binary

#![warn(missing_docs)]

mod cli;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use hare_hounds_server::{GameService, GameStore, MemoryStore, ServerConfig, SqliteStore, router};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            db,
            in_memory,
        } => {
            let mut config = ServerConfig::load(config.as_deref())?;
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(port) = port {
                config = config.with_port(port);
            }
            if let Some(db) = db {
                config = config.with_database_url(db);
            }
            init_tracing(&config);

            if in_memory {
                serve(&config, MemoryStore::new()).await
            } else {
                let store = SqliteStore::new(config.database_url());
                store.run_migrations()?;
                serve(&config, store).await
            }
        }
        Command::Migrate { db } => {
            let mut config = ServerConfig::load(None::<&Path>)?;
            if let Some(db) = db {
                config = config.with_database_url(db);
            }
            init_tracing(&config);

            let applied = SqliteStore::new(config.database_url()).run_migrations()?;
            info!(applied, db = %config.database_url(), "Database is up to date");
            Ok(())
        }
    }
}

/// Installs the global subscriber; `RUST_LOG` wins over the configured filter.
fn init_tracing(config: &ServerConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();
}

/// Run the HTTP game server
#[instrument(skip_all, fields(addr = %config.bind_address()))]
async fn serve<S: GameStore + 'static>(config: &ServerConfig, store: S) -> Result<()> {
    let app = router(GameService::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(
        "Server ready at http://{}/hareandhounds/api",
        config.bind_address()
    );

    axum::serve(listener, app).await?;
    Ok(())
}
