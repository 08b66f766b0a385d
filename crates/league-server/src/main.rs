//! Chess league server.
//!
//! Serves the league HTTP API from a SQLite database:
//! - public leaderboard, standings and pairings
//! - player, pairing and result administration

use anyhow::Context;
use clap::Parser;
use league_core::League;
use league_server::config::ServerConfig;
use league_server::repo::SqliteStore;
use league_server::{app, db, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "league-server")]
#[command(about = "Serves the chess league HTTP API")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value_os_t = ServerConfig::default_path())]
    config: PathBuf,

    /// Port to listen on, overriding the config file
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database path, overriding the config file
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = ServerConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database) = args.database {
        config.database = database;
    }

    if let Some(dir) = config.database.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
    }
    let pool = db::init_db(&config.database)
        .with_context(|| format!("opening database {}", config.database.display()))?;
    tracing::info!("Database: {:?}", config.database);

    let league = League::new(SqliteStore::new(pool), config.rules.clone(), config.league.clone());
    let state = AppState::new(league);
    let router = app(state, Duration::from_millis(config.slow_request_ms));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
