//! Football Stars API Server
//!
//! Run with: cargo run --bin football-stars
//!
//! # Configuration
//!
//! A TOML file passed with `--config`, or the first of
//! `~/.config/football-stars/config.toml`, `/etc/football-stars/config.toml`
//! and `./config.toml`. Environment variables override the file:
//! - `FOOTBALL_HOST`, `FOOTBALL_PORT`: Bind address (default: 0.0.0.0:5000)
//! - `FOOTBALL_DB_PATH`: SQLite database file
//! - `FOOTBALL_WEB_DIR`: Directory served under /web
//! - `FOOTBALL_PROVIDER_TOKEN`: Telegram Payments provider token
//! - `FOOTBALL_LOG_LEVEL`, `FOOTBALL_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter override

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use football_stars::api::{serve, AppState};
use football_stars::catalog::Catalog;
use football_stars::config::{generate_default_config, Config};
use football_stars::game::GameService;
use football_stars::logging::init_logging;
use football_stars::store::GameStore;

#[derive(Parser)]
#[command(name = "football-stars")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Football Stars game backend for the Telegram Mini App")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a commented default config and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_logging(&config.logging);

    tracing::info!("Starting Football Stars server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {}", config.storage.db_path);
    tracing::info!("Web directory: {}", config.server.web_dir);

    if config.payments.provider_token.is_none() {
        tracing::warn!("No payment provider token configured, coin purchases are disabled");
    }

    let store = GameStore::open(Path::new(&config.storage.db_path), config.game.starting_coins)
        .with_context(|| format!("opening database {}", config.storage.db_path))?;
    let catalog = Catalog::load(&config.game).context("loading catalogs")?;

    let game = GameService::new(store, catalog, config.game.clone(), config.payments.clone());
    let state = AppState::new(Arc::new(game), config.server.clone());

    serve(state, &config.server).await?;

    tracing::info!("Football Stars server stopped");
    Ok(())
}
