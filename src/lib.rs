//! # Football Stars
//!
//! Football card game played inside a Telegram Mini App: collect player
//! cards from packs, build a team, play matches against random opponents,
//! trade on a transfer market and buy coins through Telegram Payments.
//!
//! ## Modules
//!
//! - [`model`]: Entities shared by the backend and the client
//! - [`client`]: View controller, typed API client and HTML rendering
//! - [`api`]: REST API server with Axum
//! - [`game`]: Economy and match rules
//! - [`store`]: SQLite persistence
//! - [`catalog`]: Player and club catalogs
//! - [`config`]: TOML configuration with environment overrides
//!
//! Only [`model`] and [`client`] are available without the `native`
//! feature; the browser shell builds against those.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use football_stars::api::{serve, AppState};
//! use football_stars::catalog::Catalog;
//! use football_stars::config::Config;
//! use football_stars::game::GameService;
//! use football_stars::store::GameStore;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let store = GameStore::open(Path::new(&config.storage.db_path), config.game.starting_coins)?;
//!     let catalog = Catalog::load(&config.game)?;
//!     let game = GameService::new(store, catalog, config.game.clone(), config.payments.clone());
//!
//!     serve(AppState::new(Arc::new(game), config.server.clone()), &config.server).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod model;

#[cfg(feature = "native")]
pub mod api;
#[cfg(feature = "native")]
pub mod catalog;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod game;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod store;

// Re-export top-level types for convenience
pub use model::{
    CardFace, Club, Invoice, LeaderboardEntry, MarketListing, MatchResult, PlayerCard, Profile,
    Rarity,
};

pub use client::{ClientError, GameClient, ViewController};

#[cfg(feature = "native")]
pub use api::{build_router, serve, ApiError, AppState};

#[cfg(feature = "native")]
pub use config::Config;

#[cfg(feature = "native")]
pub use game::{GameError, GameService};
