//! Player and club catalogs
//!
//! Packs draw from the player catalog; the club catalog is served as-is.
//! Both are JSON arrays. Bundled copies are compiled in and can be replaced
//! through `[game] players_file` / `clubs_file`.

use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::GameConfig;
use crate::model::{CardFace, Club};

const BUNDLED_PLAYERS: &str = include_str!("../data/players.json");
const BUNDLED_CLUBS: &str = include_str!("../data/clubs.json");

/// Catalog loading errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Invalid catalog {name}: {error}")]
    Parse { name: String, error: String },

    #[error("Player catalog is empty")]
    Empty,
}

/// Everything a pack can contain, plus the clubs list
#[derive(Debug, Clone)]
pub struct Catalog {
    players: Vec<CardFace>,
    clubs: Vec<Club>,
}

impl Catalog {
    /// Build from JSON text
    pub fn from_json(players: &str, clubs: &str) -> Result<Self, CatalogError> {
        let players: Vec<CardFace> =
            serde_json::from_str(players).map_err(|e| CatalogError::Parse {
                name: "players".to_string(),
                error: e.to_string(),
            })?;
        let clubs: Vec<Club> = serde_json::from_str(clubs).map_err(|e| CatalogError::Parse {
            name: "clubs".to_string(),
            error: e.to_string(),
        })?;

        Self::new(players, clubs)
    }

    pub fn new(players: Vec<CardFace>, clubs: Vec<Club>) -> Result<Self, CatalogError> {
        if players.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { players, clubs })
    }

    /// The catalogs compiled into the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_PLAYERS, BUNDLED_CLUBS)
    }

    /// Bundled catalogs, with any configured file taking precedence
    pub fn load(config: &GameConfig) -> Result<Self, CatalogError> {
        let players = match &config.players_file {
            Some(path) => read(Path::new(path))?,
            None => BUNDLED_PLAYERS.to_string(),
        };
        let clubs = match &config.clubs_file {
            Some(path) => read(Path::new(path))?,
            None => BUNDLED_CLUBS.to_string(),
        };

        let catalog = Self::from_json(&players, &clubs)?;
        tracing::info!(
            players = catalog.players.len(),
            clubs = catalog.clubs.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    pub fn players(&self) -> &[CardFace] {
        &self.players
    }

    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    /// Uniformly pick one player. The catalog is never empty.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &CardFace {
        &self.players[rng.gen_range(0..self.players.len())]
    }
}

fn read(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}
