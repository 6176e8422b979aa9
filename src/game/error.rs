//! Game rule violations
//!
//! The `Display` text of each variant is what the player sees in the toast.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Not enough coins")]
    NotEnoughCoins,

    #[error("No players")]
    NoPlayers,

    /// Daily bonus still cooling down
    #[error("Already claimed today")]
    AlreadyClaimed { remaining: i64 },

    #[error("Player not found")]
    PlayerNotFound,

    #[error("Listing not found")]
    ListingNotFound,

    #[error("Player is already on the market")]
    AlreadyListed,

    #[error("You cannot buy your own player")]
    OwnListing,

    #[error("Minimum price is {min}")]
    InvalidPrice { min: i64 },

    #[error("Amount must be between 1 and {max}")]
    InvalidAmount { max: i64 },

    #[error("Coin purchases are not configured")]
    PaymentsDisabled,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GameError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            GameError::NotEnoughCoins => "NOT_ENOUGH_COINS",
            GameError::NoPlayers => "NO_PLAYERS",
            GameError::AlreadyClaimed { .. } => "ALREADY_CLAIMED",
            GameError::PlayerNotFound => "PLAYER_NOT_FOUND",
            GameError::ListingNotFound => "LISTING_NOT_FOUND",
            GameError::AlreadyListed => "ALREADY_LISTED",
            GameError::OwnListing => "OWN_LISTING",
            GameError::InvalidPrice { .. } => "INVALID_PRICE",
            GameError::InvalidAmount { .. } => "INVALID_AMOUNT",
            GameError::PaymentsDisabled => "PAYMENTS_DISABLED",
            GameError::Store(_) => "STORAGE_ERROR",
        }
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
