//! Game Entities
//!
//! Shapes shared by the backend (which produces them) and the view
//! controller (which only renders them). Everything here is plain serde data
//! so it compiles for the browser as well.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Guest identity used when the host platform does not provide one.
pub const GUEST_USER_ID: i64 = 1;

/// Lowest price a card may be listed for.
pub const MIN_SELL_PRICE: f64 = 100.0;

/// Seconds between two daily bonus claims.
pub const DAILY_PERIOD_SECS: i64 = 86_400;

/// Rarity tier of a card. Drives the card's CSS class.
///
/// Unknown or missing labels decode as [`Rarity::Common`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

impl From<Option<String>> for Rarity {
    fn from(label: Option<String>) -> Self {
        match label.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("rare") => Rarity::Rare,
            Some("epic") => Rarity::Epic,
            Some("legendary") => Rarity::Legendary,
            _ => Rarity::Common,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The printed face of a card: who it is and how strong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub rarity: Rarity,
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    #[serde(default)]
    pub image: String,
}

impl CardFace {
    /// Sum of the three attributes
    pub fn power(&self) -> i64 {
        self.attack + self.defense + self.speed
    }
}

/// A card owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCard {
    pub id: i64,
    #[serde(flatten)]
    pub face: CardFace,
}

/// A card put up for sale. `id` is the listing id used to buy it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketListing {
    pub id: i64,
    #[serde(default)]
    pub player_id: i64,
    #[serde(default)]
    pub seller_id: i64,
    pub price: i64,
    #[serde(flatten)]
    pub face: CardFace,
}

/// Per-user summary shown in the stat bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub user_id: i64,
    pub coins: i64,
    pub cards_count: i64,
    pub team_power: i64,
    pub rating: i64,
    #[serde(default)]
    pub wins: i64,
    #[serde(default)]
    pub losses: i64,
    /// Unix seconds of the last daily claim, 0 if never claimed
    #[serde(default)]
    pub last_daily: i64,
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub rating: i64,
    pub wins: i64,
    pub losses: i64,
    pub coins: i64,
}

/// Outcome of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Lose,
}

/// A real club from the static catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub league: String,
}

/// Telegram Payments invoice. The client forwards it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub chat_id: i64,
    pub provider_token: String,
    pub start_parameter: String,
    pub title: String,
    pub description: String,
    pub currency: String,
    pub prices: Vec<InvoicePrice>,
}

/// Labelled price in the smallest currency unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePrice {
    pub label: String,
    pub amount: i64,
}
