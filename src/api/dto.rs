//! Data Transfer Objects
//!
//! Request and response types for the API endpoints. Every successful reply
//! is wrapped in [`Reply`], which adds the `ok: true` flag the client checks.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::model::{
    Club, Invoice, LeaderboardEntry, MarketListing, MatchResult, PlayerCard, Profile,
};

/// `{ok: true, ...body}`
#[derive(Debug, Serialize)]
pub struct Reply<T> {
    pub ok: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Reply<T> {
    pub fn json(body: T) -> Json<Self> {
        Json(Self { ok: true, body })
    }
}

// ============================================
// REQUEST DTOs
// ============================================

/// `?user_id=` on read endpoints
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: i64,
}

/// Body of actions that only need the caller
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SellRequest {
    pub user_id: i64,
    pub player_id: i64,
    /// Fractional prices are accepted and floored
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct BuyRequest {
    pub user_id: i64,
    pub market_id: i64,
}

/// Coin purchase and credit
#[derive(Debug, Deserialize)]
pub struct CoinsRequest {
    pub user_id: i64,
    pub amount: i64,
}

// ============================================
// RESPONSE DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
pub struct PlayersBody {
    pub players: Vec<PlayerCard>,
}

#[derive(Debug, Serialize)]
pub struct MarketBody {
    pub market: Vec<MarketListing>,
}

#[derive(Debug, Serialize)]
pub struct LeadersBody {
    pub leaders: Vec<LeaderboardEntry>,
}

#[derive(Debug, Serialize)]
pub struct ClubsBody {
    pub clubs: Vec<Club>,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DailyBody {
    pub message: String,
    pub reward: i64,
}

#[derive(Debug, Serialize)]
pub struct PackBody {
    pub player: PlayerCard,
}

#[derive(Debug, Serialize)]
pub struct MatchBody {
    pub result: MatchResult,
    pub your: i64,
    pub enemy: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SellBody {
    pub message: String,
    pub market_id: i64,
}

#[derive(Debug, Serialize)]
pub struct InvoiceBody {
    pub invoice: Invoice,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy" or "unhealthy"
    pub status: String,
    /// Database status: "ok" or "error"
    pub database: String,
    /// Whether coin purchases are configured
    pub payments: bool,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_flattens_body() {
        let Json(reply) = Reply::json(SellBody {
            message: "listed".to_string(),
            market_id: 3,
        });
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value, serde_json::json!({"ok": true, "message": "listed", "market_id": 3}));
    }

    #[test]
    fn test_lost_match_has_no_reward_field() {
        let value = serde_json::to_value(MatchBody {
            result: MatchResult::Lose,
            your: 100,
            enemy: 200,
            reward: None,
        })
        .unwrap();
        assert!(value.get("reward").is_none());
        assert_eq!(value["result"], "lose");
    }
}
