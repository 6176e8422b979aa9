//! Typed Game API Client
//!
//! One method per backend endpoint. Replies without `ok: true` become
//! [`ClientError::Rejected`] carrying the backend's error text.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::{ClientError, ClientResult};
use super::transport::Transport;
use crate::model::{Club, LeaderboardEntry, MarketListing, MatchResult, PlayerCard, Profile};

// ============ Response Types ============

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileBody {
    profile: Profile,
}

#[derive(Debug, Deserialize)]
struct PlayersBody {
    #[serde(default)]
    players: Vec<PlayerCard>,
}

#[derive(Debug, Deserialize)]
struct MarketBody {
    #[serde(default)]
    market: Vec<MarketListing>,
}

#[derive(Debug, Deserialize)]
struct LeadersBody {
    #[serde(default)]
    leaders: Vec<LeaderboardEntry>,
}

#[derive(Debug, Deserialize)]
struct PackBody {
    player: PlayerCard,
}

#[derive(Debug, Deserialize)]
struct InvoiceBody {
    invoice: Value,
}

#[derive(Debug, Deserialize)]
struct ClubsBody {
    #[serde(default)]
    clubs: Vec<Club>,
}

/// Confirmation text of a write action
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

/// Reply of `/match`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchReport {
    pub result: MatchResult,
    pub your: i64,
    pub enemy: i64,
    #[serde(default)]
    pub reward: Option<i64>,
}

// ============ Client ============

/// Game API bound to a transport
pub struct GameClient<T> {
    transport: T,
}

impl<T: Transport> GameClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Require `ok: true`, then decode the rest of the body
    fn accept<R: DeserializeOwned>(value: Value) -> ClientResult<R> {
        let status: Status = serde_json::from_value(value.clone())?;
        if status.ok != Some(true) {
            return Err(ClientError::rejected(status.error));
        }
        Ok(serde_json::from_value(value)?)
    }

    async fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<R> {
        Self::accept(self.transport.get(path, query).await?)
    }

    async fn post<R: DeserializeOwned>(&self, path: &str, body: Value) -> ClientResult<R> {
        Self::accept(self.transport.post(path, body).await?)
    }

    /// GET /profile
    pub async fn profile(&self, user_id: i64) -> ClientResult<Profile> {
        let body: ProfileBody = self
            .get("/profile", &[("user_id", user_id.to_string())])
            .await?;
        Ok(body.profile)
    }

    /// GET /my_players
    pub async fn my_players(&self, user_id: i64) -> ClientResult<Vec<PlayerCard>> {
        let body: PlayersBody = self
            .get("/my_players", &[("user_id", user_id.to_string())])
            .await?;
        Ok(body.players)
    }

    /// GET /market
    pub async fn market(&self) -> ClientResult<Vec<MarketListing>> {
        let body: MarketBody = self.get("/market", &[]).await?;
        Ok(body.market)
    }

    /// GET /leaderboard
    pub async fn leaderboard(&self) -> ClientResult<Vec<LeaderboardEntry>> {
        let body: LeadersBody = self.get("/leaderboard", &[]).await?;
        Ok(body.leaders)
    }

    /// GET /clubs
    pub async fn clubs(&self) -> ClientResult<Vec<Club>> {
        let body: ClubsBody = self.get("/clubs", &[]).await?;
        Ok(body.clubs)
    }

    /// POST /daily
    ///
    /// Older backends answer with a bare `{message}` or `{error}`, so this one
    /// succeeds whenever no error is present and `ok` is not `false`.
    pub async fn claim_daily(&self, user_id: i64) -> ClientResult<Ack> {
        let value = self
            .transport
            .post("/daily", json!({ "user_id": user_id }))
            .await?;

        let status: Status = serde_json::from_value(value.clone())?;
        if status.ok == Some(false) || status.error.is_some() {
            return Err(ClientError::rejected(status.error));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// POST /open_pack, returns the card that was drawn
    pub async fn open_pack(&self, user_id: i64) -> ClientResult<PlayerCard> {
        let body: PackBody = self
            .post("/open_pack", json!({ "user_id": user_id }))
            .await?;
        Ok(body.player)
    }

    /// POST /match
    pub async fn play_match(&self, user_id: i64) -> ClientResult<MatchReport> {
        self.post("/match", json!({ "user_id": user_id })).await
    }

    /// POST /sell_player
    pub async fn sell_player(&self, user_id: i64, player_id: i64, price: f64) -> ClientResult<Ack> {
        self.post(
            "/sell_player",
            json!({ "user_id": user_id, "player_id": player_id, "price": price }),
        )
        .await
    }

    /// POST /buy_player
    pub async fn buy_player(&self, user_id: i64, market_id: i64) -> ClientResult<Ack> {
        self.post(
            "/buy_player",
            json!({ "user_id": user_id, "market_id": market_id }),
        )
        .await
    }

    /// POST /buy_coins, returns the opaque invoice
    pub async fn buy_coins(&self, user_id: i64, amount: i64) -> ClientResult<Value> {
        let body: InvoiceBody = self
            .post("/buy_coins", json!({ "user_id": user_id, "amount": amount }))
            .await?;
        Ok(body.invoice)
    }

    /// POST /add_coins. The reply is not inspected.
    pub async fn add_coins(&self, user_id: i64, amount: i64) -> ClientResult<()> {
        self.transport
            .post("/add_coins", json!({ "user_id": user_id, "amount": amount }))
            .await
            .map(|_| ())
    }
}
