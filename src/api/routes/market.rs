//! Transfer Market Routes
//!
//! - GET /market - Open listings
//! - POST /sell_player - List an owned card
//! - POST /buy_player - Buy a listing

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::api::dto::{BuyRequest, MarketBody, MessageBody, Reply, SellBody, SellRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /market
pub async fn list_market(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Reply<MarketBody>>> {
    let market = state.game.market()?;
    Ok(Reply::json(MarketBody { market }))
}

/// POST /sell_player
pub async fn sell_player(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SellRequest>, JsonRejection>,
) -> ApiResult<Json<Reply<SellBody>>> {
    let Json(req) = payload?;
    let market_id = state.game.sell(req.user_id, req.player_id, req.price)?;

    Ok(Reply::json(SellBody {
        message: format!("Player listed for {} coins", req.price.floor() as i64),
        market_id,
    }))
}

/// POST /buy_player
pub async fn buy_player(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BuyRequest>, JsonRejection>,
) -> ApiResult<Json<Reply<MessageBody>>> {
    let Json(req) = payload?;
    state.game.buy(req.user_id, req.market_id)?;

    Ok(Reply::json(MessageBody {
        message: "Player bought".to_string(),
    }))
}
