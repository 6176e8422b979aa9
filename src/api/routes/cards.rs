//! Card Routes
//!
//! - GET /my_players?user_id= - Cards the user owns and has not listed
//! - POST /open_pack - Buy a pack
//! - GET /clubs - Static club catalog

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;

use crate::api::dto::{ClubsBody, PackBody, PlayersBody, Reply, UserQuery, UserRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /my_players
pub async fn my_players(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<Reply<PlayersBody>>> {
    let Query(q) = query?;
    let players = state.game.owned_cards(q.user_id)?;
    Ok(Reply::json(PlayersBody { players }))
}

/// POST /open_pack
pub async fn open_pack(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> ApiResult<Json<Reply<PackBody>>> {
    let Json(req) = payload?;
    let player = state.game.open_pack(req.user_id)?;
    Ok(Reply::json(PackBody { player }))
}

/// GET /clubs
pub async fn clubs(State(state): State<Arc<AppState>>) -> Json<Reply<ClubsBody>> {
    Reply::json(ClubsBody {
        clubs: state.game.clubs().to_vec(),
    })
}
