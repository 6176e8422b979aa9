//! Reward Routes
//!
//! - POST /daily - Daily coin bonus
//! - POST /match - Play against a random opponent

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::api::dto::{DailyBody, MatchBody, Reply, UserRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /daily
pub async fn claim_daily(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> ApiResult<Json<Reply<DailyBody>>> {
    let Json(req) = payload?;
    let bonus = state.game.claim_daily(req.user_id)?;

    Ok(Reply::json(DailyBody {
        message: format!("+{} coins 💰", bonus.reward),
        reward: bonus.reward,
    }))
}

/// POST /match
pub async fn play_match(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> ApiResult<Json<Reply<MatchBody>>> {
    let Json(req) = payload?;
    let outcome = state.game.play_match(req.user_id)?;

    Ok(Reply::json(MatchBody {
        result: outcome.result,
        your: outcome.your,
        enemy: outcome.enemy,
        reward: outcome.reward,
    }))
}
