//! Profile Routes
//!
//! - GET /profile?user_id= - Stat bar of one user
//! - GET /leaderboard - Top users by rating

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;

use crate::api::dto::{LeadersBody, ProfileBody, Reply, UserQuery};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /profile
///
/// Unknown users are created with the starting balance.
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<Reply<ProfileBody>>> {
    let Query(q) = query?;
    let profile = state.game.profile(q.user_id)?;
    Ok(Reply::json(ProfileBody { profile }))
}

/// GET /leaderboard
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Reply<LeadersBody>>> {
    let leaders = state.game.leaderboard()?;
    Ok(Reply::json(LeadersBody { leaders }))
}
