//! Payment Routes
//!
//! - POST /buy_coins - Telegram invoice for a coin pack
//! - POST /add_coins - Credit coins after the payment sheet reports success

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::api::dto::{CoinsRequest, InvoiceBody, MessageBody, Reply};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// POST /buy_coins
pub async fn buy_coins(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CoinsRequest>, JsonRejection>,
) -> ApiResult<Json<Reply<InvoiceBody>>> {
    let Json(req) = payload?;
    let invoice = state.game.invoice(req.user_id, req.amount)?;
    Ok(Reply::json(InvoiceBody { invoice }))
}

/// POST /add_coins
pub async fn add_coins(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CoinsRequest>, JsonRejection>,
) -> ApiResult<Json<Reply<MessageBody>>> {
    let Json(req) = payload?;
    state.game.add_coins(req.user_id, req.amount)?;

    Ok(Reply::json(MessageBody {
        message: format!("+{} coins added", req.amount),
    }))
}
