//! Bot Routes
//!
//! - GET / - Liveness text for the bot host
//! - POST /webhook - Telegram updates; logged and acknowledged

use axum::body::Bytes;

/// GET /
pub async fn home() -> &'static str {
    "Bot is running"
}

/// POST /webhook
pub async fn webhook(body: Bytes) -> &'static str {
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(update) => {
            let update_id = update.get("update_id").and_then(|v| v.as_i64());
            tracing::info!(update_id, update = %update, "Telegram update received");
        }
        Err(e) => tracing::warn!(error = %e, "Unreadable webhook payload"),
    }
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_webhook_always_acknowledges() {
        assert_eq!(webhook(Bytes::from_static(br#"{"update_id": 1}"#)).await, "ok");
        assert_eq!(webhook(Bytes::from_static(b"garbage")).await, "ok");
    }
}
