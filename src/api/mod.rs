//! Football Stars HTTP API
//!
//! JSON backend for the Mini App, built with Axum.
//!
//! # Endpoints
//!
//! ## Player
//! - `GET /profile?user_id=` - Coins, cards count, team power, rating
//! - `GET /my_players?user_id=` - Owned cards that are not on the market
//! - `POST /daily` - Daily coin bonus
//! - `POST /open_pack` - Buy a pack for one random card
//! - `POST /match` - Play a match
//!
//! ## Market
//! - `GET /market` - Open listings
//! - `POST /sell_player` - List a card
//! - `POST /buy_player` - Buy a listing
//!
//! ## Payments
//! - `POST /buy_coins` - Telegram invoice
//! - `POST /add_coins` - Credit purchased coins
//!
//! ## Catalog
//! - `GET /leaderboard` - Top users
//! - `GET /clubs` - Club catalog
//!
//! ## Bot
//! - `GET /` - "Bot is running"
//! - `POST /webhook` - Telegram updates
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! Static files (the built UI, `images/players/*`) are served under `/web`.

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let web_dir = state.config.web_dir.clone();
    let cors = cors_layer(&state.config.cors_origins);

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        // Player routes
        .route("/profile", get(routes::profile::get_profile))
        .route("/my_players", get(routes::cards::my_players))
        .route("/daily", post(routes::rewards::claim_daily))
        .route("/open_pack", post(routes::cards::open_pack))
        .route("/match", post(routes::rewards::play_match))
        // Market routes
        .route("/market", get(routes::market::list_market))
        .route("/sell_player", post(routes::market::sell_player))
        .route("/buy_player", post(routes::market::buy_player))
        // Payment routes
        .route("/buy_coins", post(routes::payments::buy_coins))
        .route("/add_coins", post(routes::payments::add_coins))
        // Catalog routes
        .route("/leaderboard", get(routes::profile::get_leaderboard))
        .route("/clubs", get(routes::cards::clubs))
        // Bot routes
        .route("/", get(routes::bot::home))
        .route("/webhook", post(routes::bot::webhook))
        .nest("/health", health_routes)
        .nest_service("/web", ServeDir::new(web_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Any origin when none are configured, otherwise exactly the listed ones
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Start the API server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Football Stars API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Football Stars API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::{GameConfig, PaymentsConfig};
    use crate::game::GameService;
    use crate::store::GameStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn create_test_app_with(payments: PaymentsConfig) -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images").join("ball.txt"), "ball").unwrap();

        let store = GameStore::open(&dir.path().join("game.db"), 1000).unwrap();
        let catalog = Catalog::bundled().unwrap();
        let game = GameService::with_seed(store, catalog, GameConfig::default(), payments, 3);

        let config = ServerConfig {
            web_dir: dir.path().to_string_lossy().to_string(),
            ..ServerConfig::default()
        };

        (build_router(AppState::new(Arc::new(game), config)), dir)
    }

    fn create_test_app() -> (Router, tempfile::TempDir) {
        create_test_app_with(PaymentsConfig::default())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _dir) = create_test_app();

        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_home_text() {
        let (app, _dir) = create_test_app();
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Bot is running");
    }

    #[tokio::test]
    async fn test_static_files() {
        let (app, _dir) = create_test_app();
        let response = app.oneshot(get("/web/images/ball.txt")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_new_profile() {
        let (app, _dir) = create_test_app();
        let (status, body) = call(&app, get("/profile?user_id=77")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["profile"]["coins"], 1000);
        assert_eq!(body["profile"]["cards_count"], 0);
        assert_eq!(body["profile"]["last_daily"], 0);
    }

    #[tokio::test]
    async fn test_missing_user_id_is_rejected() {
        let (app, _dir) = create_test_app();
        let (status, body) = call(&app, get("/profile")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (app, _dir) = create_test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/open_pack")
            .header("Content-Type", "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let (status, body) = call(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn test_pack_then_market_round() {
        let (app, _dir) = create_test_app();

        let (status, body) = call(&app, post("/open_pack", json!({"user_id": 1}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        let player_id = body["player"]["id"].as_i64().unwrap();

        let (_, body) = call(&app, get("/my_players?user_id=1")).await;
        assert_eq!(body["players"].as_array().unwrap().len(), 1);

        let (status, body) = call(
            &app,
            post("/sell_player", json!({"user_id": 1, "player_id": player_id, "price": 99})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Minimum price is 100");

        let (status, body) = call(
            &app,
            post("/sell_player", json!({"user_id": 1, "player_id": player_id, "price": 450.5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let market_id = body["market_id"].as_i64().unwrap();

        let (_, body) = call(&app, get("/market")).await;
        assert_eq!(body["market"][0]["id"], market_id);
        assert_eq!(body["market"][0]["price"], 450);

        let (status, body) = call(
            &app,
            post("/buy_player", json!({"user_id": 1, "market_id": market_id})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "OWN_LISTING");

        let (status, body) = call(
            &app,
            post("/buy_player", json!({"user_id": 2, "market_id": market_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Player bought");

        let (_, body) = call(&app, get("/profile?user_id=1")).await;
        assert_eq!(body["profile"]["coins"], 700 + 450);
        let (_, body) = call(&app, get("/profile?user_id=2")).await;
        assert_eq!(body["profile"]["coins"], 1000 - 450);
        assert_eq!(body["profile"]["cards_count"], 1);
    }

    #[tokio::test]
    async fn test_match_without_players() {
        let (app, _dir) = create_test_app();
        let (status, body) = call(&app, post("/match", json!({"user_id": 5}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "No players");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_daily_twice() {
        let (app, _dir) = create_test_app();

        let (status, body) = call(&app, post("/daily", json!({"user_id": 3}))).await;
        assert_eq!(status, StatusCode::OK);
        let reward = body["reward"].as_i64().unwrap();
        assert!((200..=500).contains(&reward));

        let (status, body) = call(&app, post("/daily", json!({"user_id": 3}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Already claimed today");
    }

    #[tokio::test]
    async fn test_buy_coins_needs_provider_token() {
        let (app, _dir) = create_test_app();
        let (status, body) = call(&app, post("/buy_coins", json!({"user_id": 1, "amount": 100}))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "PAYMENTS_DISABLED");

        let (app, _dir) = create_test_app_with(PaymentsConfig {
            provider_token: Some("123:TEST".to_string()),
            ..PaymentsConfig::default()
        });
        let (status, body) = call(&app, post("/buy_coins", json!({"user_id": 1, "amount": 100}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["invoice"]["prices"][0]["amount"], 1000);
        assert_eq!(body["invoice"]["currency"], "USD");
    }

    #[tokio::test]
    async fn test_add_coins_and_leaderboard() {
        let (app, _dir) = create_test_app();
        let (status, _) = call(&app, post("/add_coins", json!({"user_id": 8, "amount": 500}))).await;
        assert_eq!(status, StatusCode::OK);
        call(&app, get("/profile?user_id=9")).await;

        let (_, body) = call(&app, get("/leaderboard")).await;
        assert_eq!(body["leaders"][0]["user_id"], 8);
        assert_eq!(body["leaders"][0]["coins"], 1500);
        assert_eq!(body["leaders"][1]["user_id"], 9);
    }

    #[tokio::test]
    async fn test_clubs() {
        let (app, _dir) = create_test_app();
        let (status, body) = call(&app, get("/clubs")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["clubs"].as_array().unwrap().is_empty());
    }
}
