//! HTTP Transport
//!
//! `gloo-net` implementation of the client transport seam.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde_json::Value;

use football_stars::client::{ClientError, ClientResult, Transport};

/// Local storage key overriding the API base URL
pub const API_URL_KEY: &str = "football_api_url";

/// Get the API base URL from local storage. Empty means same-origin.
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_default();

    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Transport rooted at the configured API base
pub struct GlooTransport {
    base: String,
}

impl GlooTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Value> {
        let response = Request::get(&self.url(path))
            .query(query.iter().map(|(k, v)| (*k, v.as_str())))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn post(&self, path: &str, body: Value) -> ClientResult<Value> {
        let response = Request::post(&self.url(path))
            .json(&body)
            .map_err(|e| ClientError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
