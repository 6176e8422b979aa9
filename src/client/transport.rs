//! HTTP transport seam
//!
//! The view controller only needs "GET with query" and "POST JSON", both
//! answering with a parsed JSON body. The browser shell implements this on
//! top of `gloo-net`; native callers use [`HttpTransport`].

use async_trait::async_trait;
use serde_json::Value;

use super::error::ClientResult;

/// Minimal JSON-over-HTTP transport.
///
/// Non-2xx replies are not errors at this level: the backend reports
/// failures as `{ok: false, error}` bodies and those are handled by
/// [`GameClient`](super::api::GameClient).
#[async_trait(?Send)]
pub trait Transport {
    /// `GET path?query`
    async fn get(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Value>;

    /// `POST path` with a JSON body
    async fn post(&self, path: &str, body: Value) -> ClientResult<Value>;
}

#[cfg(feature = "native")]
pub use native::HttpTransport;

#[cfg(feature = "native")]
mod native {
    use super::*;
    use crate::client::error::ClientError;
    use reqwest::Client;

    /// `reqwest`-backed transport used by the CLI
    pub struct HttpTransport {
        client: Client,
        base_url: String,
    }

    impl HttpTransport {
        /// Create a transport rooted at `base_url` (e.g. `http://localhost:5000`)
        pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
            let client = Client::builder()
                .build()
                .map_err(|e| ClientError::Transport(e.to_string()))?;

            Ok(Self {
                client,
                base_url: base_url.into().trim_end_matches('/').to_string(),
            })
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }
    }

    #[async_trait(?Send)]
    impl Transport for HttpTransport {
        async fn get(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Value> {
            let response = self
                .client
                .get(self.url(path))
                .query(query)
                .send()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;

            tracing::debug!(path, status = %response.status(), "GET");

            response
                .json::<Value>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()))
        }

        async fn post(&self, path: &str, body: Value) -> ClientResult<Value> {
            let response = self
                .client
                .post(self.url(path))
                .json(&body)
                .send()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;

            tracing::debug!(path, status = %response.status(), "POST");

            response
                .json::<Value>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_base_url_is_normalized() {
            let transport = HttpTransport::new("http://localhost:5000/").unwrap();
            assert_eq!(transport.base_url(), "http://localhost:5000");
            assert_eq!(transport.url("/market"), "http://localhost:5000/market");
        }
    }
}
