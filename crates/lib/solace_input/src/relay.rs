//! Client side of `POST /api/chat`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{InputConfig, InputError};

/// Sends one draft to the relay.
///
/// `Ok(None)` means the relay answered but without a usable `reply`.
#[async_trait]
pub trait ChatRelay: Send + Sync {
    async fn send(&self, message: &str) -> Result<Option<String>, InputError>;
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct RelayResponse {
    #[serde(default)]
    reply: Option<String>,
}

/// [`ChatRelay`] over HTTP. Only the draft is sent; no history.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    client: Client,
    chat_url: Url,
}

impl HttpRelay {
    pub fn new(config: &InputConfig) -> Result<Self, InputError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| InputError::Config(format!("HTTP client build failed: {e}")))?;
        Ok(Self {
            client,
            chat_url: config.chat_url()?,
        })
    }
}

#[async_trait]
impl ChatRelay for HttpRelay {
    async fn send(&self, message: &str) -> Result<Option<String>, InputError> {
        let resp = self
            .client
            .post(self.chat_url.as_str())
            .json(&RelayRequest { message })
            .send()
            .await
            .map_err(|e| InputError::Transport(e.to_string()))?;

        // Error statuses still carry a JSON body; it simply lacks `reply`.
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| InputError::Transport(e.to_string()))?;
        let data: RelayResponse =
            serde_json::from_slice(&bytes).map_err(|e| InputError::Decode(e.to_string()))?;

        Ok(data.reply.filter(|r| !r.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use serde_json::{Value, json};

    use super::*;

    async fn relay_for(app: Router) -> HttpRelay {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        HttpRelay::new(&InputConfig::new(&format!("http://{addr}")).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn posts_message_only_and_reads_reply() {
        let app = Router::new().route(
            "/api/chat",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({"message": "Hello"}));
                Json(json!({"reply": "Hi there"}))
            }),
        );
        let relay = relay_for(app).await;
        assert_eq!(relay.send("Hello").await.unwrap().as_deref(), Some("Hi there"));
    }

    #[tokio::test]
    async fn error_body_has_no_reply() {
        let app = Router::new().route(
            "/api/chat",
            post(|| async {
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({"error": "Upstream API error"})),
                )
            }),
        );
        let relay = relay_for(app).await;
        assert_eq!(relay.send("Hello").await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_reply_counts_as_missing() {
        let app = Router::new().route("/api/chat", post(|| async { Json(json!({"reply": ""})) }));
        let relay = relay_for(app).await;
        assert_eq!(relay.send("Hello").await.unwrap(), None);
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() {
        let app = Router::new().route("/api/chat", post(|| async { "<html>proxy error</html>" }));
        let relay = relay_for(app).await;
        assert!(matches!(relay.send("Hello").await, Err(InputError::Decode(_))));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let relay = HttpRelay::new(&InputConfig::new(&format!("http://{addr}")).unwrap()).unwrap();
        assert!(matches!(relay.send("Hello").await, Err(InputError::Transport(_))));
    }
}
