//! Fire-and-forget HTTP client for the Discord webhook

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::runtime::Handle;
use tracing::{debug, info};

use super::message::OutboundMessage;

/// Upper bound on a single delivery attempt
pub const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Anything that can take a finished message off the UI thread's hands
pub trait MessageSink: Send + Sync {
    /// Hand over `content` for delivery; must return without blocking
    fn dispatch(&self, content: String);
}

/// Errors from a single delivery attempt
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("webhook responded with status {0}")]
    Status(StatusCode),
}

/// Posts messages to one webhook endpoint
#[derive(Clone)]
pub struct WebhookClient {
    url: Arc<str>,
    http: reqwest::Client,
    runtime: Handle,
    timeout: Duration,
}

impl WebhookClient {
    /// Create a client posting to `url`, spawning its work on `runtime`
    pub fn new(url: impl Into<Arc<str>>, runtime: Handle) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
            runtime,
            timeout: SEND_TIMEOUT,
        }
    }

    /// Override the per-request timeout
    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Make exactly one delivery attempt and report how it went
    pub async fn post(&self, content: &str) -> Result<(), WebhookError> {
        let response = self
            .http
            .post(&*self.url)
            .timeout(self.timeout)
            .json(&OutboundMessage::new(content))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Status(status));
        }

        debug!(%status, "webhook accepted message");
        Ok(())
    }

    /// Spawn a delivery attempt and return immediately
    ///
    /// The outcome is only logged. Nothing waits for the task.
    pub fn send(&self, content: String) {
        let client = self.clone();
        let chars = content.chars().count();
        self.runtime.spawn(async move {
            match client.post(&content).await {
                Ok(()) => info!(chars, "message delivered"),
                Err(e) => debug!(chars, error = %e, "message dropped"),
            }
        });
    }
}

impl MessageSink for WebhookClient {
    fn dispatch(&self, content: String) {
        self.send(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio_test::{assert_err, assert_ok};

    /// Captured request: head (request line and headers) and body
    type Captured = (String, String);

    /// Accept one connection, capture the request and reply with `status_line`
    async fn one_shot_server(status_line: &'static str) -> (String, oneshot::Receiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/webhooks/1/token", listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];

            let head_end = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
            let length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);

            while buf.len() < head_end + length {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let body = String::from_utf8_lossy(&buf[head_end..]).to_string();

            let response = format!("{status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();

            let _ = tx.send((head, body));
        });

        (url, rx)
    }

    #[tokio::test]
    async fn test_post_sends_json_content() {
        let (url, captured) = one_shot_server("HTTP/1.1 204 No Content").await;
        let client = WebhookClient::new(url, Handle::current());

        assert_ok!(client.post("hello from the overlay").await);

        let (head, body) = captured.await.unwrap();
        assert!(head.starts_with("POST /api/webhooks/1/token"));
        assert!(head.to_ascii_lowercase().contains("content-type: application/json"));
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "content": "hello from the overlay" }));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let (url, _captured) = one_shot_server("HTTP/1.1 500 Internal Server Error").await;
        let client = WebhookClient::new(url, Handle::current());

        let err = client.post("boom").await.unwrap_err();
        assert!(matches!(err, WebhookError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let client = WebhookClient::new(url, Handle::current());
        assert_err!(client.post("nobody home").await);
    }

    #[tokio::test]
    async fn test_unresponsive_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        let _hold = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(stream);
        });

        let client =
            WebhookClient::new(url, Handle::current()).with_timeout(Duration::from_millis(200));
        let started = std::time::Instant::now();
        assert_err!(client.post("slow").await);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_send_delivers_in_background() {
        let (url, captured) = one_shot_server("HTTP/1.1 200 OK").await;
        let client = WebhookClient::new(url, Handle::current());

        client.send("queued".to_string());

        let (_, body) = tokio::time::timeout(Duration::from_secs(5), captured)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(body, r#"{"content":"queued"}"#);
    }

    #[tokio::test]
    async fn test_send_swallows_failures() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let client = WebhookClient::new(url, Handle::current());
        client.dispatch("lost".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
