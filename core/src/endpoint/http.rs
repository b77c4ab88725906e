use super::{ChatEndpoint, EndpointError, EndpointInfo};
use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Endpoint that posts `{"message": ...}` to a chat URL and reads `{"response": ...}`
pub struct HttpEndpoint {
    url: Url,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

impl HttpEndpoint {
    pub fn new(config: &ClientConfig) -> Result<Self, EndpointError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| EndpointError::Configuration(e.to_string()))?;

        Ok(Self {
            url: config.endpoint_url.clone(),
            client,
        })
    }
}

#[async_trait]
impl ChatEndpoint for HttpEndpoint {
    async fn send(&self, message: &str) -> Result<String, EndpointError> {
        debug!("POST {} ({} bytes)", self.url, message.len());

        let resp = self
            .client
            .post(self.url.clone())
            .header("Content-Type", "application/json")
            .json(&ChatRequest { message })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            // Body content is irrelevant for a failed status
            let text = resp.text().await.unwrap_or_default();
            debug!("Chat endpoint returned {}: {}", status, text);
            return Err(EndpointError::Status(status.as_u16()));
        }

        let body: Value = resp.json().await?;
        body.get("response")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(EndpointError::MissingResponse)
    }

    fn info(&self) -> EndpointInfo {
        EndpointInfo {
            name: "HTTP".to_string(),
            target: self.url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn endpoint_for(server: &MockServer, timeout: Option<Duration>) -> HttpEndpoint {
        let config = ClientConfig::new(&format!("{}/chat", server.uri()))
            .unwrap()
            .with_timeout(timeout);
        HttpEndpoint::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_posts_message_and_reads_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "message": "hi" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "hello" })))
            .expect(1)
            .mount(&server)
            .await;

        let endpoint = endpoint_for(&server, None);
        let reply = endpoint.send("hi").await.unwrap();
        assert_eq!(reply, "hello");
    }

    #[tokio::test]
    async fn test_non_success_status_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "response": "ignored" })))
            .mount(&server)
            .await;

        let endpoint = endpoint_for(&server, None);
        assert_eq!(endpoint.send("hi").await, Err(EndpointError::Status(500)));
    }

    #[tokio::test]
    async fn test_missing_response_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "nope" })))
            .mount(&server)
            .await;

        let endpoint = endpoint_for(&server, None);
        assert_eq!(endpoint.send("hi").await, Err(EndpointError::MissingResponse));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let endpoint = endpoint_for(&server, None);
        let err = endpoint.send("hi").await.unwrap_err();
        assert!(matches!(err, EndpointError::Decode(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": "late" }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let endpoint = endpoint_for(&server, Some(Duration::from_millis(100)));
        assert_eq!(endpoint.send("hi").await, Err(EndpointError::Timeout));
    }

    /// URL of a local port with nothing listening on it
    fn closed_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/chat", addr)
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let config = ClientConfig::new(&closed_port_url())
            .unwrap()
            .with_timeout(Some(Duration::from_secs(5)));
        let endpoint = HttpEndpoint::new(&config).unwrap();

        let err = endpoint.send("hi").await.unwrap_err();
        assert!(matches!(err, EndpointError::Transport(_)), "got {:?}", err);
        assert_eq!(err.kind(), crate::endpoint::ErrorKind::Transport);
    }
}
