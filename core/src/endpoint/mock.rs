use super::{ChatEndpoint, EndpointError, EndpointInfo};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock endpoint that echoes back the input with a simulated delay
pub struct MockEndpoint {
    delay: Duration,
    calls: AtomicUsize,
}

impl MockEndpoint {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(300), // Simulate round-trip time
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of messages this endpoint has received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatEndpoint for MockEndpoint {
    async fn send(&self, message: &str) -> Result<String, EndpointError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        // Simulate failures for trying out the fallback replies
        if message.trim().eq_ignore_ascii_case("error") {
            return Err(EndpointError::Status(500));
        }
        if message.trim().eq_ignore_ascii_case("network error") {
            return Err(EndpointError::Transport("Simulated network failure".to_string()));
        }

        Ok(format!("You said: {}", message))
    }

    fn info(&self) -> EndpointInfo {
        EndpointInfo {
            name: "Mock".to_string(),
            target: "offline echo".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_endpoint_echo() {
        let endpoint = MockEndpoint::new().with_delay(Duration::from_millis(10));
        let reply = endpoint.send("Hello, world!").await.unwrap();

        assert_eq!(reply, "You said: Hello, world!");
        assert_eq!(endpoint.calls(), 1);
    }

    #[test]
    fn test_mock_endpoint_errors() {
        let endpoint = MockEndpoint::new().with_delay(Duration::from_millis(10));

        assert_eq!(
            tokio_test::block_on(endpoint.send("error")),
            Err(EndpointError::Status(500))
        );
        match tokio_test::block_on(endpoint.send("network error")) {
            Err(EndpointError::Transport(msg)) => assert_eq!(msg, "Simulated network failure"),
            other => panic!("Expected transport error, got {:?}", other),
        }
    }
}
