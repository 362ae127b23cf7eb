// ABOUTME: HTTP probe abstraction and its reqwest implementation.
// ABOUTME: Sends one GET with an optional auth header under a bounded timeout.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("invalid probe request: {0}")]
    InvalidRequest(String),
}

/// A single health probe request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

/// Issues health probe requests.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Perform the request once and return the HTTP status code.
    async fn get(&self, request: &ProbeRequest) -> Result<u16, ProbeError>;
}

/// Probe backed by a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HealthProbe for HttpProbe {
    async fn get(&self, request: &ProbeRequest) -> Result<u16, ProbeError> {
        let mut builder = self.client.get(&request.url).timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        match builder.send().await {
            Ok(response) => Ok(response.status().as_u16()),
            Err(e) if e.is_timeout() => Err(ProbeError::Timeout(request.timeout)),
            Err(e) if e.is_builder() => Err(ProbeError::InvalidRequest(e.to_string())),
            Err(e) => Err(ProbeError::Connection(e.to_string())),
        }
    }
}
