//! Transport boundary to the external analysis service.
//!
//! The service is consumed as a black box behind [`AnalysisTransport`], so
//! the orchestrator is testable without a live endpoint. [`HttpTransport`]
//! is the production implementation over reqwest.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::AnalysisConfig;
use crate::models::FeatureCollection;

/// The two service levels for analysis: an unauthenticated low-cost
/// estimate and the authenticated full computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Preliminary,
    Runtime,
}

impl Tier {
    /// Path segment under the analysis endpoint prefix.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Tier::Preliminary => "preliminary",
            Tier::Runtime => "runtime",
        }
    }
}

/// Caller identity for the runtime tier, passed explicitly rather than
/// looked up from ambient session state.
#[derive(Debug, Clone)]
pub struct Credentials {
    bearer_token: String,
}

impl Credentials {
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.bearer_token
    }
}

/// Raw service response with both channels captured: the statistics header
/// and the binary body. Capturing both here means the decode step can never
/// observe a half-read response.
#[derive(Debug, Clone)]
pub struct ServiceReply {
    pub status: u16,
    pub statistics_header: Option<String>,
    pub body: Vec<u8>,
}

/// Network-level failures (no usable response).
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Connection(String),
}

/// Boundary to the analysis service. One operation: submit a serialized
/// region and return the raw reply.
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn submit(
        &self,
        tier: Tier,
        region: &FeatureCollection,
        credentials: Option<&Credentials>,
    ) -> Result<ServiceReply, TransportError>;
}

/// Production transport over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    statistics_header: String,
}

impl HttpTransport {
    pub fn new(config: &AnalysisConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            statistics_header: config.statistics_header.clone(),
        })
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn submit(
        &self,
        tier: Tier,
        region: &FeatureCollection,
        credentials: Option<&Credentials>,
    ) -> Result<ServiceReply, TransportError> {
        let url = format!("{}/api/biomass/{}", self.base_url, tier.path_segment());

        let mut request = self.client.post(&url).json(region);
        if let Some(credentials) = credentials {
            request = request.bearer_auth(credentials.token());
        }

        tracing::debug!(%url, tier = tier.path_segment(), "submitting analysis request");

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();

        // The header is taken off the response before the body stream is
        // consumed, so neither channel can corrupt the other.
        let statistics_header = response
            .headers()
            .get(self.statistics_header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(map_reqwest_error)?
            .to_vec();

        Ok(ServiceReply {
            status,
            statistics_header,
            body,
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Connection(e.to_string())
    }
}
