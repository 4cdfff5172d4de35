use std::time::Duration;

use analyst_logging::{analyst_debug, analyst_info, analyst_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::wire::{AnalyzeRequest, AnalyzeResponse, ErrorBody};
use crate::{AnalysisError, AnalysisReply, EngineError, FailureKind};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/analyze";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub endpoint: String,
    /// `None` waits for the OS to give up on the connection.
    pub connect_timeout: Option<Duration>,
    /// `None` waits for the backend indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

/// The remote analyst. One call per accepted submission.
#[async_trait::async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, query: &str, profile: &str) -> Result<AnalysisReply, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisService {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestAnalysisService {
    pub fn new(settings: ServiceSettings) -> Result<Self, EngineError> {
        let endpoint =
            reqwest::Url::parse(&settings.endpoint).map_err(|err| EngineError::InvalidEndpoint {
                endpoint: settings.endpoint.clone(),
                reason: err.to_string(),
            })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait::async_trait]
impl AnalysisService for ReqwestAnalysisService {
    async fn analyze(&self, query: &str, profile: &str) -> Result<AnalysisReply, AnalysisError> {
        let body = serde_json::to_vec(&AnalyzeRequest { query, profile })
            .map_err(|err| AnalysisError::new(FailureKind::Transport, err.to_string()))?;

        analyst_info!(
            "POST {} query_len={} profile={:?}",
            self.endpoint,
            query.len(),
            profile
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        analyst_debug!("Response status={} body_len={}", status, bytes.len());

        if !status.is_success() {
            let err =
                AnalysisError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_service_message(ErrorBody::message_from(&bytes));
            analyst_warn!("Analysis failed: {}", err);
            return Err(err);
        }

        let parsed: AnalyzeResponse = serde_json::from_slice(&bytes).map_err(|err| {
            analyst_warn!("Undecodable analysis response: {}", err);
            AnalysisError::new(FailureKind::MalformedResponse, err.to_string())
        })?;

        Ok(AnalysisReply {
            answer: parsed.answer.unwrap_or_default(),
            sources: parsed.sources.unwrap_or_default(),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalysisError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Transport
    };
    let err = AnalysisError::new(kind, err.to_string());
    analyst_warn!("Analysis request did not complete: {}", err);
    err
}
