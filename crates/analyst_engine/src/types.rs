use std::fmt;

use thiserror::Error;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReply {
    pub answer: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Settled {
        request_id: RequestId,
        result: Result<AnalysisReply, AnalysisError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct AnalysisError {
    pub kind: FailureKind,
    /// Transport- or decoder-level detail, meant for logs.
    pub message: String,
    /// The `error` field of a JSON error body, if the service sent one.
    pub service_message: Option<String>,
}

impl AnalysisError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            service_message: None,
        }
    }

    pub(crate) fn with_service_message(mut self, service_message: Option<String>) -> Self {
        self.service_message = service_message;
        self
    }

    /// Text to show the user, if there is anything better than the generic
    /// "could not reach the backend" fallback.
    pub fn display_message(&self) -> Option<String> {
        match &self.kind {
            FailureKind::HttpStatus(code) => Some(
                self.service_message
                    .clone()
                    .unwrap_or_else(|| format!("HTTP error! status: {code}")),
            ),
            FailureKind::MalformedResponse => Some(format!("malformed response: {}", self.message)),
            FailureKind::Timeout => Some("request timed out".to_string()),
            FailureKind::Transport => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection refused, reset, DNS failure and the like.
    Transport,
    Timeout,
    HttpStatus(u16),
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid analysis endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
