//! JSON bodies of `POST /api/analyze`.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub query: &'a str,
    pub profile: &'a str,
}

/// Success body. Both fields are optional on the wire: a missing answer is
/// passed through as empty text, missing sources as an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extracts a non-empty `error` string from a response body, if any.
    pub fn message_from(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.trim().is_empty())
    }
}
