//! Analyst engine: the analysis service client and effect execution.
mod engine;
mod service;
mod types;
mod wire;

pub use engine::EngineHandle;
pub use service::{AnalysisService, ReqwestAnalysisService, ServiceSettings, DEFAULT_ENDPOINT};
pub use types::{
    AnalysisError, AnalysisReply, EngineError, EngineEvent, FailureKind, RequestId,
};
pub use wire::{AnalyzeRequest, AnalyzeResponse, ErrorBody};
