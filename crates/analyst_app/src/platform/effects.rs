use std::sync::Arc;

use analyst_core::{AnalysisOutcome, Effect, Msg};
use analyst_engine::{
    AnalysisError, AnalysisReply, AnalysisService, EngineError, EngineEvent, EngineHandle,
    RequestId,
};
use analyst_logging::{analyst_info, analyst_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(service: Arc<dyn AnalysisService>) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(service)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Analyze {
                    request_id,
                    query,
                    profile,
                } => {
                    analyst_info!("Analyze request_id={} query_len={}", request_id, query.len());
                    self.engine.analyze(request_id, query, profile);
                }
            }
        }
    }

    /// Blocks until the engine settles a call and returns it as a message.
    /// `None` means the engine has shut down.
    pub fn wait_for_settlement(&self) -> Option<Msg> {
        match self.engine.recv()? {
            EngineEvent::Settled { request_id, result } => Some(Msg::AnalysisSettled {
                request_id,
                outcome: map_outcome(request_id, result),
            }),
        }
    }
}

fn map_outcome(
    request_id: RequestId,
    result: Result<AnalysisReply, AnalysisError>,
) -> AnalysisOutcome {
    match result {
        Ok(reply) => AnalysisOutcome::Answered {
            answer: reply.answer,
            sources: reply.sources,
        },
        Err(err) => {
            analyst_warn!("Request {} failed: {}", request_id, err);
            AnalysisOutcome::Failed {
                message: err.display_message(),
            }
        }
    }
}
