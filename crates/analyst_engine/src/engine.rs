use std::sync::{mpsc, Arc};
use std::thread;

use analyst_logging::analyst_debug;

use crate::{AnalysisService, EngineError, EngineEvent, RequestId};

enum EngineCommand {
    Analyze {
        request_id: RequestId,
        query: String,
        profile: String,
    },
}

/// Runs analysis calls on a background thread with its own tokio runtime and
/// reports settlements over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(service: Arc<dyn AnalysisService>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), command, event_tx).await;
                });
            }
            analyst_debug!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn analyze(
        &self,
        request_id: RequestId,
        query: impl Into<String>,
        profile: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze {
            request_id,
            query: query.into(),
            profile: profile.into(),
        });
    }

    /// Blocks until the next event. `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    service: &dyn AnalysisService,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Analyze {
            request_id,
            query,
            profile,
        } => {
            let result = service.analyze(&query, &profile).await;
            analyst_debug!("Request {} settled ok={}", request_id, result.is_ok());
            let _ = event_tx.send(EngineEvent::Settled { request_id, result });
        }
    }
}
