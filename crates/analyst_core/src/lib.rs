//! Analyst core: pure chat session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod suggestion;
mod turn;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{AnalysisOutcome, Msg};
pub use state::{ChatState, RequestId, SessionPhase, DEFAULT_PROFILE, FETCH_FAILED_MESSAGE};
pub use suggestion::{Suggestion, SUGGESTIONS};
pub use turn::{Role, Transcript, Turn};
pub use update::{submit, update};
pub use view_model::{source_label, ChatViewModel, Screen, SourceLink, TurnView, DISCLAIMER};
