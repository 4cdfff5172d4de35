use crate::view_model::ChatViewModel;
use crate::{AnalysisOutcome, Transcript, Turn};

/// Profile sent with every query unless configured otherwise.
pub const DEFAULT_PROFILE: &str = "a retail investor";

/// Shown when a call failed without any usable explanation.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch. Is the backend server running?";

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Awaiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    transcript: Transcript,
    pending_input: String,
    phase: SessionPhase,
    profile: String,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::with_profile(DEFAULT_PROFILE)
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: impl Into<String>) -> Self {
        Self {
            transcript: Transcript::new(),
            pending_input: String::new(),
            phase: SessionPhase::Idle,
            profile: profile.into(),
            in_flight: None,
            next_request_id: 1,
            dirty: false,
        }
    }

    pub fn view(&self) -> ChatViewModel {
        ChatViewModel::from_state(self)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn busy(&self) -> bool {
        self.phase == SessionPhase::Awaiting
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Request id of the call currently awaited, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Returns whether anything visible changed since the last call, and
    /// clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_pending_input(&mut self, text: String) {
        if self.pending_input != text {
            self.pending_input = text;
            self.dirty = true;
        }
    }

    /// Records the user turn and moves to `Awaiting`. The caller has already
    /// checked that the session is idle and `query` is non-empty.
    pub(crate) fn accept_submission(&mut self, query: String) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.transcript.push(Turn::user(query));
        self.pending_input.clear();
        self.phase = SessionPhase::Awaiting;
        self.in_flight = Some(request_id);
        self.dirty = true;
        request_id
    }

    /// Appends the assistant turn for the in-flight call and returns to
    /// `Idle`. Returns false if `request_id` is not the awaited call.
    pub(crate) fn settle(&mut self, request_id: RequestId, outcome: AnalysisOutcome) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        let turn = match outcome {
            AnalysisOutcome::Answered { answer, sources } => Turn::assistant(answer, sources),
            AnalysisOutcome::Failed { message } => {
                let message = message.unwrap_or_else(|| FETCH_FAILED_MESSAGE.to_string());
                Turn::assistant(format!("Error: {message}"), Vec::new())
            }
        };
        self.transcript.push(turn);
        self.phase = SessionPhase::Idle;
        self.in_flight = None;
        self.dirty = true;
        true
    }

    /// Starts a new conversation. Request ids keep counting so a late reply
    /// can never match a newer request.
    pub(crate) fn reset_conversation(&mut self) {
        self.transcript = Transcript::new();
        self.pending_input.clear();
        self.dirty = true;
    }
}
