#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the composer text.
    InputChanged(String),
    /// User pressed Enter or the send button.
    Submitted,
    /// User picked one of the welcome-screen suggestions (index into `SUGGESTIONS`).
    SuggestionPicked(usize),
    /// User asked for a fresh conversation.
    NewChatClicked,
    /// The in-flight analysis call finished, successfully or not.
    AnalysisSettled {
        request_id: crate::RequestId,
        outcome: AnalysisOutcome,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Result of one analysis call as the session sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Answered {
        answer: String,
        sources: Vec<String>,
    },
    /// `message` is the best human-readable explanation available; `None`
    /// means the call never got a usable response at all.
    Failed { message: Option<String> },
}
