use crate::{ChatState, Effect, Msg, SUGGESTIONS};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ChatState, msg: Msg) -> (ChatState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            // The composer is disabled while a call is outstanding.
            if !state.busy() {
                state.set_pending_input(text);
            }
            Vec::new()
        }
        Msg::SuggestionPicked(index) => {
            if let Some(suggestion) = SUGGESTIONS.get(index) {
                if !state.busy() {
                    state.set_pending_input(suggestion.prompt.to_string());
                }
            }
            Vec::new()
        }
        Msg::Submitted => {
            let query = state.pending_input().trim();
            if query.is_empty() || state.busy() {
                return (state, Vec::new());
            }
            let query = query.to_string();
            let request_id = state.accept_submission(query.clone());
            vec![Effect::Analyze {
                request_id,
                query,
                profile: state.profile().to_string(),
            }]
        }
        Msg::AnalysisSettled {
            request_id,
            outcome,
        } => {
            // A settlement for anything but the awaited call is stale; drop it.
            state.settle(request_id, outcome);
            Vec::new()
        }
        Msg::NewChatClicked => {
            if !state.busy() && (!state.transcript().is_empty() || !state.pending_input().is_empty())
            {
                state.reset_conversation();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Submits `text` as if typed into the composer and sent.
///
/// Rejected without any change when the trimmed text is empty or a call is
/// already in flight.
pub fn submit(state: ChatState, text: impl Into<String>) -> (ChatState, Vec<Effect>) {
    let text = text.into();
    if state.busy() || text.trim().is_empty() {
        return (state, Vec::new());
    }
    let (state, _) = update(state, Msg::InputChanged(text));
    update(state, Msg::Submitted)
}
