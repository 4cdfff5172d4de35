use std::sync::Once;

use analyst_core::{
    submit, update, AnalysisOutcome, ChatState, Effect, Msg, RequestId, Role, SessionPhase,
    FETCH_FAILED_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(analyst_logging::initialize_for_tests);
}

fn submit_and_take_id(state: ChatState, text: &str) -> (ChatState, RequestId) {
    let (state, effects) = submit(state, text);
    let request_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Analyze { request_id, .. } => Some(*request_id),
        })
        .expect("analyze effect");
    (state, request_id)
}

fn settle(state: ChatState, request_id: RequestId, outcome: AnalysisOutcome) -> ChatState {
    let (state, effects) = update(
        state,
        Msg::AnalysisSettled {
            request_id,
            outcome,
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn successful_answer_appends_assistant_turn() {
    init_logging();
    let (state, id) = submit_and_take_id(ChatState::new(), "What are Apple's latest earnings?");
    let state = settle(
        state,
        id,
        AnalysisOutcome::Answered {
            answer: "Apple reported ...".to_string(),
            sources: vec!["https://example.com/aapl".to_string()],
        },
    );

    assert_eq!(state.phase(), SessionPhase::Idle);
    assert_eq!(state.transcript().len(), 2);
    let turns = state.transcript().turns();
    assert_eq!(turns[0].role(), Role::User);
    assert_eq!(turns[0].content(), "What are Apple's latest earnings?");
    assert_eq!(turns[1].role(), Role::Assistant);
    assert_eq!(turns[1].content(), "Apple reported ...");
    assert_eq!(turns[1].sources().to_vec(), vec!["https://example.com/aapl".to_string()]);
}

#[test]
fn service_error_message_is_shown() {
    init_logging();
    let (state, id) = submit_and_take_id(ChatState::new(), "anything");
    let state = settle(
        state,
        id,
        AnalysisOutcome::Failed {
            message: Some("model unavailable".to_string()),
        },
    );

    assert!(!state.busy());
    let last = state.transcript().last().unwrap();
    assert_eq!(last.role(), Role::Assistant);
    assert_eq!(last.content(), "Error: model unavailable");
    assert!(last.sources().is_empty());
}

#[test]
fn failure_without_message_uses_fallback() {
    init_logging();
    let (state, id) = submit_and_take_id(ChatState::new(), "anything");
    let state = settle(state, id, AnalysisOutcome::Failed { message: None });

    assert_eq!(
        state.transcript().last().unwrap().content(),
        format!("Error: {FETCH_FAILED_MESSAGE}")
    );
    assert_eq!(
        state.transcript().last().unwrap().content(),
        "Error: Failed to fetch. Is the backend server running?"
    );
}

#[test]
fn missing_answer_is_passed_through_as_empty_text() {
    init_logging();
    let (state, id) = submit_and_take_id(ChatState::new(), "anything");
    let state = settle(
        state,
        id,
        AnalysisOutcome::Answered {
            answer: String::new(),
            sources: Vec::new(),
        },
    );
    assert_eq!(state.transcript().len(), 2);
    assert_eq!(state.transcript().last().unwrap().content(), "");
}

#[test]
fn session_is_reusable_after_failure() {
    init_logging();
    let (state, first) = submit_and_take_id(ChatState::new(), "one");
    let state = settle(state, first, AnalysisOutcome::Failed { message: None });

    let (state, second) = submit_and_take_id(state, "two");
    assert_ne!(first, second);
    assert!(state.busy());
    let state = settle(
        state,
        second,
        AnalysisOutcome::Answered {
            answer: "ok".to_string(),
            sources: Vec::new(),
        },
    );
    assert_eq!(state.transcript().len(), 4);
    assert!(!state.busy());
}

#[test]
fn stale_or_duplicate_settlements_are_ignored() {
    init_logging();
    let (state, id) = submit_and_take_id(ChatState::new(), "question");

    // Unknown id while awaiting.
    let state = settle(state, id + 100, AnalysisOutcome::Failed { message: None });
    assert!(state.busy());
    assert_eq!(state.transcript().len(), 1);

    let answered = AnalysisOutcome::Answered {
        answer: "answer".to_string(),
        sources: Vec::new(),
    };
    let state = settle(state, id, answered.clone());
    assert_eq!(state.transcript().len(), 2);

    // Same id again after it already settled.
    let mut state = settle(state, id, answered);
    assert_eq!(state.transcript().len(), 2);
    assert!(state.consume_dirty());
}

#[test]
fn transcript_never_shrinks_within_a_session() {
    init_logging();
    let mut state = ChatState::new();
    let mut previous_len = 0;
    let inputs = ["a", "   ", "b", "", "c"];
    for text in inputs {
        let (next, effects) = submit(state, text);
        state = next;
        assert!(state.transcript().len() >= previous_len);
        previous_len = state.transcript().len();
        for effect in effects {
            let Effect::Analyze { request_id, query, .. } = effect;
            state = settle(
                state,
                request_id,
                AnalysisOutcome::Answered {
                    answer: format!("re: {query}"),
                    sources: Vec::new(),
                },
            );
            assert_eq!(state.transcript().len(), previous_len + 1);
            previous_len = state.transcript().len();
        }
    }
    assert_eq!(state.transcript().len(), 6);
}

#[test]
fn new_chat_clears_only_when_idle() {
    init_logging();
    let (state, id) = submit_and_take_id(ChatState::new(), "question");

    let (state, _) = update(state, Msg::NewChatClicked);
    assert_eq!(state.transcript().len(), 1);
    assert!(state.busy());

    let state = settle(
        state,
        id,
        AnalysisOutcome::Answered {
            answer: "answer".to_string(),
            sources: Vec::new(),
        },
    );
    let (state, effects) = update(state, Msg::NewChatClicked);
    assert!(effects.is_empty());
    assert!(state.transcript().is_empty());
    assert_eq!(state.pending_input(), "");

    // Ids keep counting across conversations.
    let (_state, next_id) = submit_and_take_id(state, "fresh start");
    assert!(next_id > id);
}
