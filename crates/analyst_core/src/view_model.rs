use url::Url;

use crate::{ChatState, Role, Suggestion, Turn, SUGGESTIONS};

pub const DISCLAIMER: &str =
    "Financial Analyst AI can make mistakes. Verify important information.";

/// Which layout the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Empty transcript: greeting, composer and suggestions.
    #[default]
    Welcome,
    /// Scrollback followed by the composer.
    Conversation,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatViewModel {
    pub screen: Screen,
    pub turns: Vec<TurnView>,
    /// True while a call is outstanding; the renderer shows a loading
    /// indicator in place of the next assistant turn.
    pub busy: bool,
    pub pending_input: String,
    pub can_submit: bool,
    /// Only populated on the welcome screen.
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub role: Role,
    pub content: String,
    pub sources: Vec<SourceLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub url: String,
    pub label: String,
}

impl ChatViewModel {
    pub(crate) fn from_state(state: &ChatState) -> Self {
        let transcript = state.transcript();
        let screen = if transcript.is_empty() {
            Screen::Welcome
        } else {
            Screen::Conversation
        };
        let suggestions = match screen {
            Screen::Welcome => SUGGESTIONS.to_vec(),
            Screen::Conversation => Vec::new(),
        };
        Self {
            screen,
            turns: transcript.iter().map(TurnView::from_turn).collect(),
            busy: state.busy(),
            pending_input: state.pending_input().to_string(),
            can_submit: !state.busy() && !state.pending_input().trim().is_empty(),
            suggestions,
        }
    }
}

impl TurnView {
    /// Assistant turns produced by a failed call.
    pub fn is_error(&self) -> bool {
        self.role == Role::Assistant && self.content.starts_with("Error: ")
    }

    fn from_turn(turn: &Turn) -> Self {
        Self {
            role: turn.role(),
            content: turn.content().to_string(),
            sources: turn
                .sources()
                .iter()
                .map(|url| SourceLink {
                    url: url.clone(),
                    label: source_label(url),
                })
                .collect(),
        }
    }
}

/// Short label for a source link: the host without a leading `www.`.
/// Anything that is not an absolute URL with a host is returned as-is.
pub fn source_label(raw: &str) -> String {
    match Url::parse(raw.trim()) {
        Ok(url) => match url.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => raw.to_string(),
        },
        Err(_) => raw.to_string(),
    }
}
