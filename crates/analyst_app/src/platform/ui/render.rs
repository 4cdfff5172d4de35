use analyst_core::{ChatViewModel, Role, Screen, TurnView, DISCLAIMER};
use colored::Colorize;

use super::constants::*;

const INDENT: &str = "  ";

/// Full frame for a view model. Pure: the same view always yields the same
/// lines.
pub fn render(view: &ChatViewModel) -> Vec<String> {
    match view.screen {
        Screen::Welcome => render_welcome(view),
        Screen::Conversation => {
            let mut lines: Vec<String> = view.turns.iter().flat_map(render_turn).collect();
            if view.busy {
                lines.extend(render_loading());
            }
            lines.push(render_footer());
            lines
        }
    }
}

/// Tracks what has already been written to the terminal so each update only
/// prints what is new.
#[derive(Debug, Default)]
pub struct TerminalView {
    printed_turns: usize,
    welcome_printed: bool,
    loading_printed: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delta(&mut self, view: &ChatViewModel) -> Vec<String> {
        let mut lines = Vec::new();

        // New chat: start over.
        if view.turns.len() < self.printed_turns {
            *self = Self::default();
            lines.push(String::new());
        }

        if view.screen == Screen::Welcome {
            if !self.welcome_printed {
                self.welcome_printed = true;
                lines.extend(render_welcome(view));
            }
            return lines;
        }

        for turn in &view.turns[self.printed_turns..] {
            lines.extend(render_turn(turn));
        }
        self.printed_turns = view.turns.len();

        if view.busy && !self.loading_printed {
            lines.extend(render_loading());
        }
        self.loading_printed = view.busy;
        lines
    }
}

fn render_welcome(view: &ChatViewModel) -> Vec<String> {
    let mut lines = vec![WELCOME_TITLE.bold().to_string(), String::new()];
    for (index, suggestion) in view.suggestions.iter().enumerate() {
        let icon = SUGGESTION_ICONS.get(index).copied().unwrap_or("•");
        lines.push(format!(
            "{INDENT}{} {icon} {}",
            format!("/{}", index + 1).cyan(),
            suggestion.title
        ));
    }
    lines.push(String::new());
    lines.push(HELP_TEXT.dimmed().to_string());
    lines
}

pub fn render_turn(turn: &TurnView) -> Vec<String> {
    let header = match turn.role {
        Role::User => "You".green().bold(),
        Role::Assistant if turn.is_error() => "Analyst".red().bold(),
        Role::Assistant => "Analyst".blue().bold(),
    };
    let mut lines = vec![header.to_string()];
    lines.extend(turn.content.lines().map(|line| format!("{INDENT}{line}")));
    if !turn.sources.is_empty() {
        lines.push(format!("{INDENT}{}", "Sources".bold()));
        for source in &turn.sources {
            lines.push(format!(
                "{INDENT}{INDENT}↗ {} {}",
                source.label,
                format!("<{}>", source.url).dimmed()
            ));
        }
    }
    lines.push(String::new());
    lines
}

/// Stands in for the assistant turn that has not arrived yet.
fn render_loading() -> Vec<String> {
    vec![
        "Analyst".blue().bold().to_string(),
        format!("{INDENT}{}", LOADING_TEXT.dimmed()),
    ]
}

fn render_footer() -> String {
    DISCLAIMER.dimmed().to_string()
}
