use analyst_core::Msg;

use super::constants::*;

/// What a line typed into the composer asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Messages(Vec<Msg>),
    Help,
    Quit,
}

pub fn parse_line(line: &str) -> Input {
    let command = line.trim();
    match command {
        CMD_QUIT | CMD_EXIT => return Input::Quit,
        CMD_HELP => return Input::Help,
        CMD_NEW => return Input::Messages(vec![Msg::NewChatClicked]),
        _ => {}
    }
    if let Some(index) = suggestion_index(command) {
        return Input::Messages(vec![Msg::SuggestionPicked(index)]);
    }
    // A blank line is a rejected send; the draft stays as it was.
    if command.is_empty() {
        return Input::Messages(Vec::new());
    }
    Input::Messages(vec![Msg::InputChanged(line.to_string()), Msg::Submitted])
}

/// `/1` picks the first suggestion.
fn suggestion_index(command: &str) -> Option<usize> {
    let number: usize = command.strip_prefix('/')?.parse().ok()?;
    number.checked_sub(1)
}
