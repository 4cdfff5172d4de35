use std::process::ExitCode;
use std::sync::Arc;

use analyst_core::{submit, update, ChatState, Msg, Role};
use analyst_engine::ReqwestAnalysisService;
use analyst_logging::{analyst_error, analyst_info};
use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::config::Cli;
use super::effects::EffectRunner;
use super::ui;
use super::ui::input::Input;
use super::ui::render::TerminalView;

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    analyst_logging::initialize(&cli.log_destination(), cli.log_level())
        .with_context(|| format!("could not create log file {}", cli.log_file.display()))?;

    let service = ReqwestAnalysisService::new(cli.service_settings())?;
    analyst_info!("Using analysis endpoint {}", service.endpoint());
    let runner = EffectRunner::new(Arc::new(service))?;
    let state = ChatState::with_profile(cli.profile.clone());

    match cli.ask.as_deref() {
        Some(question) => ask_once(&runner, state, question),
        None => {
            run_repl(&runner, state)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Sends one question, prints the conversation and reports failure through
/// the exit code.
fn ask_once(runner: &EffectRunner, state: ChatState, question: &str) -> anyhow::Result<ExitCode> {
    if question.trim().is_empty() {
        bail!("nothing to ask: the question is empty");
    }
    let (mut state, effects) = submit(state, question);
    runner.enqueue(effects);
    while state.busy() {
        let Some(msg) = runner.wait_for_settlement() else {
            bail!("analysis engine stopped before answering");
        };
        state = dispatch(runner, state, msg, None);
    }

    for line in ui::render::render(&state.view()) {
        println!("{line}");
    }
    Ok(ask_verdict(&state).into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AskVerdict {
    Answered,
    Failed,
}

impl From<AskVerdict> for ExitCode {
    fn from(verdict: AskVerdict) -> Self {
        match verdict {
            AskVerdict::Answered => ExitCode::SUCCESS,
            AskVerdict::Failed => ExitCode::FAILURE,
        }
    }
}

/// Failed when the last turn is an error or the call never settled.
fn ask_verdict(state: &ChatState) -> AskVerdict {
    let answered = !state.busy()
        && state
            .view()
            .turns
            .last()
            .is_some_and(|turn| turn.role == Role::Assistant && !turn.is_error());
    if answered {
        AskVerdict::Answered
    } else {
        AskVerdict::Failed
    }
}

fn run_repl(runner: &EffectRunner, mut state: ChatState) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new().context("failed to initialize line editor")?;
    let mut terminal = TerminalView::new();
    print_lines(terminal.delta(&state.view()));

    loop {
        if state.busy() {
            // Composer is disabled until the in-flight call settles.
            let Some(msg) = runner.wait_for_settlement() else {
                analyst_error!("Analysis engine stopped while a request was pending");
                bail!("analysis engine stopped unexpectedly");
            };
            state = dispatch(runner, state, msg, Some(&mut terminal));
            continue;
        }

        let pending = state.pending_input().to_string();
        let line = match editor.readline_with_initial(ui::constants::PROMPT, (&pending, "")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                state = dispatch(runner, state, Msg::InputChanged(String::new()), None);
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("failed to read input"),
        };

        match ui::input::parse_line(&line) {
            Input::Quit => break,
            Input::Help => println!("{}", ui::constants::HELP_TEXT.dimmed()),
            Input::Messages(msgs) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                for msg in msgs {
                    state = dispatch(runner, state, msg, Some(&mut terminal));
                }
            }
        }
    }

    analyst_info!("Chat ended with {} turns", state.transcript().len());
    Ok(())
}

/// Applies one message, runs its effects and prints whatever became visible.
fn dispatch(
    runner: &EffectRunner,
    state: ChatState,
    msg: Msg,
    terminal: Option<&mut TerminalView>,
) -> ChatState {
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() {
        if let Some(terminal) = terminal {
            print_lines(terminal.delta(&state.view()));
        }
    }
    state
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
