//! The read-eval-print loop and its two input modes.
//!
//! Interactive mode reads lines from the terminal via rustyline; replay
//! mode drains a pre-recorded script front-to-back and, once exhausted,
//! hands the same conversation state to a fresh interactive loop. Exactly
//! one turn is ever in flight: the next line is not read or pushed until
//! the current evaluation has fully settled.

use super::commands::Command;
use crate::display::TurnSpinner;
use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use skillsim_core::{ConversationController, ReplayScript, SimulationError, QUIT_SENTINEL};
use std::collections::VecDeque;
use std::path::Path;

/// Prompt shown for user input, and the matching echo prefix in replay.
const USER_PROMPT: &str = "User  > ";

/// Prefix for the skill's captions.
const SKILL_LABEL: &str = "Skill >";

/// Whether the loop should keep reading lines.
enum Flow {
    Continue,
    Quit,
}

/// What a drained replay script asks the caller to do next.
#[derive(Debug, PartialEq, Eq)]
enum ReplayOutcome {
    /// The script ended with a `.quit` sentinel; the run is over.
    Quit,
    /// The script ran out of lines; fall back to interactive mode.
    SwitchToInteractive,
}

/// Line-oriented dialog REPL over one conversation controller.
pub struct DialogRepl {
    controller: ConversationController,
}

impl DialogRepl {
    pub fn new(controller: ConversationController) -> Self {
        Self { controller }
    }

    /// Run the interactive loop until `.quit`, Ctrl+C, or EOF.
    pub async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new().context("Failed to initialize readline")?;

        println!("Type an utterance to talk to your skill.");
        println!("Commands: .record <file> [--append-quit] to save the conversation, .quit to exit.");
        println!();

        loop {
            match rl.readline(USER_PROMPT) {
                Ok(line) => {
                    let _ = rl.add_history_entry(&line);
                    match self.handle_line(&line).await? {
                        Flow::Continue => {}
                        Flow::Quit => break,
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    self.flush_on_exit();
                    println!("Goodbye!");
                    break;
                }
                Err(e) => {
                    return Err(e).context("Readline error");
                }
            }
        }

        Ok(())
    }

    /// Replay a script, then either quit or fall back to interactive mode.
    ///
    /// Per-turn simulation failures are reported and swallowed so the rest
    /// of the script still runs; a failure while switching to interactive
    /// mode propagates out of the whole run.
    pub async fn run_replay(&mut self, script: ReplayScript) -> Result<()> {
        match self.drain_script(script).await {
            ReplayOutcome::Quit => {
                self.flush_on_exit();
                println!("Goodbye!");
                Ok(())
            }
            ReplayOutcome::SwitchToInteractive => {
                println!();
                println!("Replay script exhausted, switching to interactive dialog.");
                self.run_interactive().await
            }
        }
    }

    /// Feed scripted utterances to the controller one settled turn at a
    /// time.
    async fn drain_script(&mut self, script: ReplayScript) -> ReplayOutcome {
        let mut queue: VecDeque<String> = script.user_input.into();

        while let Some(line) = queue.pop_front() {
            println!("{}{}", USER_PROMPT, line);

            if line.trim() == QUIT_SENTINEL {
                return ReplayOutcome::Quit;
            }
            if let Err(e) = self.evaluate(&line).await {
                // Replay keeps going so the rest of the script is exercised.
                report_turn_error(&e);
            }
        }

        ReplayOutcome::SwitchToInteractive
    }

    /// Dispatch one input line.
    async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        match Command::parse(line) {
            Command::Empty => Ok(Flow::Continue),
            Command::Quit => {
                self.controller
                    .flush_io()
                    .context("Failed to flush session IO")?;
                println!("Goodbye!");
                Ok(Flow::Quit)
            }
            Command::Record { path, append_quit } => {
                self.record(Path::new(&path), append_quit);
                Ok(Flow::Continue)
            }
            Command::Malformed(warning) => {
                eprintln!("Warning: {}", warning);
                Ok(Flow::Continue)
            }
            Command::Utterance(utterance) => {
                if let Err(e) = self.evaluate(&utterance).await {
                    report_turn_error(&e);
                }
                Ok(Flow::Continue)
            }
        }
    }

    /// Evaluate one utterance with a spinner around the slow part.
    async fn evaluate(&mut self, utterance: &str) -> Result<(), SimulationError> {
        let mut spinner = TurnSpinner::start();
        let outcome = self
            .controller
            .evaluate_utterance(utterance, &mut spinner)
            .await;
        // The spinner always stops before anything is printed.
        spinner.finish();

        let captions = outcome?;
        for caption in &captions {
            println!("{} {}", SKILL_LABEL, caption);
        }
        if captions.is_empty() {
            log::debug!("turn completed without captions");
        }
        Ok(())
    }

    /// Serialize the current utterance cache into a replay script.
    fn record(&self, path: &Path, append_quit: bool) {
        let session = self.controller.session();
        if session.utterance_cache.is_empty() {
            // An empty script would be rejected on load, so never write one.
            eprintln!("Warning: nothing to record yet; say something first");
            return;
        }
        let mut user_input = session.utterance_cache.clone();
        if append_quit {
            user_input.push(QUIT_SENTINEL.to_string());
        }

        let script = ReplayScript::new(session.skill_id.clone(), session.locale.clone(), user_input);
        match script.save(path) {
            Ok(()) => println!("Replay script written to {}", path.display()),
            Err(e) => eprintln!("Warning: {}", e),
        }
    }

    fn flush_on_exit(&mut self) {
        if let Err(e) = self.controller.flush_io() {
            log::warn!("Failed to flush session IO on exit: {}", e);
        }
    }
}

/// Print a single-turn failure without ending the loop.
fn report_turn_error(e: &SimulationError) {
    if e.is_validation() {
        eprintln!("Warning: {}", e);
    } else {
        eprintln!("Error: {}", e);
    }
}
