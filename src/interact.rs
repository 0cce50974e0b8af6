//! Interactive questions: commit confirmation and branch selection.
//!
//! Every question acquires its own input handle and releases it as soon as one
//! line has been read, so the process never stays attached to the terminal
//! between questions.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;

use crate::error::PromptError;

/// Source of answers to interactive questions.
pub trait Prompter {
    /// Ask `question` and block until one line is read.
    ///
    /// Returns `None` at end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>, PromptError>;
}

/// Prompter bound to the process terminal.
///
/// Uses `dialoguer` when stdin and stderr are terminals and plain line reads
/// otherwise (e.g. `echo y | stagecommit` or `stagecommit 2>log`).
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

/// dialoguer reads stdin and draws on stderr, so both must be terminals.
fn use_dialoguer(stdin_is_tty: bool, stderr_is_tty: bool) -> bool {
    stdin_is_tty && stderr_is_tty
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> Result<Option<String>, PromptError> {
        if use_dialoguer(io::stdin().is_terminal(), io::stderr().is_terminal()) {
            let answer: String = Input::new()
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()
                .map_err(PromptError::Interactive)?;
            return Ok(Some(answer));
        }

        // Lock is held only for this one read.
        LinePrompter::new(io::stdin().lock(), io::stderr()).ask(question)
    }
}

/// Prompter over arbitrary reader/writer pairs.
#[derive(Debug)]
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<Option<String>, PromptError> {
        write!(self.output, "{question}: ").map_err(PromptError::ReadFailed)?;
        self.output.flush().map_err(PromptError::ReadFailed)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(PromptError::ReadFailed)?;

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Whether an answer counts as "yes". Only `y` does, case-insensitively.
pub fn is_affirmative(answer: Option<&str>) -> bool {
    answer.is_some_and(|a| a.trim().to_lowercase() == "y")
}

/// Ask a yes/no question. Anything other than `y` is a decline.
pub fn confirm<P: Prompter + ?Sized>(prompter: &mut P, question: &str) -> Result<bool, PromptError> {
    let answer = prompter.ask(&format!("{question} (y/n)"))?;
    Ok(is_affirmative(answer.as_deref()))
}
