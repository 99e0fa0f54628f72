use std::collections::VecDeque;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::ShellError;

/// Result of one blocking read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),

    /// The user sent an interrupt (Ctrl-C)
    Interrupted,

    /// Input is closed (Ctrl-D or end of script)
    Eof,
}

/// Source of input lines for the dispatch loop
pub trait LineSource {
    /// Show `prompt` and block until one line is available
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError>;
}

/// Terminal input using rustyline
///
/// Provides:
/// - Command history for the session
/// - Arrow key navigation (left/right, up/down)
/// - Basic editing (backspace)
pub struct ReplInput {
    editor: DefaultEditor,
}

impl ReplInput {
    pub fn new() -> Result<Self, ShellError> {
        let editor = DefaultEditor::new()?;
        Ok(Self { editor })
    }
}

impl LineSource for ReplInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

/// Pre-recorded input, for tests and for hosts that feed the shell a script
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pending: VecDeque<ReadOutcome>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut input = Self::new();
        for line in lines {
            input.push_line(line);
        }
        input
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.pending.push_back(ReadOutcome::Line(line.into()));
        self
    }

    pub fn push_interrupt(&mut self) -> &mut Self {
        self.pending.push_back(ReadOutcome::Interrupted);
        self
    }

    /// Every prompt shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        self.prompts.push(prompt.to_string());
        Ok(self.pending.pop_front().unwrap_or(ReadOutcome::Eof))
    }
}
