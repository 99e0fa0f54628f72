use std::fmt;
use std::io;

use rustyline::error::ReadlineError;
use thiserror::Error;

/// Error returned by command and event handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result every handler returns.
pub type HandlerResult = Result<(), HandlerError>;

/// Which registry a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Command,
    Event,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Command => write!(f, "Command"),
            Category::Event => write!(f, "Event"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Event '{0}' is not a valid event")]
    InvalidEventKind(String),

    #[error("Cannot derive a name from handler '{0}', give one explicitly")]
    MissingName(String),

    #[error("{category} '{name}' not found")]
    NotFound { category: Category, name: String },

    #[error("Error executing '{command}': {source}")]
    CommandExecution {
        command: String,
        #[source]
        source: HandlerError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Input error: {0}")]
    Readline(#[from] ReadlineError),
}
