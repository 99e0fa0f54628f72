use std::fmt;
use std::str::FromStr;

use crate::error::ShellError;

/// Lifecycle hooks a shell can fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Fired once before the first prompt
    Start,

    /// Fired on the `exit` token, an interrupt or end of input
    Exit,

    /// Fired before every dispatch with `[command, args...]`
    Before,

    /// Fired after every dispatch with `[command, args...]`
    After,

    /// Fired when a command handler fails, with `[command, detail]`
    Error,

    /// Fired when no enabled command matches, with `[token]`
    UnknownCommand,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Start,
        EventKind::Exit,
        EventKind::Before,
        EventKind::After,
        EventKind::Error,
        EventKind::UnknownCommand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::Exit => "exit",
            EventKind::Before => "before",
            EventKind::After => "after",
            EventKind::Error => "error",
            EventKind::UnknownCommand => "unknown_command",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ShellError::InvalidEventKind(s.to_string()))
    }
}
