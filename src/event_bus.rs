use std::io::{self, Write};

use tracing::{debug, warn};

use crate::event::EventKind;
use crate::registry::Partition;

/// Fires lifecycle events against the enabled event handlers.
///
/// Unregistered and disabled events fall back to a fixed behavior per kind:
/// `start` prints the welcome line (if any), `error` and `unknown_command` print a
/// message, the rest stay silent.
pub struct EventBus<'a> {
    events: &'a mut Partition<EventKind>,
    welcome: &'a str,
}

impl<'a> EventBus<'a> {
    pub fn new(events: &'a mut Partition<EventKind>, welcome: &'a str) -> Self {
        Self { events, welcome }
    }

    /// Returns `true` when a registered handler ran.
    pub fn fire<W: Write>(
        &mut self,
        kind: EventKind,
        args: &[String],
        out: &mut W,
    ) -> io::Result<bool> {
        match self.events.get_mut(&kind) {
            Some(descriptor) => {
                if let Err(err) = descriptor.invoke(args) {
                    warn!(event = %kind, error = %err, "Event handler failed");
                }
                Ok(true)
            }
            None => {
                debug!(event = %kind, "No handler registered, using fallback");
                self.fallback(kind, args, out)?;
                Ok(false)
            }
        }
    }

    fn fallback<W: Write>(
        &self,
        kind: EventKind,
        args: &[String],
        out: &mut W,
    ) -> io::Result<()> {
        let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or_default();
        match kind {
            EventKind::Start if self.welcome.is_empty() => Ok(()),
            EventKind::Start => writeln!(out, "{}", self.welcome),
            EventKind::Error => writeln!(out, "Error executing '{}': {}", arg(0), arg(1)),
            EventKind::UnknownCommand => writeln!(out, "Unknown command: {}", arg(0)),
            EventKind::Exit | EventKind::Before | EventKind::After => Ok(()),
        }
    }
}
