//! The dispatch loop and its registration API
//!
//! A `Shell` owns the registry and settings. Hosts register commands and
//! event handlers, then call [`Shell::start`] (terminal) or [`Shell::run`]
//! (any [`LineSource`]). Each line is tokenized, `before` fires, the matching
//! command runs (or `unknown_command` fires), then `after` fires. A failing
//! command fires `error` and the loop keeps going; only `exit`, an interrupt
//! or the end of input stop it.

use std::collections::HashMap;
use std::io::{self, Stdout, Write};

use tracing::{debug, info, trace, warn};

use crate::config::{Settings, ShellConfig};
use crate::error::{Category, HandlerResult, ShellError};
use crate::event::EventKind;
use crate::event_bus::EventBus;
use crate::handler::{CommandSpec, EventSpec, HandlerDescriptor};
use crate::registry::{Partition, Registry};
use crate::repl::{parse_line, CommandLine, LineSource, ReadOutcome, ReplInput};

/// Token that ends the loop instead of dispatching
pub const EXIT_COMMAND: &str = "exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Idle,
    AwaitingInput,
    Dispatching,
    Terminated,
}

/// What the loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<W: Write = Stdout> {
    registry: Registry,
    settings: Settings,
    debug: bool,
    state: ShellState,
    output: W,
}

impl Shell<Stdout> {
    pub fn new() -> Self {
        Self::with_config(ShellConfig::default())
    }

    pub fn with_config(config: ShellConfig) -> Self {
        Self::with_output(config, io::stdout())
    }

    /// Run the loop on the terminal until `exit` or Ctrl-C
    pub fn start(&mut self) -> Result<(), ShellError> {
        let mut input = ReplInput::new()?;
        self.run(&mut input)
    }
}

impl Default for Shell<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Shell<W> {
    /// Shell writing fallbacks and debug traces to `output`
    pub fn with_output(config: ShellConfig, output: W) -> Self {
        Self {
            registry: Registry::new(),
            settings: Settings::from_config(&config),
            debug: config.debug,
            state: ShellState::Idle,
            output,
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_setting(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ShellError> {
        let (key, value) = (key.into(), value.into());
        debug!(%key, %value, "Setting changed");
        self.trace_line(format_args!("Setting '{key}' set to '{value}'"))?;
        self.settings.set(key, value);
        Ok(())
    }

    // Commands

    pub fn register_command(&mut self, spec: CommandSpec) -> Result<&mut Self, ShellError> {
        let (descriptor, disabled) = spec.into_descriptor()?;
        let name = descriptor.name().to_string();
        for param in descriptor.parameters() {
            let default = param.default.as_deref().unwrap_or("None");
            self.trace_line(format_args!(
                "Argument '{}' with default value '{}' registered for command '{}'",
                param.name, default, name
            ))?;
        }
        debug!(command = %name, disabled, "Command registered");
        self.trace_line(format_args!("Command '{name}' registered"))?;
        self.registry.commands.insert(name, descriptor, disabled);
        Ok(self)
    }

    /// Register an enabled command under an explicit name
    pub fn cmd<F>(&mut self, name: &str, handler: F) -> Result<&mut Self, ShellError>
    where
        F: FnMut(&[String]) -> HandlerResult + 'static,
    {
        self.register_command(CommandSpec::new(handler).name(name))
    }

    pub fn remove_command(&mut self, name: &str) -> Result<bool, ShellError> {
        let removed = self.registry.commands.remove(name);
        self.outcome(Category::Command, name, "removed", removed)
    }

    pub fn disable_command(&mut self, name: &str) -> Result<bool, ShellError> {
        let disabled = self.registry.commands.disable(name);
        self.outcome(Category::Command, name, "disabled", disabled)
    }

    pub fn enable_command(&mut self, name: &str) -> Result<bool, ShellError> {
        let enabled = self.registry.commands.enable(name);
        self.outcome(Category::Command, name, "enabled", enabled)
    }

    pub fn commands(&self) -> &HashMap<String, HandlerDescriptor> {
        self.registry.commands.enabled()
    }

    pub fn disabled_commands(&self) -> &HashMap<String, HandlerDescriptor> {
        self.registry.commands.disabled()
    }

    // Events

    pub fn register_event(&mut self, spec: EventSpec) -> Result<&mut Self, ShellError> {
        let (descriptor, disabled) = spec.into_descriptor()?;
        let kind: EventKind = descriptor.name().parse()?;
        debug!(event = %kind, disabled, "Event registered");
        self.trace_line(format_args!("Event '{kind}' registered"))?;
        self.registry.events.insert(kind, descriptor, disabled);
        Ok(self)
    }

    /// Register an enabled handler for the event called `name`
    pub fn on<F>(&mut self, name: &str, handler: F) -> Result<&mut Self, ShellError>
    where
        F: FnMut(&[String]) -> HandlerResult + 'static,
    {
        self.register_event(EventSpec::new(handler).name(name))
    }

    pub fn remove_event(&mut self, name: &str) -> Result<bool, ShellError> {
        let removed = self.event_op(name, |events, kind| events.remove(kind));
        self.outcome(Category::Event, name, "removed", removed)
    }

    pub fn disable_event(&mut self, name: &str) -> Result<bool, ShellError> {
        let disabled = self.event_op(name, |events, kind| events.disable(kind));
        self.outcome(Category::Event, name, "disabled", disabled)
    }

    pub fn enable_event(&mut self, name: &str) -> Result<bool, ShellError> {
        let enabled = self.event_op(name, |events, kind| events.enable(kind));
        self.outcome(Category::Event, name, "enabled", enabled)
    }

    pub fn events(&self) -> &HashMap<EventKind, HandlerDescriptor> {
        self.registry.events.enabled()
    }

    pub fn disabled_events(&self) -> &HashMap<EventKind, HandlerDescriptor> {
        self.registry.events.disabled()
    }

    /// Unrecognized event names can never be registered, so they count as missing.
    fn event_op(
        &mut self,
        name: &str,
        op: impl FnOnce(&mut Partition<EventKind>, &EventKind) -> bool,
    ) -> bool {
        match name.parse::<EventKind>() {
            Ok(kind) => op(&mut self.registry.events, &kind),
            Err(_) => false,
        }
    }

    fn outcome(
        &mut self,
        category: Category,
        name: &str,
        action: &str,
        done: bool,
    ) -> Result<bool, ShellError> {
        if done {
            debug!(%category, name, action, "Registry updated");
            self.trace_line(format_args!("{category} '{name}' {action}"))?;
            return Ok(true);
        }
        if self.debug {
            return Err(ShellError::NotFound {
                category,
                name: name.to_string(),
            });
        }
        Ok(false)
    }

    fn trace_line(&mut self, line: std::fmt::Arguments<'_>) -> io::Result<()> {
        if self.debug {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    // Loop

    /// Fire `kind` through the event bus, falling back when nothing is registered
    pub fn fire(&mut self, kind: EventKind, args: &[String]) -> Result<bool, ShellError> {
        let mut bus = EventBus::new(&mut self.registry.events, self.settings.welcome());
        let fired = bus.fire(kind, args, &mut self.output)?;
        if !fired {
            self.trace_line(format_args!("Event '{kind}' not found"))?;
        }
        Ok(fired)
    }

    /// Read and dispatch lines from `input` until `exit`, an interrupt or EOF.
    ///
    /// Command failures never end the loop. Errors returned here come from
    /// the input source or the output sink.
    pub fn run<I: LineSource>(&mut self, input: &mut I) -> Result<(), ShellError> {
        self.state = ShellState::Idle;
        info!("Shell starting");
        if let Err(err) = self.fire(EventKind::Start, &[]) {
            return Err(self.abort(err));
        }
        self.state = ShellState::AwaitingInput;

        loop {
            let prompt = self.settings.prompt().to_string();
            let line = match input.read_line(&prompt) {
                Ok(ReadOutcome::Line(line)) => line,
                Ok(ReadOutcome::Interrupted) => {
                    info!("Interrupted");
                    return self.terminate();
                }
                Ok(ReadOutcome::Eof) => {
                    info!("End of input");
                    return self.terminate();
                }
                Err(err) => {
                    warn!(error = %err, "Reading input failed");
                    return Err(self.abort(err));
                }
            };

            match self.execute_line(&line) {
                Ok(Flow::Exit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(err) => {
                    warn!(error = %err, "Dispatch failed");
                    return Err(self.abort(err));
                }
            }
        }
    }

    /// One loop iteration for an already-read line.
    ///
    /// A terminated shell dispatches nothing and keeps answering `Flow::Exit`
    /// until `run` starts it again.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        if self.state == ShellState::Terminated {
            return Ok(Flow::Exit);
        }
        let command = parse_line(line);
        if command.name == EXIT_COMMAND {
            self.terminate()?;
            return Ok(Flow::Exit);
        }

        self.state = ShellState::Dispatching;
        self.dispatch(&command)?;
        self.state = ShellState::AwaitingInput;
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, command: &CommandLine) -> Result<(), ShellError> {
        trace!(command = %command.name, args = ?command.args, "Dispatching");
        let event_args = command.event_args();
        self.fire(EventKind::Before, &event_args)?;

        let outcome = self
            .registry
            .commands
            .get_mut(command.name.as_str())
            .map(|descriptor| descriptor.invoke(&command.args));

        match outcome {
            Some(Ok(())) => {}
            Some(Err(source)) => {
                self.report_failure(&command.name, &*source)?;
                let failure = ShellError::CommandExecution {
                    command: command.name.clone(),
                    source,
                };
                warn!(error = %failure, "Command failed");
            }
            None => {
                self.fire(EventKind::UnknownCommand, &[command.name.clone()])?;
            }
        }

        self.fire(EventKind::After, &event_args)?;
        Ok(())
    }

    fn report_failure(
        &mut self,
        command: &str,
        source: &(dyn std::error::Error + Send + Sync),
    ) -> Result<(), ShellError> {
        self.fire(EventKind::Error, &[command.to_string(), source.to_string()])?;
        Ok(())
    }

    /// Fire `exit` and mark the shell terminated, even if firing fails
    fn terminate(&mut self) -> Result<(), ShellError> {
        let fired = self.fire(EventKind::Exit, &[]);
        self.state = ShellState::Terminated;
        info!("Shell terminated");
        fired.map(|_| ())
    }

    /// Terminate after a failure and hand back the error that caused it
    fn abort(&mut self, err: ShellError) -> ShellError {
        if self.state == ShellState::Terminated {
            return err;
        }
        if let Err(exit_err) = self.terminate() {
            warn!(error = %exit_err, "Exit event failed while aborting");
        }
        err
    }
}
