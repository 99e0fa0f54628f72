//! Embeddable framework for line-oriented command shells.
//!
//! ```rust,no_run
//! use cmdloop::{HandlerResult, Shell};
//!
//! fn greet(args: &[String]) -> HandlerResult {
//!     println!("Hello, {}!", args.first().map(String::as_str).unwrap_or("world"));
//!     Ok(())
//! }
//!
//! # fn main() -> Result<(), cmdloop::ShellError> {
//! let mut shell = Shell::new();
//! shell.register_command(cmdloop::CommandSpec::new(greet).description("Say hello"))?;
//! shell.start()
//! # }
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod event_bus;
pub mod handler;
pub mod logging;
pub mod registry;
pub mod repl;
pub mod shell;

pub use config::{Settings, ShellConfig};
pub use error::{Category, HandlerError, HandlerResult, ShellError};
pub use event::EventKind;
pub use handler::{CommandSpec, EventSpec, HandlerDescriptor, Param};
pub use repl::{LineSource, ReadOutcome, ReplInput, ScriptedInput};
pub use shell::{Flow, Shell, ShellState};
