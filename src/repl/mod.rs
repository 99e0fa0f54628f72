//! REPL (Read-Eval-Print Loop) plumbing
//!
//! Line input and tokenizing for the dispatch loop in `shell`.
//!
//! ## Module Structure
//!
//! - **parser.rs**: Splits a raw line into a command token and arguments
//! - **input.rs**: `LineSource` trait, rustyline-backed terminal input and a
//!   scripted source for driving the shell without a terminal
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cmdloop::repl::{parse_line, LineSource, ReadOutcome, ReplInput};
//!
//! let mut input = ReplInput::new()?;
//! while let ReadOutcome::Line(line) = input.read_line("> ")? {
//!     let command = parse_line(&line);
//!     println!("{} {:?}", command.name, command.args);
//! }
//! ```

pub mod input;
pub mod parser;

pub use input::{LineSource, ReadOutcome, ReplInput, ScriptedInput};
pub use parser::{parse_line, CommandLine};
