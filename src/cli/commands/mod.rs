//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`quantum-bootstrap install`, `quantum-bootstrap package`)
//! - Shared config loading
//! - Consistent global flag handling

pub mod completions;
pub mod dispatcher;
pub mod doctor;
pub mod install;
pub mod package;
pub mod scripts;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
