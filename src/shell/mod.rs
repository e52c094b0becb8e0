//! Subprocess execution and platform detection.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{CommandResult, Invocation, ProcessRunner, StdioMode, SystemRunner};
pub use mock::{MockResponse, MockRunner};
pub use platform::{is_ci, PlatformProfile};
