//! Scripted process runner for testing.
//!
//! `MockRunner` implements [`ProcessRunner`] without spawning anything.
//! Each program name, or a full command line, can be given a canned
//! response; every invocation is recorded for later assertion.
//!
//! # Example
//!
//! ```
//! use quantum_bootstrap::shell::{Invocation, MockResponse, MockRunner, ProcessRunner, StdioMode};
//!
//! let mut runner = MockRunner::new();
//! runner.respond("pip3", MockResponse::exit(1));
//!
//! let result = runner
//!     .run(&Invocation::new("pip3").arg("install"), StdioMode::Inherited)
//!     .unwrap();
//! assert!(!result.success);
//! assert_eq!(runner.calls_to("pip3"), 1);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use super::command::{CommandResult, Invocation, ProcessRunner, StdioMode};

/// Canned outcome for a mocked program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockResponse {
    /// The program runs and exits with this code, printing `stdout`.
    Exit { code: Option<i32>, stdout: String },
    /// The program cannot be found.
    Missing,
}

impl MockResponse {
    /// Exit with `code` and no output.
    pub fn exit(code: i32) -> Self {
        MockResponse::Exit {
            code: Some(code),
            stdout: String::new(),
        }
    }

    /// Exit 0 after printing `stdout`.
    pub fn output(stdout: &str) -> Self {
        MockResponse::Exit {
            code: Some(0),
            stdout: stdout.to_string(),
        }
    }

    /// Terminated by a signal.
    pub fn killed() -> Self {
        MockResponse::Exit {
            code: None,
            stdout: String::new(),
        }
    }
}

/// Process runner that replays canned responses.
///
/// Programs without a configured response exit 0 silently.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: HashMap<String, MockResponse>,
    calls: Vec<(Invocation, StdioMode)>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the response for a program name.
    pub fn respond(&mut self, program: &str, response: MockResponse) {
        self.responses.insert(program.to_string(), response);
    }

    /// Configure the response for one exact command line, e.g.
    /// `python3 node.py 5000 --api`. Takes precedence over [`respond`].
    ///
    /// [`respond`]: MockRunner::respond
    pub fn respond_to_command(&mut self, command_line: &str, response: MockResponse) {
        self.responses.insert(command_line.to_string(), response);
    }

    /// Every invocation, in order.
    pub fn invocations(&self) -> Vec<&Invocation> {
        self.calls.iter().map(|(inv, _)| inv).collect()
    }

    /// Every invocation with the stdio mode it was run under.
    pub fn calls(&self) -> &[(Invocation, StdioMode)] {
        &self.calls
    }

    /// Number of times `program` was invoked.
    pub fn calls_to(&self, program: &str) -> usize {
        self.calls
            .iter()
            .filter(|(inv, _)| inv.program == program)
            .count()
    }

    /// Most recent invocation of `program`.
    pub fn last_call_to(&self, program: &str) -> Option<&Invocation> {
        self.calls
            .iter()
            .rev()
            .map(|(inv, _)| inv)
            .find(|inv| inv.program == program)
    }
}

impl ProcessRunner for MockRunner {
    fn run(
        &mut self,
        invocation: &Invocation,
        stdio: StdioMode,
    ) -> std::io::Result<CommandResult> {
        self.calls.push((invocation.clone(), stdio));

        let response = self
            .responses
            .get(&invocation.to_string())
            .or_else(|| self.responses.get(&invocation.program));

        match response {
            Some(MockResponse::Missing) => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: command not found", invocation.program),
            )),
            Some(MockResponse::Exit { code, stdout }) => Ok(CommandResult::from_exit(
                *code,
                stdout.clone(),
                String::new(),
                Duration::ZERO,
            )),
            None => Ok(CommandResult::from_exit(
                Some(0),
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
        }
    }
}
