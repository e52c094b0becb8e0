//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use quantum_bootstrap::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//!
//! // Use ui in code under test...
//! ui.message("Installing dependencies...");
//! ui.success("Ready to install.");
//!
//! // Assert on captured interactions
//! assert!(ui.has_message("Installing dependencies"));
//! assert!(ui.has_success("Ready to install."));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    fatals: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    pauses: Vec<String>,
    spinner_results: Rc<RefCell<Vec<(String, SpinnerStatus)>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get the lines written through `fatal`, verbatim.
    pub fn fatals(&self) -> &[String] {
        &self.fatals
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get every pause prompt shown.
    pub fn pauses(&self) -> &[String] {
        &self.pauses
    }

    /// Finish messages and outcomes of every spinner, in finish order.
    pub fn spinner_results(&self) -> Vec<(String, SpinnerStatus)> {
        self.spinner_results.borrow().clone()
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn fatal(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
        self.fatals.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            results: Rc::clone(&self.spinner_results),
            ..MockSpinner::new()
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn pause(&mut self, msg: &str) {
        self.pauses.push(msg.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

/// Mock spinner that captures its messages.
///
/// Spinners created by [`MockUI`] also report their outcome back to it.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
    results: Rc<RefCell<Vec<(String, SpinnerStatus)>>>,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Get the final status.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }

    fn finish(&mut self, msg: &str, status: SpinnerStatus) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(status);
        self.results.borrow_mut().push((msg.to_string(), status));
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish(msg, SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(msg, SpinnerStatus::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();

        ui.message("Hello");
        ui.success("Done");
        ui.warning("Be careful");
        ui.error("Oops");

        assert_eq!(ui.messages(), &["Hello"]);
        assert_eq!(ui.successes(), &["Done"]);
        assert_eq!(ui.warnings(), &["Be careful"]);
        assert_eq!(ui.errors(), &["Oops"]);
    }

    #[test]
    fn mock_ui_records_pauses() {
        let mut ui = MockUI::new();
        ui.pause("Press Enter to continue...");
        assert_eq!(ui.pauses(), &["Press Enter to continue..."]);
    }

    #[test]
    fn spinner_outcomes_flow_back_to_ui() {
        let mut ui = MockUI::new();
        let mut spinner = ui.start_spinner("Checking for python3...");
        spinner.finish_error("python3 not found");
        drop(spinner);

        assert_eq!(ui.spinners(), &["Checking for python3..."]);
        assert_eq!(
            ui.spinner_results(),
            vec![("python3 not found".to_string(), SpinnerStatus::Error)]
        );
    }

    #[test]
    fn standalone_spinner_tracks_status() {
        let mut spinner = MockSpinner::new();
        spinner.set_message("working");
        spinner.finish_success("ok");
        assert_eq!(spinner.messages(), &["working"]);
        assert_eq!(spinner.finish_message(), Some("ok"));
        assert_eq!(spinner.status(), Some(SpinnerStatus::Success));
    }

    #[test]
    fn with_mode_sets_mode() {
        let ui = MockUI::with_mode(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
