//! Environment bootstrap for the wallet node.
//!
//! A run is planned up front ([`BootstrapPlan`]) and then executed step by
//! step ([`Bootstrap`]) against a [`ProcessRunner`](crate::shell::ProcessRunner),
//! so the whole sequence can be exercised with a mock runner.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use quantum_bootstrap::bootstrap::{Bootstrap, BootstrapOutcome, BootstrapPlan};
//! use quantum_bootstrap::config::InstallerConfig;
//! use quantum_bootstrap::shell::{MockRunner, PlatformProfile};
//! use quantum_bootstrap::ui::MockUI;
//!
//! let plan = BootstrapPlan::new(
//!     &InstallerConfig::default(),
//!     PlatformProfile::Posix,
//!     Path::new("."),
//! );
//! let mut runner = MockRunner::new();
//! let mut ui = MockUI::new();
//!
//! let outcome = Bootstrap::new(&plan).run(&mut runner, &mut ui).unwrap();
//! assert_eq!(outcome, BootstrapOutcome::Launched { exit_code: Some(0) });
//! assert_eq!(
//!     runner.last_call_to("python3").unwrap().args,
//!     vec!["node.py", "5000", "--api"]
//! );
//! ```

pub mod plan;
pub mod sequence;
pub mod version;

pub use plan::BootstrapPlan;
pub use sequence::{Bootstrap, BootstrapOutcome};
pub use version::InterpreterVersion;
