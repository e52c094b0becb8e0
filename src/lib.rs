//! quantum-bootstrap - installer and packager for the Quantum Blockchain Wallet node.
//!
//! Replaces the per-platform `install.sh` / `install.bat` scripts with one
//! program that checks for Python, installs the node's dependencies and
//! hands off to the node. It can also render those scripts and build the
//! distributable zip they ship in.
//!
//! # Modules
//!
//! - [`bootstrap`] - The install-and-launch sequence
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and `${variable}` interpolation
//! - [`error`] - Error types and result aliases
//! - [`package`] - Distribution zip builder
//! - [`scripts`] - Embedded installer script templates
//! - [`shell`] - Subprocess execution and platform profiles
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use quantum_bootstrap::config::{resolve_string, InstallerConfig, InterpolationContext};
//!
//! let ctx = InterpolationContext::from_config(&InstallerConfig::default());
//! let line = resolve_string("inline", "${python_posix} ${node_program} ${node_port}", &ctx).unwrap();
//! assert_eq!(line, "python3 node.py 5000");
//! ```
//!
//! For end-to-end runs, see the integration tests.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod package;
pub mod scripts;
pub mod shell;
pub mod ui;

pub use error::{BootstrapError, Result};
