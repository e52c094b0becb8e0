//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::scripts::ScriptKind;
use crate::shell::PlatformProfile;

/// Cross-platform installer and packager for the Quantum Blockchain Wallet node.
#[derive(Debug, Parser)]
#[command(name = "quantum-bootstrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .quantum/installer.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check Python, install dependencies and start the node (default)
    Install(InstallArgs),

    /// Report whether the environment is ready, without changing anything
    Doctor(DoctorArgs),

    /// Render the installer scripts and README
    Scripts(ScriptsArgs),

    /// Build the distributable zip package
    Package(PackageArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Show the commands that would run without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Never wait for Enter before exiting
    #[arg(long)]
    pub no_pause: bool,

    /// Behave like the given platform's installer
    #[arg(long, value_enum)]
    pub platform: Option<PlatformProfile>,

    /// No prompts or pauses
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the `doctor` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DoctorArgs {
    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Check the given platform's executables
    #[arg(long, value_enum)]
    pub platform: Option<PlatformProfile>,
}

/// Arguments for the `scripts` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ScriptsArgs {
    /// Write all generated files into this directory
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// File to print (defaults to the platform's installer)
    #[arg(value_enum)]
    pub script: Option<ScriptKind>,

    /// Platform whose installer is printed by default
    #[arg(long, value_enum)]
    pub platform: Option<PlatformProfile>,
}

/// Arguments for the `package` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PackageArgs {
    /// Directory to write the archive to (defaults to the project root)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Package base name
    #[arg(long)]
    pub name: Option<String>,

    /// Package version
    #[arg(long, value_name = "VERSION")]
    pub pkg_version: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
