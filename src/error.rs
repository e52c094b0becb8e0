//! Error types for bootstrap operations.
//!
//! This module defines [`BootstrapError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `BootstrapError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `BootstrapError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bootstrap operations.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The interpreter could not be spawned or its version query failed.
    #[error("Python not found. Please install Python {min_version} or later.")]
    InterpreterNotFound {
        program: String,
        min_version: String,
    },

    /// The package installer exited non-zero or could not be spawned.
    #[error("Failed to install dependencies.")]
    DependencyInstallFailed {
        manifest: String,
        code: Option<i32>,
    },

    /// The node program could not be started at all.
    #[error("Failed to launch '{command}': {message}")]
    LaunchFailed { command: String, message: String },

    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A script template could not be found or rendered.
    #[error("Template '{template}': {message}")]
    TemplateError { template: String, message: String },

    /// A file or directory that must go into the package is missing.
    #[error("Package source missing: {path}")]
    PackageSourceMissing { path: PathBuf },

    /// A package source is absolute or climbs out of the project root.
    #[error("Package source must stay inside the project: {source_path}")]
    UnsafePackageSource { source_path: String },

    /// Writing the distribution archive failed.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;
