//! Configuration loading and script interpolation.
//!
//! This module handles:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - `${variable}` templating in [`interpolation`]
//!
//! # Example
//!
//! ```
//! use quantum_bootstrap::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".quantum");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("installer.yml"), "node_port: 6000").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.node_port, 6000);
//! assert_eq!(config.api_port, 8545);
//! ```
//!
//! # Configuration File Location
//!
//! `<project>/.quantum/installer.yml`, unless `--config` names another file.
//! Without a file every setting takes its stock value.

pub mod interpolation;
pub mod loader;
pub mod schema;

pub use interpolation::{
    extract_variables, parse_interpolation, resolve_string, InterpolationContext, Segment,
};
pub use loader::{
    default_config_path, load_config, load_config_file, parse_config, CONFIG_DIR, CONFIG_FILE,
};
pub use schema::{InstallerConfig, PackageConfig};
