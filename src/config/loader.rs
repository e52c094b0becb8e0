//! Configuration file discovery and loading.

use crate::config::schema::InstallerConfig;
use crate::error::{BootstrapError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding installer settings, relative to the project root.
pub const CONFIG_DIR: &str = ".quantum";

/// Settings file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "installer.yml";

/// Default location of the settings file for a project.
pub fn default_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load configuration for a project.
///
/// With an explicit path the file must exist. Without one, the default
/// location is tried and a missing file yields [`InstallerConfig::default`].
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<InstallerConfig> {
    match explicit {
        Some(path) => {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                project_root.join(path)
            };
            if !path.exists() {
                return Err(BootstrapError::ConfigNotFound { path });
            }
            load_config_file(&path)
        }
        None => {
            let path = default_config_path(project_root);
            if path.exists() {
                load_config_file(&path)
            } else {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(InstallerConfig::default())
            }
        }
    }
}

/// Load and parse a single configuration file.
pub fn load_config_file(path: &Path) -> Result<InstallerConfig> {
    let content = fs::read_to_string(path)?;
    tracing::debug!("Loading config from {}", path.display());
    parse_config(&content, path)
}

/// Parse configuration text, attributing errors to `path`.
pub fn parse_config(content: &str, path: &Path) -> Result<InstallerConfig> {
    // An empty document deserializes as unit, not as a mapping.
    if content.trim().is_empty() {
        return Ok(InstallerConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| BootstrapError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
