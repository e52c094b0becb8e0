//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the
//! `.quantum/installer.yml` file. Every field has a default, so an empty
//! file (or no file at all) reproduces the stock installer exactly.

use serde::{Deserialize, Serialize};

/// Root configuration structure for installer.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Product name shown in banners and the README.
    pub app_name: String,

    /// Short name used in the "Starting ... on port" announcement.
    pub node_name: String,

    /// Dependency manifest handed to the package installer.
    pub manifest: String,

    /// Script the interpreter runs to start the node.
    pub node_program: String,

    /// Port passed to the node as its first argument.
    pub node_port: u16,

    /// Flag appended after the port.
    pub api_flag: String,

    /// Host shown in the API announcement.
    pub api_host: String,

    /// Port shown in the API announcement.
    pub api_port: u16,

    /// Oldest interpreter release the error message asks for.
    pub min_python: String,

    /// Interpreter executable (defaults to the platform profile's).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,

    /// Package installer executable (defaults to the platform profile's).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_installer: Option<String>,

    /// Force or suppress the pause before exit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause: Option<bool>,

    /// Distribution package settings.
    pub package: PackageConfig,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            app_name: "Quantum Blockchain Wallet".to_string(),
            node_name: "Quantum node".to_string(),
            manifest: "requirements.txt".to_string(),
            node_program: "node.py".to_string(),
            node_port: 5000,
            api_flag: "--api".to_string(),
            api_host: "localhost".to_string(),
            api_port: 8545,
            min_python: "3.7".to_string(),
            interpreter: None,
            package_installer: None,
            pause: None,
            package: PackageConfig::default(),
        }
    }
}

impl InstallerConfig {
    /// URL announced as the node's API address.
    pub fn api_url(&self) -> String {
        format!("http://{}:{}", self.api_host, self.api_port)
    }
}

/// Settings for the `package` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Base name of the archive and its top-level folder.
    pub name: String,

    /// Version suffix (`<name>_v<version>`).
    pub version: String,

    /// Files and directories copied from the project root.
    pub sources: Vec<String>,

    /// Directory names and file extensions left out when walking sources.
    pub exclude: Vec<String>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: "Quantum_Wallet".to_string(),
            version: "1.0".to_string(),
            sources: vec![
                "core".to_string(),
                "network".to_string(),
                "node.py".to_string(),
                "requirements.txt".to_string(),
            ],
            exclude: vec!["__pycache__".to_string(), ".pyc".to_string()],
        }
    }
}

impl PackageConfig {
    /// Folder name inside the archive, e.g. `Quantum_Wallet_v1.0`.
    pub fn package_name(&self) -> String {
        format!("{}_v{}", self.name, self.version)
    }
}
