//! The fixed set of invocations a bootstrap run performs.

use std::path::{Path, PathBuf};

use crate::config::InstallerConfig;
use crate::shell::{Invocation, PlatformProfile};

/// Everything a bootstrap run will do, decided before anything runs.
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    /// Platform flavour the plan was built for.
    pub profile: PlatformProfile,

    /// Step A: `<python> --version`.
    pub version_check: Invocation,

    /// Step B: `<pip> install -r <manifest>`.
    pub dependency_install: Invocation,

    /// Step D: `<python> <node_program> <port> <api_flag>`.
    pub launch: Invocation,

    /// Product name for the opening banner.
    pub app_name: String,

    /// Node name for the launch announcement.
    pub node_name: String,

    /// Port announced and passed to the node.
    pub node_port: u16,

    /// API address announced before launch.
    pub api_url: String,

    /// Manifest path, relative to the project root.
    pub manifest: String,

    /// Minimum interpreter release named in messages.
    pub min_python: String,

    /// Whether to wait for acknowledgement before exiting.
    pub pause: bool,

    /// Directory every step runs in.
    pub project_root: PathBuf,
}

impl BootstrapPlan {
    /// Build the plan for a project.
    pub fn new(config: &InstallerConfig, profile: PlatformProfile, project_root: &Path) -> Self {
        let python = config
            .interpreter
            .clone()
            .unwrap_or_else(|| profile.interpreter().to_string());
        let pip = config
            .package_installer
            .clone()
            .unwrap_or_else(|| profile.package_installer().to_string());

        let version_check = Invocation::new(&python)
            .arg("--version")
            .in_dir(project_root);

        let dependency_install = Invocation::new(pip)
            .args(["install", "-r"])
            .arg(&config.manifest)
            .in_dir(project_root);

        let launch = Invocation::new(python)
            .arg(&config.node_program)
            .arg(config.node_port.to_string())
            .arg(&config.api_flag)
            .in_dir(project_root);

        Self {
            profile,
            version_check,
            dependency_install,
            launch,
            app_name: config.app_name.clone(),
            node_name: config.node_name.clone(),
            node_port: config.node_port,
            api_url: config.api_url(),
            manifest: config.manifest.clone(),
            min_python: config.min_python.clone(),
            pause: config.pause.unwrap_or_else(|| profile.pauses_on_exit()),
            project_root: project_root.to_path_buf(),
        }
    }

    /// The three invocations in execution order.
    pub fn invocations(&self) -> [&Invocation; 3] {
        [&self.version_check, &self.dependency_install, &self.launch]
    }
}
