//! Package command implementation.
//!
//! The `quantum-bootstrap package` command bundles the node sources and
//! generated installers into a distributable zip.

use std::path::{Path, PathBuf};

use crate::cli::args::PackageArgs;
use crate::config::InstallerConfig;
use crate::error::Result;
use crate::package::build_package;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The package command implementation.
pub struct PackageCommand {
    project_root: PathBuf,
    config: InstallerConfig,
    args: PackageArgs,
}

impl PackageCommand {
    /// Create a new package command.
    ///
    /// `--name` and `--pkg-version` override the configured package settings.
    pub fn new(project_root: &Path, mut config: InstallerConfig, args: PackageArgs) -> Self {
        if let Some(name) = &args.name {
            config.package.name = name.clone();
        }
        if let Some(version) = &args.pkg_version {
            config.package.version = version.clone();
        }
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    fn out_dir(&self) -> PathBuf {
        match &self.args.out_dir {
            Some(dir) => self.project_root.join(dir),
            None => self.project_root.clone(),
        }
    }
}

impl Command for PackageCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut spinner = ui.start_spinner(&format!(
            "Packaging {}...",
            self.config.package.package_name()
        ));

        let report = match build_package(&self.project_root, &self.config, &self.out_dir()) {
            Ok(report) => report,
            Err(e) => {
                spinner.finish_error("Packaging failed");
                return Err(e);
            }
        };

        spinner.finish_success(&format!("Package created: {}", report.path.display()));
        ui.message(&format!("  Size: {} MB", report.size_display()));
        ui.message(&format!("  Location: {}", report.location().display()));

        Ok(CommandResult::success())
    }
}
