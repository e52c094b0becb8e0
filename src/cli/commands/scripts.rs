//! Scripts command implementation.
//!
//! The `quantum-bootstrap scripts` command renders the installer scripts
//! and README that ship in the package.

use std::path::{Path, PathBuf};

use crate::cli::args::ScriptsArgs;
use crate::config::InstallerConfig;
use crate::error::Result;
use crate::scripts::{self, ScriptKind};
use crate::shell::PlatformProfile;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The scripts command implementation.
pub struct ScriptsCommand {
    project_root: PathBuf,
    config: InstallerConfig,
    args: ScriptsArgs,
}

impl ScriptsCommand {
    /// Create a new scripts command.
    pub fn new(project_root: &Path, config: InstallerConfig, args: ScriptsArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    /// File printed when no `--out` is given.
    pub fn selected(&self) -> ScriptKind {
        self.args.script.unwrap_or_else(|| {
            ScriptKind::for_profile(self.args.platform.unwrap_or_else(PlatformProfile::current))
        })
    }
}

impl Command for ScriptsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.out {
            Some(out) => {
                let dir = self.project_root.join(out);
                for path in scripts::write_all(&dir, &self.config)? {
                    ui.success(&format!("Wrote {}", path.display()));
                }
            }
            None => {
                print!("{}", scripts::render(self.selected(), &self.config)?);
            }
        }

        Ok(CommandResult::success())
    }
}
