//! Install command implementation.
//!
//! The `quantum-bootstrap install` command (also the default when no
//! subcommand is given) checks the interpreter, installs the manifest's
//! dependencies and hands the terminal over to the node.

use std::path::{Path, PathBuf};

use crate::bootstrap::{Bootstrap, BootstrapPlan};
use crate::cli::args::InstallArgs;
use crate::config::InstallerConfig;
use crate::error::{BootstrapError, Result};
use crate::shell::{PlatformProfile, ProcessRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const PAUSE_PROMPT: &str = "Press Enter to continue...";

/// The install command implementation.
pub struct InstallCommand {
    project_root: PathBuf,
    config: InstallerConfig,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(project_root: &Path, config: InstallerConfig, args: InstallArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InstallArgs {
        &self.args
    }

    /// Platform profile in effect: the `--platform` flag, else the host's.
    pub fn profile(&self) -> PlatformProfile {
        self.args.platform.unwrap_or_else(PlatformProfile::current)
    }

    /// The plan this command would run.
    pub fn plan(&self) -> BootstrapPlan {
        BootstrapPlan::new(&self.config, self.profile(), &self.project_root)
    }

    /// Run against an explicit process runner.
    pub fn execute_with(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let plan = self.plan();
        let pause = self.should_pause(&plan, ui);

        let outcome = Bootstrap::new(&plan)
            .dry_run(self.args.dry_run)
            .run(runner, ui);

        match outcome {
            Ok(outcome) => {
                let code = outcome.exit_code();
                tracing::debug!("Bootstrap finished with exit code {}", code);
                if pause && !self.args.dry_run {
                    ui.pause(PAUSE_PROMPT);
                }
                Ok(if code == 0 {
                    CommandResult::success()
                } else {
                    CommandResult::failure(code)
                })
            }
            Err(
                e @ (BootstrapError::InterpreterNotFound { .. }
                | BootstrapError::DependencyInstallFailed { .. }),
            ) => {
                ui.fatal(&format!("ERROR: {}", e));
                if pause {
                    ui.pause(PAUSE_PROMPT);
                }
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }

    fn should_pause(&self, plan: &BootstrapPlan, ui: &dyn UserInterface) -> bool {
        plan.pause && !self.args.no_pause && !self.args.non_interactive && ui.is_interactive()
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut runner = SystemRunner::new();
        self.execute_with(&mut runner, ui)
    }
}
