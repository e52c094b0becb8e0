//! The four-step install-and-launch sequence.
//!
//! 1. Check the interpreter answers `--version`.
//! 2. Install the manifest's dependencies.
//! 3. Announce the node's port and API address.
//! 4. Hand off to the node and wait for it.
//!
//! Steps 1 and 2 are fatal on failure. Step 4's exit status is passed
//! through without interpretation.

use crate::error::{BootstrapError, Result};
use crate::shell::{Invocation, ProcessRunner, StdioMode};
use crate::ui::UserInterface;

use super::plan::BootstrapPlan;
use super::version::InterpreterVersion;

/// How a bootstrap run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The node was launched and has exited.
    Launched { exit_code: Option<i32> },
    /// Nothing was executed.
    DryRun,
}

impl BootstrapOutcome {
    /// Process exit code to report for this outcome.
    ///
    /// Mirrors the node's own status; a node killed by a signal maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapOutcome::Launched { exit_code } => exit_code.unwrap_or(1),
            BootstrapOutcome::DryRun => 0,
        }
    }
}

/// Runs a [`BootstrapPlan`].
pub struct Bootstrap<'a> {
    plan: &'a BootstrapPlan,
    dry_run: bool,
}

impl<'a> Bootstrap<'a> {
    pub fn new(plan: &'a BootstrapPlan) -> Self {
        Self {
            plan,
            dry_run: false,
        }
    }

    /// Print the plan instead of executing it.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Execute the sequence.
    pub fn run(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<BootstrapOutcome> {
        ui.show_header(&format!("Installing {}...", self.plan.app_name));

        if self.dry_run {
            ui.message("Dry run, nothing will be executed:");
            for inv in self.plan.invocations() {
                ui.message(&format!("  would run: {}", inv));
            }
            return Ok(BootstrapOutcome::DryRun);
        }

        self.check_interpreter(runner, ui)?;

        ui.message("Installing dependencies...");
        self.install_dependencies(runner, ui)?;

        self.announce(ui);

        self.launch(runner, ui)
    }

    /// In verbose mode, show the command line about to be spawned.
    fn echo(&self, inv: &Invocation, ui: &mut dyn UserInterface) {
        if ui.output_mode().shows_commands() {
            ui.message(&format!("$ {}", inv));
        }
    }

    /// Step A.
    fn check_interpreter(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<InterpreterVersion>> {
        let inv = &self.plan.version_check;
        let not_found = || BootstrapError::InterpreterNotFound {
            program: inv.program.clone(),
            min_version: self.plan.min_python.clone(),
        };

        self.echo(inv, ui);
        let mut spinner = ui.start_spinner(&format!("Checking for {}...", inv.program));

        let result = match runner.run(inv, StdioMode::Captured) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!("Could not spawn {}: {}", inv.program, e);
                spinner.finish_error(&format!("{} not found", inv.program));
                return Err(not_found());
            }
        };

        if !result.success {
            tracing::debug!("{} exited with {:?}", inv, result.exit_code);
            spinner.finish_error(&format!("{} not usable", inv.program));
            return Err(not_found());
        }

        let banner = format!("{}{}", result.stdout, result.stderr);
        let version = InterpreterVersion::parse_banner(&banner);

        match version {
            Some(v) => {
                spinner.finish_success(&format!("Found Python {}", v));
                match self.plan.min_python.parse::<InterpreterVersion>() {
                    Ok(min) if !v.satisfies(&min) => {
                        ui.warning(&format!(
                            "Python {} is older than {}; the node may not start.",
                            v, self.plan.min_python
                        ));
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Ignoring minimum Python version: {}", e),
                }
            }
            None => {
                tracing::debug!("Unrecognised version banner: {:?}", banner.trim());
                spinner.finish_success(&format!("Found {}", inv.program));
            }
        }

        Ok(version)
    }

    /// Step B.
    fn install_dependencies(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let inv = &self.plan.dependency_install;
        self.echo(inv, ui);
        let failed = |code| BootstrapError::DependencyInstallFailed {
            manifest: self.plan.manifest.clone(),
            code,
        };

        match runner.run(inv, StdioMode::Inherited) {
            Ok(result) if result.success => Ok(()),
            Ok(result) => {
                tracing::debug!("{} exited with {:?}", inv, result.exit_code);
                Err(failed(result.exit_code))
            }
            Err(e) => {
                tracing::debug!("Could not spawn {}: {}", inv.program, e);
                Err(failed(None))
            }
        }
    }

    /// Step C. These lines are announcements only; nothing checks them.
    fn announce(&self, ui: &mut dyn UserInterface) {
        ui.message("");
        ui.message("Installation complete!");
        ui.message("");
        ui.message(&format!(
            "Starting {} on port {}...",
            self.plan.node_name, self.plan.node_port
        ));
        ui.message(&format!("API will be available at {}", self.plan.api_url));
        ui.message("");
    }

    /// Step D.
    fn launch(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<BootstrapOutcome> {
        let inv = &self.plan.launch;
        tracing::debug!("Handing off to {}", inv);
        self.echo(inv, ui);

        let result = runner
            .run(inv, StdioMode::Inherited)
            .map_err(|e| BootstrapError::LaunchFailed {
                command: inv.to_string(),
                message: e.to_string(),
            })?;

        Ok(BootstrapOutcome::Launched {
            exit_code: result.exit_code,
        })
    }
}
