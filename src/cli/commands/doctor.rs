//! Doctor command implementation.
//!
//! The `quantum-bootstrap doctor` command reports whether everything the
//! install sequence needs is in place. It only asks the interpreter and
//! package installer for their versions; nothing is installed or launched.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::bootstrap::InterpreterVersion;
use crate::cli::args::DoctorArgs;
use crate::config::InstallerConfig;
use crate::error::Result;
use crate::shell::{Invocation, PlatformProfile, ProcessRunner, StdioMode, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// An executable probed with `--version`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCheck {
    pub program: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A project file the sequence depends on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileCheck {
    pub path: PathBuf,
    pub present: bool,
}

/// Full environment report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorReport {
    pub platform: PlatformProfile,
    pub interpreter: ToolCheck,
    pub package_installer: ToolCheck,
    pub manifest: FileCheck,
    pub node_program: FileCheck,
    pub ready: bool,
}

/// The doctor command implementation.
pub struct DoctorCommand {
    project_root: PathBuf,
    config: InstallerConfig,
    args: DoctorArgs,
}

impl DoctorCommand {
    /// Create a new doctor command.
    pub fn new(project_root: &Path, config: InstallerConfig, args: DoctorArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    fn profile(&self) -> PlatformProfile {
        self.args.platform.unwrap_or_else(PlatformProfile::current)
    }

    /// Gather the report using `runner` for the version probes.
    pub fn report(&self, runner: &mut dyn ProcessRunner) -> DoctorReport {
        let profile = self.profile();
        let python = self
            .config
            .interpreter
            .as_deref()
            .unwrap_or_else(|| profile.interpreter());
        let pip = self
            .config
            .package_installer
            .as_deref()
            .unwrap_or_else(|| profile.package_installer());

        let interpreter = self.probe(runner, python, true);
        let package_installer = self.probe(runner, pip, false);
        let manifest = self.file(&self.config.manifest);
        let node_program = self.file(&self.config.node_program);

        let ready = interpreter.found
            && package_installer.found
            && manifest.present
            && node_program.present;

        DoctorReport {
            platform: profile,
            interpreter,
            package_installer,
            manifest,
            node_program,
            ready,
        }
    }

    fn probe(&self, runner: &mut dyn ProcessRunner, program: &str, parse: bool) -> ToolCheck {
        let inv = Invocation::new(program)
            .arg("--version")
            .in_dir(&self.project_root);

        match runner.run(&inv, StdioMode::Captured) {
            Ok(result) if result.success => {
                let banner = format!("{}{}", result.stdout, result.stderr);
                let version = if parse {
                    InterpreterVersion::parse_banner(&banner).map(|v| v.to_string())
                } else {
                    banner.lines().next().map(|l| l.trim().to_string())
                };
                ToolCheck {
                    program: program.to_string(),
                    found: true,
                    version,
                }
            }
            Ok(result) => {
                tracing::debug!("{} exited with {:?}", inv, result.exit_code);
                ToolCheck {
                    program: program.to_string(),
                    found: false,
                    version: None,
                }
            }
            Err(e) => {
                tracing::debug!("Could not spawn {}: {}", program, e);
                ToolCheck {
                    program: program.to_string(),
                    found: false,
                    version: None,
                }
            }
        }
    }

    fn file(&self, relative: &str) -> FileCheck {
        FileCheck {
            path: PathBuf::from(relative),
            present: self.project_root.join(relative).is_file(),
        }
    }

    /// Run against an explicit process runner.
    pub fn execute_with(
        &self,
        runner: &mut dyn ProcessRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let report = self.report(runner);

        if self.args.json {
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            println!("{}", json);
        } else {
            show_report(&report, ui);
        }

        Ok(if report.ready {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}

fn show_report(report: &DoctorReport, ui: &mut dyn UserInterface) {
    ui.show_header(&format!("Environment check ({})", report.platform));

    for tool in [&report.interpreter, &report.package_installer] {
        match (&tool.version, tool.found) {
            (Some(v), true) => ui.success(&format!("{} {}", tool.program, v)),
            (None, true) => ui.success(&tool.program),
            (_, false) => ui.error(&format!("{} not found", tool.program)),
        }
    }

    for file in [&report.manifest, &report.node_program] {
        if file.present {
            ui.success(&file.path.display().to_string());
        } else {
            ui.error(&format!("{} missing", file.path.display()));
        }
    }

    ui.message("");
    if report.ready {
        ui.success("Ready to install.");
    } else {
        ui.warning("Not ready: fix the items above, then run install.");
    }
}

impl Command for DoctorCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut runner = SystemRunner::new();
        self.execute_with(&mut runner, ui)
    }
}
