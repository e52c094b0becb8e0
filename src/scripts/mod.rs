//! Installer scripts and README embedded at compile time.
//!
//! The shipped package carries a shell script, a batch file and a README
//! that walk users through the same steps the `install` command performs.
//! They are rendered from `templates/` with `${variable}` interpolation so
//! that a customised `installer.yml` flows into them.

use crate::config::{resolve_string, InstallerConfig, InterpolationContext};
use crate::error::{BootstrapError, Result};
use crate::shell::PlatformProfile;
use include_dir::{include_dir, Dir};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Files generated for the distributable package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ScriptKind {
    /// POSIX shell installer.
    #[value(name = "install.sh", alias = "sh")]
    InstallSh,
    /// Windows batch installer.
    #[value(name = "install.bat", alias = "bat")]
    InstallBat,
    /// Plain-text README.
    #[value(name = "README.txt", alias = "readme")]
    Readme,
}

impl ScriptKind {
    /// Every generated file, in the order they are written.
    pub const ALL: [ScriptKind; 3] = [
        ScriptKind::Readme,
        ScriptKind::InstallBat,
        ScriptKind::InstallSh,
    ];

    /// File name inside the package and the templates directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ScriptKind::InstallSh => "install.sh",
            ScriptKind::InstallBat => "install.bat",
            ScriptKind::Readme => "README.txt",
        }
    }

    /// The installer a given platform runs.
    pub fn for_profile(profile: PlatformProfile) -> Self {
        match profile {
            PlatformProfile::Windows => ScriptKind::InstallBat,
            PlatformProfile::Posix => ScriptKind::InstallSh,
        }
    }

    /// Whether the file should carry the executable bit.
    pub fn is_executable(self) -> bool {
        matches!(self, ScriptKind::InstallSh)
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

fn template_source(kind: ScriptKind) -> Result<&'static str> {
    let name = kind.file_name();
    let file = TEMPLATES_DIR
        .get_file(name)
        .ok_or_else(|| BootstrapError::TemplateError {
            template: name.to_string(),
            message: "template is not embedded".to_string(),
        })?;

    file.contents_utf8()
        .ok_or_else(|| BootstrapError::TemplateError {
            template: name.to_string(),
            message: "Invalid UTF-8".to_string(),
        })
}

/// Variables for the generated files.
///
/// Adds `readme_title` on top of the standard context.
pub fn script_context(config: &InstallerConfig) -> InterpolationContext {
    let mut ctx = InterpolationContext::from_config(config);
    ctx.set(
        "readme_title",
        &format!(
            "{} v{}",
            config.app_name.to_uppercase(),
            config.package.version
        ),
    );
    ctx
}

/// Render one generated file.
///
/// The batch file is emitted with CRLF line endings.
///
/// # Errors
///
/// Returns `TemplateError` if the template references an unknown variable.
pub fn render(kind: ScriptKind, config: &InstallerConfig) -> Result<String> {
    let source = template_source(kind)?;
    let rendered = resolve_string(kind.file_name(), source, &script_context(config))?;

    Ok(match kind {
        ScriptKind::InstallBat => to_crlf(&rendered),
        _ => rendered,
    })
}

fn to_crlf(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}

/// Write every generated file into `dir`, creating it if needed.
///
/// Returns the written paths in [`ScriptKind::ALL`] order.
pub fn write_all(dir: &Path, config: &InstallerConfig) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(ScriptKind::ALL.len());
    for kind in ScriptKind::ALL {
        let path = dir.join(kind.file_name());
        fs::write(&path, render(kind, config)?)?;
        if kind.is_executable() {
            mark_executable(&path)?;
        }
        tracing::debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
