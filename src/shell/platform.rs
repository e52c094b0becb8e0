//! Platform profiles and CI detection.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Which installer script flavour to behave like.
///
/// The Windows batch installer calls `python`/`pip` and pauses before the
/// console window closes. The POSIX shell installer calls `python3`/`pip3`
/// and exits straight away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlatformProfile {
    Windows,
    Posix,
}

impl PlatformProfile {
    /// Profile matching the operating system this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            PlatformProfile::Windows
        } else {
            PlatformProfile::Posix
        }
    }

    /// Default interpreter executable.
    pub fn interpreter(&self) -> &'static str {
        match self {
            PlatformProfile::Windows => "python",
            PlatformProfile::Posix => "python3",
        }
    }

    /// Default package installer executable.
    pub fn package_installer(&self) -> &'static str {
        match self {
            PlatformProfile::Windows => "pip",
            PlatformProfile::Posix => "pip3",
        }
    }

    /// Whether the installer waits for a keypress before exiting.
    pub fn pauses_on_exit(&self) -> bool {
        matches!(self, PlatformProfile::Windows)
    }

    /// File name of the generated installer script for this profile.
    pub fn script_name(&self) -> &'static str {
        match self {
            PlatformProfile::Windows => "install.bat",
            PlatformProfile::Posix => "install.sh",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformProfile::Windows => "windows",
            PlatformProfile::Posix => "posix",
        }
    }
}

impl fmt::Display for PlatformProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win" => Ok(Self::Windows),
            "posix" | "unix" | "linux" | "macos" => Ok(Self::Posix),
            _ => Err(format!("unknown platform profile: {}", s)),
        }
    }
}

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()` and to suppress the
/// Windows-style pause. Checks common CI environment variables: `CI`,
/// `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}
