//! Distribution package builder.
//!
//! Produces `<name>_v<version>.zip` holding the node sources plus the
//! generated installers and README, all under one top-level folder:
//!
//! ```text
//! Quantum_Wallet_v1.0/
//!   README.txt
//!   core/...
//!   install.bat
//!   install.sh        (mode 0755)
//!   network/...
//!   node.py
//!   requirements.txt
//! ```
//!
//! Entries are streamed straight into the archive, so nothing is staged on
//! disk next to it.

pub mod archive;

pub use archive::{ArchiveBuilder, ArchiveEntry, EntrySource};

use crate::config::InstallerConfig;
use crate::error::{BootstrapError, Result};
use crate::scripts::{self, ScriptKind};
use std::fs;
use std::path::{Component, Path, PathBuf};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// What a finished package build produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageReport {
    /// Path of the written archive.
    pub path: PathBuf,
    /// Archive size on disk.
    pub size_bytes: u64,
    /// Archive entry names in written order.
    pub entries: Vec<String>,
}

impl PackageReport {
    /// Size in mebibytes.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_MB
    }

    /// Size formatted with two decimals, e.g. `0.01`.
    pub fn size_display(&self) -> String {
        format!("{:.2}", self.size_mb())
    }

    /// Directory containing the archive.
    pub fn location(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Path the archive for `config` will be written to inside `out_dir`.
pub fn archive_path(out_dir: &Path, config: &InstallerConfig) -> PathBuf {
    out_dir.join(format!("{}.zip", config.package.package_name()))
}

/// Build the distribution archive.
///
/// Sources are resolved against `project_root`; the archive lands in
/// `out_dir`, replacing any earlier build.
///
/// # Errors
///
/// Returns `UnsafePackageSource` for a source that is absolute or contains
/// `..`, and `PackageSourceMissing` for the first configured source that
/// does not exist. Both are reported before anything is written.
pub fn build_package(
    project_root: &Path,
    config: &InstallerConfig,
    out_dir: &Path,
) -> Result<PackageReport> {
    let relative = config
        .package
        .sources
        .iter()
        .map(|source| archive_relative(source).map(|rel| (source, rel)))
        .collect::<Result<Vec<_>>>()?;

    let folder = config.package.package_name();
    let mut builder = ArchiveBuilder::new().exclude(config.package.exclude.iter().cloned());

    for (source, rel) in relative {
        let path = project_root.join(source);
        let name = format!("{}/{}", folder, rel);

        if path.is_dir() {
            builder.add_dir(&name, &path)?;
        } else if path.is_file() {
            builder.add_file(name, &path)?;
        } else {
            return Err(BootstrapError::PackageSourceMissing { path });
        }
    }

    for kind in ScriptKind::ALL {
        let mode = if kind.is_executable() { 0o755 } else { 0o644 };
        builder.add_bytes(
            format!("{}/{}", folder, kind.file_name()),
            scripts::render(kind, config)?,
            mode,
        );
    }

    fs::create_dir_all(out_dir)?;
    let path = archive_path(out_dir, config);
    tracing::debug!("Writing package to {}", path.display());

    let entries = builder.write_to(&path)?;
    let size_bytes = fs::metadata(&path)?.len();

    Ok(PackageReport {
        path,
        size_bytes,
        entries,
    })
}

/// `/`-separated archive path for a configured source.
///
/// Sources must be relative and free of `..`; `.` segments are dropped.
fn archive_relative(source: &str) -> Result<String> {
    let unsafe_source = || BootstrapError::UnsafePackageSource {
        source_path: source.to_string(),
    };

    let normalized = source.replace('\\', "/");
    if normalized.starts_with('/') || normalized.chars().nth(1) == Some(':') {
        return Err(unsafe_source());
    }

    let mut parts = Vec::new();
    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return Err(unsafe_source()),
        }
    }

    if parts.is_empty() {
        return Err(unsafe_source());
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn node_sources(root: &Path) {
        fs::create_dir_all(root.join("core")).unwrap();
        fs::create_dir_all(root.join("network")).unwrap();
        fs::write(root.join("core/block.py"), "class Block: pass\n").unwrap();
        fs::write(root.join("network/peer.py"), "class Peer: pass\n").unwrap();
        fs::write(root.join("node.py"), "print('node')\n").unwrap();
        fs::write(root.join("requirements.txt"), "ecdsa\nbase58\n").unwrap();
    }

    #[test]
    fn builds_default_layout() {
        let temp = TempDir::new().unwrap();
        node_sources(temp.path());

        let report =
            build_package(temp.path(), &InstallerConfig::default(), temp.path()).unwrap();

        assert_eq!(report.path, temp.path().join("Quantum_Wallet_v1.0.zip"));
        assert_eq!(
            report.entries,
            vec![
                "Quantum_Wallet_v1.0/README.txt",
                "Quantum_Wallet_v1.0/core/block.py",
                "Quantum_Wallet_v1.0/install.bat",
                "Quantum_Wallet_v1.0/install.sh",
                "Quantum_Wallet_v1.0/network/peer.py",
                "Quantum_Wallet_v1.0/node.py",
                "Quantum_Wallet_v1.0/requirements.txt",
            ]
        );
        assert!(report.size_bytes > 0);
        assert!(!temp.path().join("Quantum_Wallet_v1.0").exists());
    }

    #[test]
    fn install_sh_is_executable_in_archive() {
        let temp = TempDir::new().unwrap();
        node_sources(temp.path());

        let report =
            build_package(temp.path(), &InstallerConfig::default(), temp.path()).unwrap();

        let mut archive = ZipArchive::new(File::open(&report.path).unwrap()).unwrap();
        let entry = archive.by_name("Quantum_Wallet_v1.0/install.sh").unwrap();
        assert_eq!(entry.unix_mode().map(|m| m & 0o777), Some(0o755));
    }

    #[test]
    fn missing_source_is_reported() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("node.py"), "").unwrap();

        let err =
            build_package(temp.path(), &InstallerConfig::default(), temp.path()).unwrap_err();

        match err {
            BootstrapError::PackageSourceMissing { path } => {
                assert_eq!(path, temp.path().join("core"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!temp.path().join("Quantum_Wallet_v1.0.zip").exists());
    }

    #[test]
    fn sources_outside_the_project_are_rejected() {
        let temp = TempDir::new().unwrap();
        node_sources(temp.path());
        fs::write(temp.path().join("secret.txt"), "key").unwrap();
        let project = temp.path().join("project");
        fs::create_dir_all(&project).unwrap();

        for source in ["../secret.txt", "core/../../secret.txt", "/etc/passwd", "C:\\x.py"] {
            let mut config = InstallerConfig::default();
            config.package.sources = vec![source.to_string()];

            let err = build_package(&project, &config, &project).unwrap_err();

            match err {
                BootstrapError::UnsafePackageSource { source_path } => {
                    assert_eq!(source_path, source)
                }
                other => panic!("unexpected error for {source}: {other}"),
            }
        }
        assert!(!project.join("Quantum_Wallet_v1.0.zip").exists());
    }

    #[test]
    fn nested_relative_sources_are_allowed() {
        let temp = TempDir::new().unwrap();
        node_sources(temp.path());
        let mut config = InstallerConfig::default();
        config.package.sources = vec!["./core/block.py".to_string(), "network/".to_string()];

        let report = build_package(temp.path(), &config, temp.path()).unwrap();

        assert!(report
            .entries
            .contains(&"Quantum_Wallet_v1.0/core/block.py".to_string()));
        assert!(report
            .entries
            .contains(&"Quantum_Wallet_v1.0/network/peer.py".to_string()));
        assert_eq!(archive_relative("core\\block.py").unwrap(), "core/block.py");
        assert!(archive_relative(".").is_err());
    }

    #[test]
    fn custom_name_and_version() {
        let temp = TempDir::new().unwrap();
        node_sources(temp.path());
        let mut config = InstallerConfig::default();
        config.package.name = "Wallet".to_string();
        config.package.version = "2.1".to_string();

        let out = temp.path().join("dist");
        let report = build_package(temp.path(), &config, &out).unwrap();

        assert_eq!(report.path, out.join("Wallet_v2.1.zip"));
        assert!(report.entries.iter().all(|e| e.starts_with("Wallet_v2.1/")));
        assert_eq!(report.location(), out.as_path());
    }

    #[test]
    fn size_display_has_two_decimals() {
        let report = PackageReport {
            path: PathBuf::from("x.zip"),
            size_bytes: 1024 * 1024 * 3 / 2,
            entries: Vec::new(),
        };
        assert_eq!(report.size_display(), "1.50");
    }
}
