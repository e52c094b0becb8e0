//! Zip archive assembly.

use crate::error::Result;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Where an archive entry's bytes come from.
#[derive(Debug, Clone, PartialEq)]
pub enum EntrySource {
    /// Streamed from a file on disk.
    File(PathBuf),
    /// Generated in memory.
    Generated(Vec<u8>),
}

/// One file destined for the archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry {
    /// Path inside the archive, `/`-separated.
    pub name: String,
    pub source: EntrySource,
    /// Unix permission bits recorded for the entry.
    pub mode: u32,
}

/// Collects entries and writes them as a Deflate-compressed zip.
///
/// Entries are written in name order regardless of insertion order, so
/// the same inputs always give the same layout.
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    entries: Vec<ArchiveEntry>,
    exclude: Vec<String>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip directories named exactly like a pattern, and files whose name
    /// ends with a pattern that starts with `.` (an extension).
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add in-memory content.
    pub fn add_bytes(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>, mode: u32) {
        self.entries.push(ArchiveEntry {
            name: name.into(),
            source: EntrySource::Generated(bytes.into()),
            mode,
        });
    }

    /// Add a file from disk.
    pub fn add_file(&mut self, name: impl Into<String>, path: &Path) -> Result<()> {
        let mode = file_mode(path)?;
        self.entries.push(ArchiveEntry {
            name: name.into(),
            source: EntrySource::File(path.to_path_buf()),
            mode,
        });
        Ok(())
    }

    /// Add a directory recursively under the `prefix` folder.
    pub fn add_dir(&mut self, prefix: &str, dir: &Path) -> Result<()> {
        let mut children: Vec<_> = fs::read_dir(dir)?.collect::<io::Result<_>>()?;
        children.sort_by_key(|entry| entry.file_name());

        for child in children {
            let file_name = child.file_name();
            let file_name = file_name.to_string_lossy();
            let path = child.path();
            let name = format!("{}/{}", prefix, file_name);

            // Follows symlinks, so a linked directory is archived by content.
            if fs::metadata(&path)?.is_dir() {
                if self.is_excluded_dir(&file_name) {
                    tracing::debug!("Skipping {}", path.display());
                    continue;
                }
                self.add_dir(&name, &path)?;
            } else {
                if self.is_excluded_file(&file_name) {
                    tracing::debug!("Skipping {}", path.display());
                    continue;
                }
                self.add_file(name, &path)?;
            }
        }

        Ok(())
    }

    fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude.iter().any(|p| p == name)
    }

    fn is_excluded_file(&self, name: &str) -> bool {
        self.exclude
            .iter()
            .any(|p| p == name || (p.starts_with('.') && name.ends_with(p.as_str())))
    }

    /// Entry names in the order they will be written.
    pub fn entry_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.name.clone()).collect();
        names.sort();
        names
    }

    /// Write the archive to `path`, replacing any existing file.
    ///
    /// The zip is assembled in a temporary file next to `path` and only
    /// moved into place once it is complete; on error an earlier archive
    /// at `path` is left untouched.
    ///
    /// Returns the entry names in written order.
    pub fn write_to(mut self, path: &Path) -> Result<Vec<String>> {
        self.entries.sort_by(|a, b| a.name.cmp(&b.name));

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir)?;
        let mut zip = ZipWriter::new(temp.reopen()?);
        let base = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            zip.start_file(entry.name.as_str(), base.unix_permissions(entry.mode))?;
            match &entry.source {
                EntrySource::Generated(bytes) => zip.write_all(bytes)?,
                EntrySource::File(source) => {
                    let mut reader = File::open(source)?;
                    io::copy(&mut reader, &mut zip)?;
                }
            }
        }

        zip.finish()?;

        temp.persist(path).map_err(|e| e.error)?;
        tracing::debug!("Moved finished archive to {}", path.display());

        Ok(self.entries.into_iter().map(|e| e.name).collect())
    }
}

#[cfg(unix)]
fn file_mode(path: &Path) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::metadata(path)?.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn file_mode(path: &Path) -> Result<u32> {
    fs::metadata(path)?;
    Ok(0o644)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zip::ZipArchive;

    #[test]
    fn entries_are_written_sorted() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.zip");

        let mut builder = ArchiveBuilder::new();
        builder.add_bytes("pkg/b.txt", "b", 0o644);
        builder.add_bytes("pkg/a.txt", "a", 0o644);
        let written = builder.write_to(&out).unwrap();

        assert_eq!(written, vec!["pkg/a.txt", "pkg/b.txt"]);
        let archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn add_dir_skips_excluded_entries() {
        let temp = TempDir::new().unwrap();
        let core = temp.path().join("core");
        fs::create_dir_all(core.join("__pycache__")).unwrap();
        fs::write(core.join("__pycache__/block.cpython-311.pyc"), "x").unwrap();
        fs::write(core.join("block.py"), "class Block: pass\n").unwrap();
        fs::write(core.join("stale.pyc"), "x").unwrap();

        let mut builder = ArchiveBuilder::new().exclude(["__pycache__", ".pyc"]);
        builder.add_dir("pkg/core", &core).unwrap();

        assert_eq!(builder.entry_names(), vec!["pkg/core/block.py"]);
    }

    #[test]
    fn generated_entry_keeps_mode_and_content() {
        use std::io::Read;

        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.zip");

        let mut builder = ArchiveBuilder::new();
        builder.add_bytes("pkg/install.sh", "#!/bin/bash\n", 0o755);
        builder.write_to(&out).unwrap();

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let mut entry = archive.by_name("pkg/install.sh").unwrap();
        assert_eq!(entry.unix_mode().map(|m| m & 0o777), Some(0o755));
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "#!/bin/bash\n");
    }

    #[test]
    fn existing_archive_is_replaced() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.zip");
        fs::write(&out, "not a zip").unwrap();

        let mut builder = ArchiveBuilder::new();
        builder.add_bytes("pkg/README.txt", "hi", 0o644);
        builder.write_to(&out).unwrap();

        let archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn failed_write_keeps_previous_archive() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out.zip");
        fs::write(&out, "previous build").unwrap();

        let mut builder = ArchiveBuilder::new();
        builder.add_bytes("pkg/README.txt", "hi", 0o644);
        builder.entries.push(ArchiveEntry {
            name: "pkg/vanished.py".to_string(),
            source: EntrySource::File(temp.path().join("vanished.py")),
            mode: 0o644,
        });

        assert!(builder.write_to(&out).is_err());
        assert_eq!(fs::read_to_string(&out).unwrap(), "previous build");
        let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn add_dir_follows_symlinked_directories() {
        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("shared");
        let core = temp.path().join("core");
        fs::create_dir_all(&shared).unwrap();
        fs::create_dir_all(&core).unwrap();
        fs::write(shared.join("util.py"), "def f(): pass\n").unwrap();
        fs::write(core.join("block.py"), "class Block: pass\n").unwrap();
        std::os::unix::fs::symlink("../shared", core.join("lib")).unwrap();

        let mut builder = ArchiveBuilder::new();
        builder.add_dir("pkg/core", &core).unwrap();

        assert_eq!(
            builder.entry_names(),
            vec!["pkg/core/block.py", "pkg/core/lib/util.py"]
        );
        builder.write_to(&temp.path().join("out.zip")).unwrap();
    }
}
