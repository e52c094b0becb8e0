//! Interpreter version banner parsing.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A `major.minor[.patch]` interpreter release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterpreterVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("valid version regex"))
}

impl InterpreterVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the first version number from `--version` output.
    ///
    /// Older interpreters print the banner on stderr, so callers should
    /// pass stdout and stderr concatenated.
    pub fn parse_banner(banner: &str) -> Option<Self> {
        let caps = version_regex().captures(banner)?;
        let major = caps.get(1)?.as_str().parse().ok()?;
        let minor = caps.get(2)?.as_str().parse().ok()?;
        let patch = caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }

    /// Whether this release is at least `minimum`.
    pub fn satisfies(&self, minimum: &InterpreterVersion) -> bool {
        self >= minimum
    }
}

impl PartialOrd for InterpreterVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InterpreterVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl FromStr for InterpreterVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split('.');
        let mut next = |label: &str, required: bool| -> Result<u32, String> {
            match parts.next() {
                Some(p) => p
                    .parse()
                    .map_err(|_| format!("invalid {} component in '{}'", label, trimmed)),
                None if required => Err(format!("missing {} component in '{}'", label, trimmed)),
                None => Ok(0),
            }
        };
        let major = next("major", true)?;
        let minor = next("minor", false)?;
        let patch = next("patch", false)?;
        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
