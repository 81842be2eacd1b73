use crate::error::{ChangelogError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Version assumed when a project has no recorded version yet.
pub const DEFAULT_VERSION: &str = "0.1.0";

/// Prerelease label used when a bare `pre` directive starts a new prerelease.
pub const DEFAULT_PRERELEASE_LABEL: &str = "alpha";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)(?:-([a-zA-Z0-9.-]+))?(?:\+([a-zA-Z0-9.-]+))?$")
            .expect("semantic version pattern is valid")
    })
}

/// Semantic version: `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`.
///
/// Values are immutable; [`SemanticVersion::increment`] returns a new instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

/// Increment directive accepted on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncrementKind {
    Major,
    Minor,
    Patch,
    /// Prerelease bump; the label is only used when no prerelease exists yet
    Pre(String),
}

impl SemanticVersion {
    /// Create a plain release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Parse a version string such as `1.2.3`, `1.0.0-alpha.1` or `2.0.0+build.7`.
    ///
    /// No leading `v` and exactly three numeric components are accepted.
    pub fn parse(version: &str) -> Result<Self> {
        let captures = version_regex()
            .captures(version)
            .ok_or_else(|| ChangelogError::format(version))?;

        let number = |index: usize| -> Result<u64> {
            captures[index]
                .parse::<u64>()
                .map_err(|_| ChangelogError::format(version))
        };

        Ok(SemanticVersion {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            prerelease: captures.get(4).map(|m| m.as_str().to_string()),
            build: captures.get(5).map(|m| m.as_str().to_string()),
        })
    }

    /// Compute the next version for the given directive.
    ///
    /// Release bumps clear the prerelease. Build metadata is carried through
    /// untouched on every path.
    pub fn increment(&self, kind: &IncrementKind) -> Result<Self> {
        let overflow = || ChangelogError::format(self.to_string());
        let mut next = self.clone();

        match kind {
            IncrementKind::Major => {
                next.major = self.major.checked_add(1).ok_or_else(overflow)?;
                next.minor = 0;
                next.patch = 0;
                next.prerelease = None;
            }
            IncrementKind::Minor => {
                next.minor = self.minor.checked_add(1).ok_or_else(overflow)?;
                next.patch = 0;
                next.prerelease = None;
            }
            IncrementKind::Patch => {
                next.patch = self.patch.checked_add(1).ok_or_else(overflow)?;
                next.prerelease = None;
            }
            IncrementKind::Pre(label) => {
                next.prerelease = Some(match &self.prerelease {
                    Some(existing) => bump_prerelease(existing).ok_or_else(overflow)?,
                    None => format!("{}.1", label),
                });
            }
        }

        Ok(next)
    }
}

/// Bump an existing prerelease identifier.
///
/// A trailing numeric segment is incremented only when it follows a label
/// (`alpha.3` -> `alpha.4`); anything else gets `.1` appended.
fn bump_prerelease(prerelease: &str) -> Option<String> {
    let mut parts: Vec<String> = prerelease.split('.').map(str::to_string).collect();
    let last = parts.last().map(String::as_str).unwrap_or_default();

    if parts.len() > 1 && !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) {
        let bumped = match last.parse::<u64>() {
            Ok(n) => n.checked_add(1)?,
            Err(_) => return None,
        };
        if let Some(slot) = parts.last_mut() {
            *slot = bumped.to_string();
        }
        Some(parts.join("."))
    } else {
        Some(format!("{}.1", prerelease))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl FromStr for IncrementKind {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(IncrementKind::Major),
            "minor" => Ok(IncrementKind::Minor),
            "patch" => Ok(IncrementKind::Patch),
            other => match other.strip_prefix("pre") {
                Some("") => Ok(IncrementKind::Pre(DEFAULT_PRERELEASE_LABEL.to_string())),
                Some(label) => Ok(IncrementKind::Pre(label.to_string())),
                None => Err(ChangelogError::increment(other)),
            },
        }
    }
}

impl fmt::Display for IncrementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncrementKind::Major => write!(f, "major"),
            IncrementKind::Minor => write!(f, "minor"),
            IncrementKind::Patch => write!(f, "patch"),
            IncrementKind::Pre(label) => write!(f, "pre{}", label),
        }
    }
}

/// String-level version bump.
///
/// An absent or empty current version yields [`DEFAULT_VERSION`] as-is.
pub fn next_version(current: Option<&str>, kind: &str) -> Result<String> {
    let current = match current {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(DEFAULT_VERSION.to_string()),
    };

    let version = SemanticVersion::parse(current)?;
    let kind: IncrementKind = kind.parse()?;
    Ok(version.increment(&kind)?.to_string())
}
