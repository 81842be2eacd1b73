//! Changelog section building and file splicing.
//!
//! The changelog is never parsed structurally. The current version is the
//! first `## [x.y.z]` heading found anywhere in the file, and new sections are
//! inserted after the first two paragraphs (title and description).

use crate::config::Config;
use crate::domain::{classify, ChangeKind, ChangeRecord, IncrementKind, SemanticVersion};
use crate::error::Result;
use crate::git::Repository;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"## \[(.*?)\]").expect("version heading pattern is valid"))
}

/// Returns the version from the first `## [version]` heading, if any.
///
/// An empty `## []` heading counts as no version.
pub fn find_latest_version(content: &str) -> Option<String> {
    heading_regex()
        .captures(content)
        .map(|captures| captures[1].to_string())
        .filter(|version| !version.is_empty())
}

/// Reads the changelog at `path`, treating a missing file as empty.
fn read_existing(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

/// One version's worth of changelog entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogSection {
    pub version: String,
    pub date: NaiveDate,
    pub changes: BTreeMap<ChangeKind, Vec<String>>,
}

impl ChangelogSection {
    /// Render as markdown; empty when there are no entries at all.
    pub fn render(&self) -> String {
        if self.changes.values().all(Vec::is_empty) {
            return String::new();
        }

        let mut out = format!("## [{}] - {}\n\n", self.version, self.date.format("%Y-%m-%d"));
        for (kind, messages) in &self.changes {
            if messages.is_empty() {
                continue;
            }
            out.push_str(&format!("### {}\n", kind));
            for message in messages {
                out.push_str(&format!("- {}\n", message));
            }
            out.push('\n');
        }
        out
    }
}

/// Splices a rendered section into existing changelog text.
///
/// Empty `existing` yields `header` followed by the section. Otherwise the
/// text is split on the first two blank-line boundaries and the section goes
/// between the second paragraph and the rest.
pub fn splice_section(existing: &str, header: &str, section: &str) -> String {
    if existing.is_empty() {
        return format!("{}{}", header, section);
    }

    let parts: Vec<&str> = existing.splitn(3, "\n\n").collect();
    let mut out = String::with_capacity(existing.len() + section.len() + 4);
    out.push_str(parts[0]);
    out.push_str("\n\n");
    if let Some(second) = parts.get(1) {
        out.push_str(second);
        out.push_str("\n\n");
    }
    out.push_str(section);
    if let Some(rest) = parts.get(2) {
        out.push_str(rest);
    }
    out
}

/// Result of a full update run
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// Version found in the changelog before the run
    pub previous_version: String,
    /// Version the section was written under
    pub version: String,
    /// Rendered section, empty when nothing changed
    pub section: String,
    /// Whether the changelog file was rewritten
    pub written: bool,
}

/// Collects classified changes and writes them into the changelog.
pub struct ChangelogBuilder {
    config: Config,
    version: String,
    changes: BTreeMap<ChangeKind, Vec<String>>,
}

impl ChangelogBuilder {
    /// Creates a builder seeded with the version found in the configured changelog.
    ///
    /// A missing file, or one without a version heading, falls back to the
    /// configured default version.
    pub fn new(config: Config) -> Result<Self> {
        let existing = read_existing(&config.changelog.path)?;
        let version = find_latest_version(&existing)
            .unwrap_or_else(|| config.version.default_version.clone());

        Ok(Self::with_version(config, version))
    }

    /// Creates a builder with an explicit starting version
    pub fn with_version(config: Config, version: impl Into<String>) -> Self {
        let changes = ChangeKind::ALL.iter().map(|kind| (*kind, Vec::new())).collect();

        ChangelogBuilder {
            config,
            version: version.into(),
            changes,
        }
    }

    /// Current version string
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Messages recorded under `kind`, in insertion order
    pub fn changes(&self, kind: ChangeKind) -> &[String] {
        self.changes.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of recorded entries
    pub fn change_count(&self) -> usize {
        self.changes.values().map(Vec::len).sum()
    }

    /// Replaces the current version with its increment and returns the new one.
    pub fn increment_version(&mut self, kind: &IncrementKind) -> Result<&str> {
        let next = SemanticVersion::parse(&self.version)?.increment(kind)?;
        self.version = next.to_string();
        Ok(&self.version)
    }

    pub fn add_change(&mut self, kind: ChangeKind, message: impl Into<String>) {
        self.changes.entry(kind).or_default().push(message.into());
    }

    pub fn add_record(&mut self, record: ChangeRecord) {
        self.add_change(record.kind, record.message);
    }

    /// Classifies one path from its diff and on-disk presence.
    ///
    /// A failed diff counts as an empty diff.
    pub fn classify_path<R: Repository>(repo: &R, path: &str, staged: bool) -> ChangeKind {
        let diff = repo.diff(path, staged).unwrap_or_default();
        classify(&diff, repo.path_exists(path), staged)
    }

    /// Lists changed paths and records one entry per path.
    ///
    /// Returns the number of entries added. A listing failure records nothing.
    pub fn collect_changes<R: Repository>(&mut self, repo: &R, staged: bool) -> Result<usize> {
        let paths = repo.changed_paths(staged)?;

        let mut added = 0;
        for path in paths.iter().filter(|p| !p.is_empty()) {
            let kind = Self::classify_path(repo, path, staged);
            self.add_record(ChangeRecord::for_path(kind, path));
            added += 1;
        }
        Ok(added)
    }

    /// Snapshot of the collected entries under the current version
    pub fn section(&self, date: NaiveDate) -> ChangelogSection {
        ChangelogSection {
            version: self.version.clone(),
            date,
            changes: self.changes.clone(),
        }
    }

    /// Markdown for the collected entries, empty when nothing was collected
    pub fn render(&self, date: NaiveDate) -> String {
        self.section(date).render()
    }

    /// Writes `section` into the changelog at `path`.
    ///
    /// The whole new content is built before the file is written. An empty
    /// section leaves the file untouched. Concurrent writers are not guarded
    /// against.
    pub fn merge_into_file(&self, path: &Path, section: &str) -> Result<bool> {
        if section.is_empty() {
            return Ok(false);
        }

        let existing = read_existing(path)?;
        let content = splice_section(&existing, &self.config.changelog.header(), section);
        fs::write(path, content)?;
        Ok(true)
    }

    /// Increment, collect, render and merge in one pass.
    pub fn update<R: Repository>(
        &mut self,
        repo: &R,
        increment: Option<&IncrementKind>,
        staged: bool,
        date: NaiveDate,
        dry_run: bool,
    ) -> Result<UpdateOutcome> {
        let previous_version = self.version.clone();
        if let Some(kind) = increment {
            self.increment_version(kind)?;
        }

        self.collect_changes(repo, staged)?;
        let section = self.render(date);

        let written = if dry_run {
            false
        } else {
            let path = self.config.changelog.path.clone();
            self.merge_into_file(&path, &section)?
        };

        Ok(UpdateOutcome {
            previous_version,
            version: self.version.clone(),
            section,
            written,
        })
    }
}
