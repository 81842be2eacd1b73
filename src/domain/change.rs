use std::fmt;

/// Category a changed file is filed under in the changelog.
///
/// Declaration order is the order sections are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    Added,
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
}

impl ChangeKind {
    /// All kinds in render order
    pub const ALL: [ChangeKind; 6] = [
        ChangeKind::Added,
        ChangeKind::Changed,
        ChangeKind::Deprecated,
        ChangeKind::Removed,
        ChangeKind::Fixed,
        ChangeKind::Security,
    ];

    /// Section heading text
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "Added",
            ChangeKind::Changed => "Changed",
            ChangeKind::Deprecated => "Deprecated",
            ChangeKind::Removed => "Removed",
            ChangeKind::Fixed => "Fixed",
            ChangeKind::Security => "Security",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single changelog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub message: String,
}

impl ChangeRecord {
    /// Entry describing a change to `path`
    pub fn for_path(kind: ChangeKind, path: &str) -> Self {
        ChangeRecord {
            kind,
            message: format!("Changes in {}", path),
        }
    }
}

/// Classifies a change from the diff text for a single path.
///
/// Rules, first match wins:
/// - unstaged and missing on disk: `Removed`
/// - unstaged and present: `Added` when the diff has a `+++` marker, else `Changed`
/// - staged: keyword search over the lowercased diff, in the order
///   `new file`, `deleted file`, `security`/`vuln`, `deprecat`, `fix`/`bug`
///
/// The `+++` marker appears in the header of nearly every unified diff, so
/// unstaged edits to tracked files almost always come out as `Added`.
pub fn classify(diff: &str, exists: bool, staged: bool) -> ChangeKind {
    if !staged {
        return if !exists {
            ChangeKind::Removed
        } else if diff.contains("+++") {
            ChangeKind::Added
        } else {
            ChangeKind::Changed
        };
    }

    let diff = diff.to_lowercase();
    if diff.contains("new file") {
        ChangeKind::Added
    } else if diff.contains("deleted file") {
        ChangeKind::Removed
    } else if diff.contains("security") || diff.contains("vuln") {
        ChangeKind::Security
    } else if diff.contains("deprecat") {
        ChangeKind::Deprecated
    } else if diff.contains("fix") || diff.contains("bug") {
        ChangeKind::Fixed
    } else {
        ChangeKind::Changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW_FILE_DIFF: &str = "diff --git a/src/new.rs b/src/new.rs\n\
new file mode 100644\n\
index 0000000..e69de29\n\
--- /dev/null\n\
+++ b/src/new.rs\n\
@@ -0,0 +1 @@\n\
+// fix later\n";

    #[test]
    fn test_unstaged_missing_path_is_removed_regardless_of_diff() {
        assert_eq!(classify("", false, false), ChangeKind::Removed);
        assert_eq!(classify(NEW_FILE_DIFF, false, false), ChangeKind::Removed);
    }

    #[test]
    fn test_unstaged_existing_path_uses_addition_marker() {
        assert_eq!(classify(NEW_FILE_DIFF, true, false), ChangeKind::Added);
        assert_eq!(classify("", true, false), ChangeKind::Changed);
        assert_eq!(classify("@@ -1 +1 @@\n-a\n+b\n", true, false), ChangeKind::Changed);
    }

    #[test]
    fn test_staged_new_file_wins_over_fix() {
        assert_eq!(classify(NEW_FILE_DIFF, true, true), ChangeKind::Added);
    }

    #[test]
    fn test_staged_existence_is_ignored() {
        assert_eq!(classify(NEW_FILE_DIFF, false, true), ChangeKind::Added);
        assert_eq!(classify("", false, true), ChangeKind::Changed);
    }

    #[test]
    fn test_staged_keyword_order() {
        assert_eq!(
            classify("deleted file mode 100644\n-security", true, true),
            ChangeKind::Removed
        );
        assert_eq!(
            classify("+// patch VULN-1234, also a bug", true, true),
            ChangeKind::Security
        );
        assert_eq!(
            classify("+#[deprecated] fix", true, true),
            ChangeKind::Deprecated
        );
        assert_eq!(classify("+// Fixes #12", true, true), ChangeKind::Fixed);
        assert_eq!(classify("+// a Bug", true, true), ChangeKind::Fixed);
        assert_eq!(classify("+let x = 1;", true, true), ChangeKind::Changed);
    }

    #[test]
    fn test_staged_matching_is_case_insensitive() {
        assert_eq!(classify("NEW FILE mode", true, true), ChangeKind::Added);
        assert_eq!(classify("+Security review", true, true), ChangeKind::Security);
        assert_eq!(classify("+DEPRECATION", true, true), ChangeKind::Deprecated);
    }

    #[test]
    fn test_kind_order_matches_declaration() {
        let mut kinds = ChangeKind::ALL.to_vec();
        kinds.reverse();
        kinds.sort();
        assert_eq!(kinds, ChangeKind::ALL.to_vec());
        assert_eq!(ChangeKind::Fixed.to_string(), "Fixed");
    }

    #[test]
    fn test_record_message() {
        let record = ChangeRecord::for_path(ChangeKind::Changed, "src/lib.rs");
        assert_eq!(record.message, "Changes in src/lib.rs");
    }
}
