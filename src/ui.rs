//! Operator-facing output.
//!
//! Status lines go to stdout, errors to stderr. Styling is dropped
//! automatically when the stream is not a terminal.

use console::style;

use crate::changelog::UpdateOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a rendered changelog section under a bold heading.
pub fn display_section(section: &str) {
    println!("\n{}", style("Changelog section:").bold());
    for line in section.lines() {
        println!("  {}", line);
    }
}

/// Summary line printed after a run.
///
/// An empty run reports the version still recorded in the file.
pub fn outcome_message(outcome: &UpdateOutcome, path: &str) -> String {
    if outcome.written {
        format!("Updated changelog to version {}", outcome.version)
    } else if outcome.section.is_empty() {
        format!(
            "No changes found; {} left unchanged at version {}",
            path, outcome.previous_version
        )
    } else {
        format!("Dry run: {} not written (version {})", path, outcome.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(section: &str, written: bool) -> UpdateOutcome {
        UpdateOutcome {
            previous_version: "1.0.0".to_string(),
            version: "1.0.1".to_string(),
            section: section.to_string(),
            written,
        }
    }

    #[test]
    fn test_outcome_message_written() {
        assert_eq!(
            outcome_message(&outcome("## [1.0.1]", true), "CHANGELOG.md"),
            "Updated changelog to version 1.0.1"
        );
    }

    #[test]
    fn test_outcome_message_nothing_to_write() {
        let msg = outcome_message(&outcome("", false), "CHANGELOG.md");
        assert_eq!(
            msg,
            "No changes found; CHANGELOG.md left unchanged at version 1.0.0"
        );
    }

    #[test]
    fn test_outcome_message_dry_run() {
        let msg = outcome_message(&outcome("## [1.0.1]", false), "CHANGELOG.md");
        assert!(msg.starts_with("Dry run"));
    }
}
