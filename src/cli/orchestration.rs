//! Main workflow orchestration logic
//!
//! Keeps the update workflow callable without clap: the binary builds
//! [UpdateWorkflowArgs] from its arguments and hands over here.

use chrono::{Local, NaiveDate};

use crate::changelog::{ChangelogBuilder, UpdateOutcome};
use crate::config::Config;
use crate::domain::IncrementKind;
use crate::error::Result;
use crate::git::Repository;

/// Arguments for the update workflow
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateWorkflowArgs {
    /// Increment directive (`major`, `minor`, `patch`, `pre[label]`)
    pub increment: String,

    /// Render only, leave the changelog untouched
    pub dry_run: bool,
}

impl Default for UpdateWorkflowArgs {
    fn default() -> Self {
        UpdateWorkflowArgs {
            increment: "patch".to_string(),
            dry_run: false,
        }
    }
}

/// Runs the changelog update against `repo`.
///
/// 1. Parse the increment directive
/// 2. Read the current version from the changelog
/// 3. Increment, collect and classify changes
/// 4. Render and splice into the changelog
pub fn run_update_workflow<R: Repository>(
    args: &UpdateWorkflowArgs,
    config: Config,
    repo: &R,
) -> Result<UpdateOutcome> {
    run_update_workflow_on(args, config, repo, Local::now().date_naive())
}

/// Same as [run_update_workflow] with a fixed section date
pub fn run_update_workflow_on<R: Repository>(
    args: &UpdateWorkflowArgs,
    config: Config,
    repo: &R,
    date: NaiveDate,
) -> Result<UpdateOutcome> {
    let increment: IncrementKind = args.increment.parse()?;
    let staged = config.behavior.staged;

    let mut builder = ChangelogBuilder::new(config)?;
    builder.update(repo, Some(&increment), staged, date, args.dry_run)
}
