use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use git_changelog::cli::orchestration::{run_update_workflow, UpdateWorkflowArgs};
use git_changelog::config;
use git_changelog::git::Git2Repository;
use git_changelog::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-changelog",
    about = "Append a semantic-versioned section for staged changes to CHANGELOG.md"
)]
struct Args {
    #[arg(
        default_value = "patch",
        help = "Version increment: major, minor, patch or pre[label]"
    )]
    increment: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Print the new section without writing the changelog")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("git-changelog {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    let changelog_path = config.changelog.path.display().to_string();

    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = UpdateWorkflowArgs {
        increment: args.increment,
        dry_run: args.dry_run,
    };

    if config.behavior.staged {
        ui::display_status("Collecting staged changes...");
    } else {
        ui::display_status("Collecting working tree changes...");
    }

    let outcome = match run_update_workflow(&workflow_args, config, &repo) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if workflow_args.dry_run && !outcome.section.is_empty() {
        ui::display_section(&outcome.section);
    }

    let message = ui::outcome_message(&outcome, &changelog_path);
    if outcome.written {
        ui::display_success(&message);
    } else {
        ui::display_status(&message);
    }

    Ok(())
}
