mod cli;
mod diff;
mod selftest;

use anyhow::Result;
use cli::{Cli, Commands};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    setup_logging(&cli)?;

    match cli.command {
        Commands::Rename {
            from,
            to,
            project,
            dry_run,
        } => {
            handle_rename_command(from, to, project, dry_run)?;
        }
        Commands::Test { keep } => {
            handle_test_command(keep)?;
        }
    }

    Ok(())
}

fn handle_rename_command(
    from: String,
    to: String,
    project: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    if from.is_empty() || to.is_empty() {
        anyhow::bail!("Both the current and the new name must be non-empty");
    }

    let project_dir = project.unwrap_or_else(|| std::env::current_dir().unwrap());

    info!("Rename: '{}' -> '{}'", from, to);
    info!("Project root: {:?}", project_dir);

    if dry_run {
        warn!("Dry run mode - no changes will be made");
    }

    if !project_dir.exists() {
        anyhow::bail!("Project directory does not exist: {:?}", project_dir);
    }

    if !project_dir.is_dir() {
        anyhow::bail!("Project root must be a directory: {:?}", project_dir);
    }

    let outcome = railshift_core::rename(&project_dir, &from, &to, dry_run)?;

    if dry_run {
        for preview in &outcome.previews {
            print!(
                "{}",
                diff::render_content_diff(&preview.path, &preview.before, &preview.after)?
            );
        }
    }

    println!("Rename complete!");
    println!("  Files moved: {}", outcome.files_moved);
    println!("  Files edited: {}", outcome.files_edited);
    println!("  Directories renamed: {}", outcome.dirs_renamed);

    Ok(())
}

fn handle_test_command(keep: bool) -> Result<()> {
    info!("Running built-in rename scenarios");

    let all_passed = selftest::run_all(keep)?;

    if !all_passed {
        anyhow::bail!("Self-test scenarios failed");
    }

    println!("All scenarios passed!");
    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .with(filter)
        .init();

    Ok(())
}
