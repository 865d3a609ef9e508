use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "railshift")]
#[command(version)]
#[command(about = "Rename models, controllers, and controller actions across a Rails project")]
#[command(long_about = "A CLI tool that renames an entity in a Rails-style project and propagates \
the new name through every file that references it: source, spec, test, fixture, views, helper, \
and the route file.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Rename an entity and every file that references it")]
    Rename {
        #[arg(help = "Current name (DummyModel, DummiesController, or DummiesController.index)")]
        from: String,

        #[arg(help = "New name (NewModel, HelloWorldsController, or new_action)")]
        to: String,

        #[arg(help = "Project root (defaults to current directory)")]
        project: Option<PathBuf>,

        #[arg(long, help = "Show what would change without touching any file")]
        dry_run: bool,
    },

    #[command(about = "Run the built-in rename scenarios against a disposable fixture project")]
    Test {
        #[arg(long, help = "Keep the generated fixture projects on disk afterwards")]
        keep: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rename_command() {
        let args = vec!["railshift", "rename", "DummyModel", "NewModel"];

        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Rename {
                from,
                to,
                project,
                dry_run,
            } => {
                assert_eq!(from, "DummyModel");
                assert_eq!(to, "NewModel");
                assert_eq!(project, None);
                assert!(!dry_run);
            }
            _ => panic!("Expected Rename command"),
        }
    }

    #[test]
    fn test_rename_command_with_project_and_dry_run() {
        let args = vec![
            "railshift",
            "rename",
            "DummiesController",
            "HelloWorldsController",
            "/path/to/app",
            "--dry-run",
        ];

        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Rename {
                project, dry_run, ..
            } => {
                assert_eq!(project, Some(PathBuf::from("/path/to/app")));
                assert!(dry_run);
            }
            _ => panic!("Expected Rename command"),
        }
    }

    #[test]
    fn test_test_command() {
        let args = vec!["railshift", "test", "--keep"];

        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Test { keep } => assert!(keep),
            _ => panic!("Expected Test command"),
        }
    }

    #[test]
    fn test_missing_arguments_are_rejected() {
        let args = vec!["railshift", "rename", "DummyModel"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
