use std::process;

use anyhow::Result;
use clap::{ArgMatches, Command};

fn main() -> Result<()> {
    let args = clap::command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("install").about("Install the railshift binary locally"))
        .subcommand(
            Command::new("run")
                .about("Build and run railshift with arguments")
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .arg(
                    clap::Arg::new("args")
                        .help("Arguments to pass to railshift")
                        .action(clap::ArgAction::Append)
                        .num_args(0..),
                ),
        )
        .subcommand(
            Command::new("test")
                .about("Test Operations")
                .subcommand(Command::new("all").about("Run all tests for the entire workspace"))
                .subcommand(Command::new("core").about("Run tests for railshift-core"))
                .subcommand(Command::new("bin").about("Run tests for railshift-bin"))
                .subcommand(
                    Command::new("scenarios")
                        .about("Run the railshift self-test scenarios"),
                ),
        )
        .get_matches();

    match args.subcommand() {
        Some(("install", args)) => handle_install_command(args),
        Some(("run", args)) => handle_run_command(args),
        Some(("test", args)) => handle_test_commands(args),
        Some((command, _)) => anyhow::bail!("Unexpected command: {command}"),
        None => anyhow::bail!("Expected subcommand"),
    }
}

fn handle_install_command(_args: &ArgMatches) -> Result<()> {
    println!("Installing railshift...");
    let status = process::Command::new("cargo")
        .args(["install", "--path", "crates/railshift-bin"])
        .status()?;

    if status.success() {
        println!("✓ railshift installed successfully");
    } else {
        anyhow::bail!("Failed to install railshift");
    }

    Ok(())
}

fn handle_run_command(args: &ArgMatches) -> Result<()> {
    println!("Building and running railshift...");

    let run_args: Vec<String> = args
        .get_many::<String>("args")
        .map_or(Vec::new(), |vals| vals.cloned().collect());

    let mut command = process::Command::new("cargo");
    command.args(["run", "--bin", "railshift", "--"]);

    if !run_args.is_empty() {
        command.args(&run_args);
    }

    let status = command.status()?;

    if !status.success() {
        anyhow::bail!("Failed to run railshift");
    }

    Ok(())
}

fn handle_test_commands(args: &ArgMatches) -> Result<()> {
    match args.subcommand() {
        Some(("all", _args)) => test_all(),
        Some(("core", _args)) => cargo_test(&["--package", "railshift-core"]),
        Some(("bin", _args)) => cargo_test(&["--package", "railshift-bin"]),
        Some(("scenarios", _args)) => run_scenarios(),
        _ => {
            println!("Available test commands:");
            println!("  all          - Run all tests for the entire workspace");
            println!("  core         - Run tests for railshift-core");
            println!("  bin          - Run tests for railshift-bin");
            println!("  scenarios    - Run the railshift self-test scenarios");
            Ok(())
        }
    }
}

fn test_all() -> Result<()> {
    println!("🧪 Running all tests for the railshift workspace...\n");

    let mut all_passed = true;

    println!("📚 Running railshift-core tests...");
    report(&mut all_passed, cargo_test(&["--package", "railshift-core"]));

    println!("🔧 Running railshift-bin tests...");
    report(&mut all_passed, cargo_test(&["--package", "railshift-bin"]));

    println!("🔗 Running self-test scenarios...");
    report(&mut all_passed, run_scenarios());

    if all_passed {
        println!("🎉 All tests passed!");
        Ok(())
    } else {
        anyhow::bail!("Some tests failed")
    }
}

fn report(all_passed: &mut bool, result: Result<()>) {
    match result {
        Ok(()) => println!("✅ passed\n"),
        Err(err) => {
            *all_passed = false;
            println!("❌ failed: {err:?}\n");
        }
    }
}

fn cargo_test(extra_args: &[&str]) -> Result<()> {
    let status = process::Command::new("cargo")
        .arg("test")
        .args(extra_args)
        .status()?;

    if !status.success() {
        anyhow::bail!("cargo test {} failed", extra_args.join(" "));
    }

    Ok(())
}

fn run_scenarios() -> Result<()> {
    let status = process::Command::new("cargo")
        .args(["run", "--bin", "railshift", "--", "test"])
        .status()?;

    if !status.success() {
        anyhow::bail!("railshift self-test scenarios failed");
    }

    Ok(())
}
