//! Development helper: one subcommand per routine task.
//!
//! ```text
//! cargo run --bin dev -- lint
//! ```
//!
//! Each task is a fixed list of shell commands run in order; the first
//! failure stops the task and the helper exits non-zero.

use std::process::{Command, ExitCode};

use clap::{Parser, Subcommand};

const IMAGE: &str = "app-labs";

#[derive(Debug, Parser)]
#[command(name = "dev", about = "App Labs API development helper")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Subcommand)]
enum Task {
    /// Fetch dependencies
    Install,
    /// Run the server locally
    Run,
    /// Run the test suite
    Test,
    /// Check formatting and run clippy
    Lint,
    /// Format the code
    Format,
    /// Build and run the Docker image
    Docker,
    /// Remove build artifacts
    Clean,
}

/// One command line plus what to announce before running it.
#[derive(Debug, PartialEq, Eq)]
struct Step {
    label: &'static str,
    program: &'static str,
    args: &'static [&'static str],
}

const fn step(label: &'static str, program: &'static str, args: &'static [&'static str]) -> Step {
    Step { label, program, args }
}

impl Task {
    fn steps(self) -> Vec<Step> {
        match self {
            Self::Install => vec![step("Fetching dependencies", "cargo", &["fetch"])],
            Self::Run => vec![step("Starting server", "cargo", &["run", "--bin", "app-labs"])],
            Self::Test => vec![step("Running tests", "cargo", &["test"])],
            Self::Lint => vec![
                step("Checking formatting", "cargo", &["fmt", "--all", "--", "--check"]),
                step("Running clippy", "cargo", &["clippy", "--all-targets", "--", "-D", "warnings"]),
            ],
            Self::Format => vec![step("Formatting code", "cargo", &["fmt", "--all"])],
            Self::Docker => vec![
                step("Building Docker image", "docker", &["build", "-t", IMAGE, "."]),
                step("Running Docker container", "docker", &["run", "-p", "8000:8000", IMAGE]),
            ],
            Self::Clean => vec![step("Removing build artifacts", "cargo", &["clean"])],
        }
    }

    fn done(self) -> &'static str {
        match self {
            Self::Test => "All tests passed",
            Self::Lint => "All lint checks passed",
            Self::Format => "Formatting complete",
            Self::Clean => "Cleanup complete",
            _ => "Done",
        }
    }
}

fn run(step: &Step) -> Result<(), String> {
    println!("==> {}", step.label);
    let status = Command::new(step.program)
        .args(step.args)
        .status()
        .map_err(|e| format!("could not start `{}`: {e}", step.program))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("`{} {}` failed ({status})", step.program, step.args.join(" ")))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    for step in cli.task.steps() {
        if let Err(e) = run(&step) {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    }

    println!("{}", cli.task.done());
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_task() {
        for (arg, task) in [
            ("install", Task::Install),
            ("run", Task::Run),
            ("test", Task::Test),
            ("lint", Task::Lint),
            ("format", Task::Format),
            ("docker", Task::Docker),
            ("clean", Task::Clean),
        ] {
            assert_eq!(Cli::try_parse_from(["dev", arg]).unwrap().task, task);
        }
    }

    #[test]
    fn help_and_unknown_tasks_do_not_parse_as_tasks() {
        let help = Cli::try_parse_from(["dev", "help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(Cli::try_parse_from(["dev", "deploy"]).is_err());
    }

    #[test]
    fn lint_checks_before_clippy() {
        let programs: Vec<_> = Task::Lint.steps().iter().map(|s| s.args[0]).collect();
        assert_eq!(programs, ["fmt", "clippy"]);
    }

    #[test]
    fn docker_runs_what_it_builds() {
        let steps = Task::Docker.steps();
        assert!(steps[0].args.contains(&IMAGE));
        assert_eq!(steps[1].args.last(), Some(&IMAGE));
    }
}
