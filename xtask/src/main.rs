// Workspace automation for nes-pacer
//
// Thin wrappers over cargo so the common invocations are one short command.
// In CI the default `audio` feature is switched off, since runners rarely
// ship a working ALSA setup.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::Path;
use std::process::Command;

#[derive(Parser)]
#[command(name = "x", about = "Workspace automation for nes-pacer")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Format check, clippy and the full test suite
    Ci,
    /// Format the workspace
    Fmt {
        /// Verify formatting without rewriting files
        #[arg(long)]
        check: bool,
    },
    /// Clippy over all targets with warnings denied
    Lint,
    /// Run the test suite, optionally narrowed to matching test names
    Test { filter: Option<String> },
    /// Criterion benchmarks
    Bench,
    /// Run the engine against a ROM file
    RunRom {
        rom: String,
        #[arg(long)]
        release: bool,
    },
}

fn main() -> Result<()> {
    match Cli::parse().task {
        Task::Ci => ci(),
        Task::Fmt { check } => fmt(check),
        Task::Lint => lint(),
        Task::Test { filter } => test(filter.as_deref()),
        Task::Bench => cargo(&["bench"]),
        Task::RunRom { rom, release } => run_rom(&rom, release),
    }
}

fn ci() -> Result<()> {
    fmt(true)?;
    lint()?;
    test(None)?;
    println!("{}", "All CI tasks passed".green().bold());
    Ok(())
}

fn fmt(check: bool) -> Result<()> {
    if check {
        cargo(&["fmt", "--all", "--", "--check"])
    } else {
        cargo(&["fmt", "--all"])
    }
}

fn lint() -> Result<()> {
    let mut args = vec!["clippy", "--all-targets"];
    args.push(feature_flag());
    args.extend(["--", "-D", "warnings"]);
    cargo(&args)
}

fn test(filter: Option<&str>) -> Result<()> {
    let mut args = vec!["test", feature_flag()];
    if let Some(filter) = filter {
        args.push(filter);
    }
    cargo(&args)
}

fn run_rom(rom: &str, release: bool) -> Result<()> {
    if !Path::new(rom).exists() {
        bail!("ROM file not found: {}", rom);
    }

    let mut args = vec!["run"];
    if release {
        args.push("--release");
    }
    args.extend(["--", rom]);
    cargo(&args)
}

/// Feature selection for build-like tasks; CI runners get no audio backend
fn feature_flag() -> &'static str {
    if std::env::var_os("CI").is_some() {
        "--no-default-features"
    } else {
        "--all-features"
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    println!("{} cargo {}", "▶".cyan(), args.join(" "));

    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("cargo {} failed ({})", args[0], status);
    }
    Ok(())
}
