//! Command-line interface wiring for the `spiredeck` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chart;
pub mod check;
pub mod report;

/// Parsed CLI entrypoint for the `spiredeck` binary.
#[derive(Parser, Debug)]
#[command(
    name = "spiredeck",
    version,
    about = "Audit name:cost card decks and emit PDF cost reports"
)]
pub struct Cli {
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Commands made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate a deck file and emit the PDF report (or a VOID report).
    Report(report::ReportArgs),
    /// Aggregate a deck file and print the summary without rendering.
    Check(check::CheckArgs),
    /// Render only the cost histogram chart as a PNG.
    Chart(chart::ChartArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Report(args) => report::handle(args),
        Command::Check(args) => check::handle(args),
        Command::Chart(args) => chart::handle(args),
    }
}
