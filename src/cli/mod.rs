//! Command-line driver for the loopbreaker engine.
//!
//! The CLI is a caller of the core: it supplies snapshots (from a scenario
//! file or the builtin demo) and renders the resulting decision records.

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

pub use output::{output, CommandOutput};

/// LoopBreaker: collapse pattern monitoring and intervention.
#[derive(Parser, Debug)]
#[command(name = "loopbreaker", version, about)]
pub struct Cli {
    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a scenario file of metric updates through a fresh session
    Run(commands::run::RunArgs),
    /// Run the builtin three-cycle escalation demo
    Demo(commands::demo::DemoArgs),
}

/// Report a command failure and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) {
    if json {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
