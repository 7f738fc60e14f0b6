//! `run` command: feed a scenario file through the engine.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{output, SessionRunOutput};
use crate::domain::models::MetricUpdate;
use crate::services::LoopBreaker;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a YAML scenario file: a list of metric updates, one per cycle
    pub scenario: PathBuf,

    /// Print the session summary after the last cycle
    #[arg(long)]
    pub summary: bool,
}

pub fn execute(args: RunArgs, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(&args.scenario)
        .with_context(|| format!("failed to read scenario file {}", args.scenario.display()))?;
    let updates: Vec<MetricUpdate> = serde_yaml::from_str(&raw)
        .with_context(|| format!("invalid scenario file {}", args.scenario.display()))?;

    let mut engine = LoopBreaker::new();
    let reports = updates
        .into_iter()
        .map(|update| engine.process_cycle(update))
        .collect();

    let summary = if args.summary {
        Some(
            engine
                .summarize()
                .context("scenario produced no session data")?,
        )
    } else {
        None
    };

    output(&SessionRunOutput { reports, summary }, json);
    Ok(())
}
