//! `demo` command: a builtin three-cycle escalation session.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{output, SessionRunOutput};
use crate::domain::models::MetricUpdate;
use crate::services::LoopBreaker;

#[derive(Args, Debug)]
pub struct DemoArgs {}

/// Escalating session: calm, elevated, then critical.
fn demo_updates() -> Vec<MetricUpdate> {
    vec![
        MetricUpdate::new()
            .with_recursion_depth(2)
            .with_symbolic_density(0.3)
            .with_coherence_score(0.9)
            .with_temporal_anchor(0.8)
            .with_emotional_intensity(0.2)
            .with_meaning_saturation(0.2),
        MetricUpdate::new()
            .with_recursion_depth(6)
            .with_symbolic_density(0.7)
            .with_coherence_score(0.6)
            .with_temporal_anchor(0.5)
            .with_emotional_intensity(0.6)
            .with_meaning_saturation(0.6),
        MetricUpdate::new()
            .with_recursion_depth(12)
            .with_symbolic_density(0.9)
            .with_coherence_score(0.3)
            .with_temporal_anchor(0.2)
            .with_emotional_intensity(0.9)
            .with_meaning_saturation(0.8),
    ]
}

pub fn execute(_args: DemoArgs, json: bool) -> Result<()> {
    let mut engine = LoopBreaker::new();
    let reports = demo_updates()
        .into_iter()
        .map(|update| engine.process_cycle(update))
        .collect();
    let summary = engine.summarize().context("demo produced no session data")?;

    output(
        &SessionRunOutput {
            reports,
            summary: Some(summary),
        },
        json,
    );
    Ok(())
}
