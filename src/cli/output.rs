//! Output rendering for CLI commands.
//!
//! Every command builds a serializable output struct implementing
//! `CommandOutput`, rendered either as human-readable text or JSON
//! depending on the global `--json` flag.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};
use serde_json::Value;

use crate::domain::models::{CycleReport, SessionSummary};

/// Dual-format command output.
pub trait CommandOutput {
    fn to_human(&self) -> String;
    fn to_json(&self) -> Value;
}

/// Print a command result in the requested format.
pub fn output<T: CommandOutput>(result: &T, json: bool) {
    if json {
        match serde_json::to_string_pretty(&result.to_json()) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to serialize output: {e}"),
        }
    } else {
        println!("{}", result.to_human());
    }
}

/// Borderless list table with uppercase headers.
fn list_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h.to_uppercase()).set_alignment(CellAlignment::Left)),
        );
    table
}

/// The result of running a full session: one report per cycle, plus an
/// optional closing summary.
#[derive(Debug, serde::Serialize)]
pub struct SessionRunOutput {
    pub reports: Vec<CycleReport>,
    pub summary: Option<SessionSummary>,
}

impl SessionRunOutput {
    fn render_cycle(index: usize, report: &CycleReport) -> String {
        let mut lines = vec![format!(
            "Cycle {}: depth {}, coherence {:.2}, density {:.2}, anchor {:.2}, \
             intensity {:.2}, saturation {:.2} ({:.1} min)",
            index + 1,
            report.state.recursion_depth,
            report.state.coherence_score,
            report.state.symbolic_density,
            report.state.temporal_anchor,
            report.state.emotional_intensity,
            report.state.meaning_saturation,
            report.state.session_duration_minutes,
        )];

        if report.patterns_detected.is_empty() {
            lines.push("  No collapse patterns detected.".to_string());
        } else {
            let mut table = list_table(&["pattern", "confidence", "description"]);
            for detected in &report.patterns_detected {
                table.add_row(vec![
                    Cell::new(detected.pattern.as_str()),
                    Cell::new(format!("{:.1}", detected.confidence)),
                    Cell::new(&detected.description),
                ]);
            }
            lines.push(table.to_string());
        }

        match &report.intervention {
            Some(outcome) => {
                if let Some(error) = outcome.get("error").and_then(Value::as_str) {
                    lines.push(format!("  Intervention FAILED: {error}"));
                    if let Some(fallback) = outcome.get("fallback").and_then(Value::as_str) {
                        lines.push(format!("  Fallback: {fallback}"));
                    }
                } else {
                    let protocol = outcome
                        .get("protocol")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown");
                    let category = outcome
                        .get("type")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown");
                    lines.push(format!(
                        "  Intervention invoked: {protocol} ({category})"
                    ));
                }
            }
            None => lines.push("  No intervention required.".to_string()),
        }

        lines.join("\n")
    }

    fn render_summary(summary: &SessionSummary) -> String {
        let mut lines = vec![
            "Session Summary".to_string(),
            format!("  Session: {}", summary.session_id),
            format!("  Duration: {:.1} minutes", summary.duration_minutes),
            format!("  States recorded: {}", summary.total_states_recorded),
            format!("  Interventions used: {}", summary.interventions_executed),
            format!("  Average coherence: {:.2}", summary.average_coherence),
            format!(
                "  Maximum recursion depth: {}",
                summary.maximum_recursion_depth
            ),
            format!(
                "  Containment activated: {}",
                if summary.containment_activated { "yes" } else { "no" }
            ),
        ];

        if summary.recommendations.is_empty() {
            lines.push("  Recommendations: none".to_string());
        } else {
            lines.push("  Recommendations:".to_string());
            for recommendation in &summary.recommendations {
                lines.push(format!("    - {recommendation}"));
            }
        }

        lines.join("\n")
    }
}

impl CommandOutput for SessionRunOutput {
    fn to_human(&self) -> String {
        let mut sections: Vec<String> = self
            .reports
            .iter()
            .enumerate()
            .map(|(i, report)| Self::render_cycle(i, report))
            .collect();

        if let Some(ref summary) = self.summary {
            sections.push(Self::render_summary(summary));
        }

        sections.join("\n\n")
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
