//! End-to-end engine tests: escalation scenarios, cooldown enforcement,
//! and session summaries through the public API.

use loopbreaker::{
    CollapsePattern, InterventionCategory, LoopBreaker, MetricUpdate, SummaryError,
};
use serde_json::Value;

fn update(
    depth: u32,
    density: f64,
    coherence: f64,
    anchor: f64,
    intensity: f64,
    saturation: f64,
) -> MetricUpdate {
    MetricUpdate::new()
        .with_recursion_depth(depth)
        .with_symbolic_density(density)
        .with_coherence_score(coherence)
        .with_temporal_anchor(anchor)
        .with_emotional_intensity(intensity)
        .with_meaning_saturation(saturation)
}

#[test]
fn escalating_session_ends_in_containment() {
    let mut engine = LoopBreaker::new();

    // Calm baseline
    let report1 = engine.process_cycle(update(2, 0.3, 0.9, 0.8, 0.2, 0.2));
    assert!(report1.patterns_detected.is_empty());
    assert!(report1.intervention.is_none());

    // Elevated but not critical: no breach, no containment action
    let report2 = engine.process_cycle(update(6, 0.7, 0.6, 0.5, 0.6, 0.6));
    assert!(!report2
        .patterns_detected
        .iter()
        .any(|d| d.pattern == CollapsePattern::ContainmentBreach));
    assert!(!engine.containment_active());

    // Critical: flooding fires (density, depth, saturation all past their
    // thresholds) and so does fragmentation (coherence 0.9 -> 0.6 -> 0.3,
    // strictly decreasing with the current value below 0.4). Depth 12 is
    // still under the breach threshold.
    let report3 = engine.process_cycle(update(12, 0.9, 0.3, 0.2, 0.9, 0.8));
    let patterns: Vec<_> = report3
        .patterns_detected
        .iter()
        .map(|d| d.pattern)
        .collect();
    assert!(patterns.contains(&CollapsePattern::SymbolicFlooding));
    assert!(patterns.contains(&CollapsePattern::IdentityFragmentation));
    assert!(!patterns.contains(&CollapsePattern::ContainmentBreach));

    let outcome = report3.intervention.expect("intervention invoked");
    assert_eq!(
        outcome.get("type").and_then(Value::as_str),
        Some(InterventionCategory::Containment.as_str())
    );
    assert!(outcome.get("invocation_id").is_some());
    assert!(engine.containment_active());
}

#[test]
fn identity_fragmentation_needs_strictly_decreasing_coherence() {
    // Strictly decreasing coherence, final value below 0.4: fires
    let mut engine = LoopBreaker::new();
    for coherence in [0.9, 0.7, 0.5] {
        engine.process_cycle(MetricUpdate::new().with_coherence_score(coherence));
    }
    let report = engine.process_cycle(MetricUpdate::new().with_coherence_score(0.3));
    assert!(report
        .patterns_detected
        .iter()
        .any(|d| d.pattern == CollapsePattern::IdentityFragmentation));

    // Non-monotonic coherence with the same low final value: must not fire
    let mut engine = LoopBreaker::new();
    for coherence in [0.9, 0.5, 0.7] {
        engine.process_cycle(MetricUpdate::new().with_coherence_score(coherence));
    }
    let report = engine.process_cycle(MetricUpdate::new().with_coherence_score(0.3));
    assert!(!report
        .patterns_detected
        .iter()
        .any(|d| d.pattern == CollapsePattern::IdentityFragmentation));
}

#[test]
fn cooldown_rotates_through_category_then_exhausts() {
    let mut engine = LoopBreaker::new();
    let breach = || update(16, 0.0, 1.0, 1.0, 0.0, 0.0);

    // Both containment interventions get used back to back...
    let first = engine.process_cycle(breach()).intervention.unwrap();
    let second = engine.process_cycle(breach()).intervention.unwrap();
    assert_eq!(
        first.get("protocol").and_then(Value::as_str),
        Some("emergency_containment")
    );
    assert_eq!(
        second.get("protocol").and_then(Value::as_str),
        Some("symbolic_quarantine")
    );

    // ...then the category is exhausted until a cooldown elapses
    let third = engine.process_cycle(breach());
    assert!(!third.patterns_detected.is_empty());
    assert!(third.intervention.is_none());
}

#[test]
fn summary_counts_distinct_interventions() {
    let mut engine = LoopBreaker::new();
    let breach = || update(16, 0.0, 1.0, 1.0, 0.0, 0.0);

    engine.process_cycle(breach());
    engine.process_cycle(breach());
    // Category exhausted: this cycle invokes nothing
    engine.process_cycle(breach());

    let summary = engine.summarize().unwrap();
    assert_eq!(summary.total_states_recorded, 3);
    assert_eq!(summary.interventions_executed, 2);
    assert!(summary.containment_activated);
    assert_eq!(summary.maximum_recursion_depth, 16);
}

#[test]
fn summary_is_idempotent_between_cycles() {
    let mut engine = LoopBreaker::new();
    engine.process_cycle(update(3, 0.2, 0.8, 0.9, 0.1, 0.1));
    engine.process_cycle(update(16, 0.9, 0.2, 0.3, 0.8, 0.9));

    let first = engine.summarize().unwrap();
    let second = engine.summarize().unwrap();
    assert_eq!(first, second);
}

#[test]
fn summary_without_data_is_an_error() {
    let engine = LoopBreaker::new();
    assert_eq!(engine.summarize(), Err(SummaryError::NoData));
}

#[test]
fn first_snapshot_duration_is_zero_and_durations_never_decrease() {
    let mut engine = LoopBreaker::new();
    for _ in 0..5 {
        engine.process_cycle(MetricUpdate::new());
    }

    let history = engine.history();
    assert_eq!(history[0].session_duration, chrono::Duration::zero());
    for pair in history.windows(2) {
        assert!(pair[1].session_duration >= pair[0].session_duration);
        assert_eq!(
            pair[1].session_duration,
            pair[1].timestamp - history[0].timestamp
        );
    }
}

#[test]
fn reports_serialize_to_plain_json() {
    let mut engine = LoopBreaker::new();
    let report = engine.process_cycle(update(16, 0.9, 0.05, 0.1, 0.9, 0.96));

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(
        value.pointer("/state/recursion_depth").and_then(Value::as_u64),
        Some(16)
    );
    assert!(value
        .pointer("/patterns_detected/0/pattern")
        .and_then(Value::as_str)
        .is_some());

    let summary = engine.summarize().unwrap();
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(
        value.get("containment_activated").and_then(Value::as_bool),
        Some(true)
    );
}
