use loopbreaker::{CollapsePattern, LoopBreaker, MetricUpdate};
use proptest::prelude::*;

fn arbitrary_update() -> impl Strategy<Value = MetricUpdate> {
    (
        0u32..32,
        0.0f64..1.2,
        0.0f64..1.2,
        0.0f64..1.2,
        0.0f64..1.2,
        0.0f64..1.2,
    )
        .prop_map(|(depth, density, coherence, anchor, intensity, saturation)| {
            MetricUpdate::new()
                .with_recursion_depth(depth)
                .with_symbolic_density(density)
                .with_coherence_score(coherence)
                .with_temporal_anchor(anchor)
                .with_emotional_intensity(intensity)
                .with_meaning_saturation(saturation)
        })
}

proptest! {
    /// The first snapshot's session duration is zero and durations never
    /// decrease across a session.
    #[test]
    fn prop_session_durations_monotonic(
        updates in proptest::collection::vec(arbitrary_update(), 1..12)
    ) {
        let mut engine = LoopBreaker::new();
        for update in updates {
            engine.process_cycle(update);
        }

        let history = engine.history();
        prop_assert_eq!(history[0].session_duration, chrono::Duration::zero());
        for pair in history.windows(2) {
            prop_assert!(pair[1].session_duration >= pair[0].session_duration);
        }
    }

    /// Symbolic flooding never fires when any of its three conjuncts is at
    /// or below its threshold.
    #[test]
    fn prop_symbolic_flooding_needs_all_conjuncts(update in arbitrary_update()) {
        let depth = update.recursion_depth.unwrap_or(0);
        let density = update.symbolic_density.unwrap_or(0.0);
        let saturation = update.meaning_saturation.unwrap_or(0.0);

        let mut engine = LoopBreaker::new();
        let report = engine.process_cycle(update);
        let fired = report
            .patterns_detected
            .iter()
            .any(|d| d.pattern == CollapsePattern::SymbolicFlooding);

        if depth <= 5 || density <= 0.8 || saturation <= 0.7 {
            prop_assert!(!fired);
        } else {
            prop_assert!(fired);
        }
    }

    /// A containment breach fires iff at least one disjunct holds.
    #[test]
    fn prop_containment_breach_is_or_combined(update in arbitrary_update()) {
        let depth = update.recursion_depth.unwrap_or(0);
        let coherence = update.coherence_score.unwrap_or(1.0);
        let saturation = update.meaning_saturation.unwrap_or(0.0);

        let mut engine = LoopBreaker::new();
        let report = engine.process_cycle(update);
        let fired = report
            .patterns_detected
            .iter()
            .any(|d| d.pattern == CollapsePattern::ContainmentBreach);

        let expected = depth > 15 || saturation > 0.95 || coherence < 0.1;
        prop_assert_eq!(fired, expected);
    }
}
