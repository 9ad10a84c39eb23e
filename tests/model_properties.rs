//! Property-based tests for the classification and derivation invariants:
//! - classification is total and deterministic
//! - relationship (source, target, type) triples are unique
//! - deeper loop nesting never lowers complexity severity
//! - the engine is idempotent over an unchanged fact sequence

use proptest::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;

use archmap::core::facts::{ControlFlowFacts, FactBundle};
use archmap::{analyze_project, config, estimate, Layer};

fn type_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,12}"
}

fn suffix() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Activity".to_string()),
        Just("Fragment".to_string()),
        Just("ViewModel".to_string()),
        Just("Repository".to_string()),
        Just("UseCase".to_string()),
        Just("".to_string()),
    ]
}

fn bundle_strategy() -> impl Strategy<Value = FactBundle> {
    (
        type_name(),
        suffix(),
        proptest::option::of(type_name()),
        proptest::collection::vec(type_name(), 0..3),
    )
        .prop_map(|(stem, suffix, supertype, injected)| FactBundle {
            name: format!("{stem}{suffix}"),
            file_path: PathBuf::from(format!("{stem}.kt")),
            supertype,
            injected_dependencies: injected,
            ..Default::default()
        })
}

proptest! {
    /// Every component receives a layer from the closed set; nothing
    /// falls outside classification.
    #[test]
    fn prop_layer_is_always_assigned(facts in proptest::collection::vec(bundle_strategy(), 0..20)) {
        let result = analyze_project(&facts, config::default_config());
        // Colliding identifiers are dropped with a warning, never kept.
        prop_assert!(result.components.len() + result.warnings.len() >= facts.len());
        let ids: HashSet<_> = result.components.iter().map(|c| c.id.clone()).collect();
        prop_assert_eq!(ids.len(), result.components.len());
        for component in result.components.iter() {
            prop_assert!(matches!(
                component.layer,
                Layer::Ui | Layer::BusinessLogic | Layer::Data | Layer::Other
            ));
        }
    }

    /// (source, target, type) is unique within a result.
    #[test]
    fn prop_relationship_triples_are_unique(facts in proptest::collection::vec(bundle_strategy(), 0..20)) {
        let result = analyze_project(&facts, config::default_config());
        let mut seen = HashSet::new();
        for rel in result.relationships.iter() {
            prop_assert!(
                seen.insert((rel.source.clone(), rel.target.clone(), rel.relationship_type)),
                "duplicate edge {} -> {} ({})",
                rel.source,
                rel.target,
                rel.relationship_type
            );
        }
    }

    /// Edges always land on in-project components.
    #[test]
    fn prop_edges_never_dangle(facts in proptest::collection::vec(bundle_strategy(), 0..20)) {
        let result = analyze_project(&facts, config::default_config());
        for rel in result.relationships.iter() {
            prop_assert!(result.component(&rel.source).is_some());
            prop_assert!(result.component(&rel.target).is_some());
        }
        for component in result.components.iter() {
            for dep in &component.dependencies {
                prop_assert!(result.component(dep).is_some());
            }
        }
    }

    /// Deeper nesting never yields a lower severity, recursion aside.
    #[test]
    fn prop_complexity_severity_is_monotonic(d1 in 0u32..=3, d2 in 0u32..=3) {
        prop_assume!(d1 < d2);
        let shallow = estimate(&ControlFlowFacts { loop_depth: d1, ..Default::default() });
        let deep = estimate(&ControlFlowFacts { loop_depth: d2, ..Default::default() });
        prop_assert!(deep.severity >= shallow.severity);
        prop_assert!(deep.time_complexity >= shallow.time_complexity);
    }

    /// Re-running on the same fact sequence yields the same model.
    #[test]
    fn prop_analysis_is_idempotent(facts in proptest::collection::vec(bundle_strategy(), 0..12)) {
        let first = analyze_project(&facts, config::default_config());
        let second = analyze_project(&facts, config::default_config());
        prop_assert_eq!(
            Vec::from_iter(first.components.iter().cloned()),
            Vec::from_iter(second.components.iter().cloned())
        );
        prop_assert_eq!(
            Vec::from_iter(first.relationships.iter().cloned()),
            Vec::from_iter(second.relationships.iter().cloned())
        );
        prop_assert_eq!(
            Vec::from_iter(first.user_flows.iter().cloned()),
            Vec::from_iter(second.user_flows.iter().cloned())
        );
    }
}
