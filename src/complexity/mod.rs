//! Static complexity estimation from control-flow shape.
//!
//! The estimator never inspects method bodies; it works from the loop
//! nesting depth and recursion facts the parser measured. Classification
//! applies a fixed rule list, first match wins, so two methods with the
//! same shape always receive the same estimate.

use crate::core::facts::ControlFlowFacts;
use crate::core::{Component, ComplexityClass, ComplexityInfo};

/// One method's estimate, addressed by component id and method position.
pub struct MethodComplexity {
    pub component_id: String,
    pub method_index: usize,
    pub info: ComplexityInfo,
}

/// Estimate every method with recorded control-flow facts.
///
/// Runs read-only over the component list; the aggregator attaches the
/// annotations to its own copy of the components.
pub fn annotate_components(
    components: &[Component],
    facts_for: impl Fn(&str, usize) -> Option<ControlFlowFacts>,
) -> Vec<MethodComplexity> {
    components
        .iter()
        .flat_map(|component| {
            component.methods.iter().enumerate().filter_map(|(i, _)| {
                facts_for(&component.id, i).map(|facts| MethodComplexity {
                    component_id: component.id.clone(),
                    method_index: i,
                    info: estimate(&facts),
                })
            })
        })
        .collect()
}

/// Estimate time and space complexity for one method.
pub fn estimate(facts: &ControlFlowFacts) -> ComplexityInfo {
    let mut contributors = Contributors::new();

    let time_complexity = classify_time(facts, &mut contributors);
    let space_complexity = classify_space(facts, &mut contributors);

    let rationale = contributors.rationale(time_complexity);
    let severity = time_complexity.severity();

    ComplexityInfo {
        time_complexity,
        space_complexity,
        loop_depth: facts.loop_depth,
        has_recursion: facts.has_recursion,
        rationale,
        contributors: contributors.into_inner(),
        severity,
    }
}

fn classify_time(facts: &ControlFlowFacts, contributors: &mut Contributors) -> ComplexityClass {
    if facts.loop_depth > 0 {
        contributors.add(format!("nested loop depth {}", facts.loop_depth));
    }

    // Tree recursion dominates any loop structure.
    if facts.has_recursion && facts.branching_recursion {
        contributors.add("branching recursion".to_string());
        return ComplexityClass::Exponential;
    }

    if facts.has_recursion {
        contributors.add("single recursion".to_string());
    }

    match facts.loop_depth {
        0 => ComplexityClass::Constant,
        1 => ComplexityClass::Linear,
        2 => ComplexityClass::Quadratic,
        _ => ComplexityClass::Cubic,
    }
}

fn classify_space(facts: &ControlFlowFacts, contributors: &mut Contributors) -> ComplexityClass {
    if facts.allocates_per_input {
        contributors.add("auxiliary list growth".to_string());
        return ComplexityClass::Linear;
    }
    if facts.has_recursion {
        contributors.add("recursive stack growth".to_string());
        return ComplexityClass::Linear;
    }
    ComplexityClass::Constant
}

/// Insertion-ordered contributor set; duplicates are dropped on insert.
struct Contributors(Vec<String>);

impl Contributors {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn add(&mut self, contributor: String) {
        if !self.0.contains(&contributor) {
            self.0.push(contributor);
        }
    }

    fn rationale(&self, time: ComplexityClass) -> String {
        if self.0.is_empty() {
            format!("{}: no loops or recursion", time.label())
        } else {
            format!("{}: {}", time.label(), self.0.join(", "))
        }
    }

    fn into_inner(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;

    fn facts(loop_depth: u32, has_recursion: bool) -> ControlFlowFacts {
        ControlFlowFacts {
            loop_depth,
            has_recursion,
            branching_recursion: false,
            allocates_per_input: false,
        }
    }

    #[test]
    fn straight_line_code_is_constant() {
        let info = estimate(&facts(0, false));
        assert_eq!(info.time_complexity, ComplexityClass::Constant);
        assert_eq!(info.space_complexity, ComplexityClass::Constant);
        assert_eq!(info.severity, Severity::Low);
        assert!(info.rationale.contains("no loops or recursion"));
    }

    #[test]
    fn double_loop_is_quadratic_with_severity_three() {
        let info = estimate(&facts(2, false));
        assert_eq!(info.time_complexity, ComplexityClass::Quadratic);
        assert_eq!(info.time_complexity.label(), "O(n²)");
        assert_eq!(info.severity.level(), 3);
        assert!(info.contributors.contains(&"nested loop depth 2".to_string()));
    }

    #[test]
    fn depth_caps_at_cubic() {
        assert_eq!(estimate(&facts(3, false)).time_complexity, ComplexityClass::Cubic);
        assert_eq!(estimate(&facts(7, false)).time_complexity, ComplexityClass::Cubic);
    }

    #[test]
    fn branching_recursion_upgrades_to_exponential() {
        let info = estimate(&ControlFlowFacts {
            loop_depth: 2,
            has_recursion: true,
            branching_recursion: true,
            allocates_per_input: false,
        });
        assert_eq!(info.time_complexity, ComplexityClass::Exponential);
        assert_eq!(info.severity, Severity::Critical);
        assert!(info.contributors.contains(&"branching recursion".to_string()));
        // The loop contributor is still reported even though recursion
        // dominates the classification.
        assert!(info.contributors.contains(&"nested loop depth 2".to_string()));
    }

    #[test]
    fn single_recursion_keeps_loop_derived_class() {
        let info = estimate(&facts(1, true));
        assert_eq!(info.time_complexity, ComplexityClass::Linear);
        assert!(info.contributors.contains(&"single recursion".to_string()));
        assert_eq!(info.space_complexity, ComplexityClass::Linear);
        assert!(info.contributors.contains(&"recursive stack growth".to_string()));
    }

    #[test]
    fn auxiliary_allocation_grows_space() {
        let info = estimate(&ControlFlowFacts {
            loop_depth: 1,
            has_recursion: false,
            branching_recursion: false,
            allocates_per_input: true,
        });
        assert_eq!(info.space_complexity, ComplexityClass::Linear);
        assert!(info.contributors.contains(&"auxiliary list growth".to_string()));
    }

    #[test]
    fn contributors_are_deduplicated() {
        let mut contributors = Contributors::new();
        contributors.add("single recursion".to_string());
        contributors.add("single recursion".to_string());
        assert_eq!(contributors.into_inner().len(), 1);
    }

    #[test]
    fn rationale_names_every_contributor() {
        let info = estimate(&ControlFlowFacts {
            loop_depth: 2,
            has_recursion: true,
            branching_recursion: false,
            allocates_per_input: true,
        });
        for contributor in &info.contributors {
            assert!(info.rationale.contains(contributor), "missing {contributor}");
        }
    }
}
