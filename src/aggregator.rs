//! Pipeline orchestration and result assembly.
//!
//! The aggregator owns the result graph: components are normalized and
//! classified first, then the three derivations (relationships, flows,
//! method complexity) run as parallel read-only passes over the same
//! immutable component list via nested `rayon::join`, and their outputs
//! are joined here. Cross-references in the result are identifier
//! lookups, never shared pointers, so the model serializes cleanly.
//!
//! Failure is never all-or-nothing: a stage error or a cancellation
//! sets the result's `error` field and leaves everything built so far
//! in place.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::builder;
use crate::classify;
use crate::complexity;
use crate::config::ClassificationConfig;
use crate::core::errors::Error;
use crate::core::facts::{ControlFlowFacts, FactBundle};
use crate::core::{AnalysisSummary, Component, Layer, ProjectAnalysisResult, RelationshipType, Severity};

/// Run one full analysis over a fact sequence.
pub fn analyze_project(
    facts: &[FactBundle],
    config: &ClassificationConfig,
) -> ProjectAnalysisResult {
    let never_cancelled = AtomicBool::new(false);
    analyze_project_with_cancel(facts, config, &never_cancelled)
}

/// Like [`analyze_project`], but stops scheduling further components
/// once `cancel` is set. The partial result is safe to discard.
pub fn analyze_project_with_cancel(
    facts: &[FactBundle],
    config: &ClassificationConfig,
    cancel: &AtomicBool,
) -> ProjectAnalysisResult {
    let mut result = ProjectAnalysisResult::new();

    // Stage 1: normalize and classify, appending monotonically.
    // Identifiers are unique within a model; a colliding bundle is
    // dropped with a warning, first registration wins.
    let mut components: Vec<Component> = Vec::with_capacity(facts.len());
    let mut kept_bundles: Vec<&FactBundle> = Vec::with_capacity(facts.len());
    let mut seen_ids: std::collections::HashSet<String> = std::collections::HashSet::new();
    for bundle in facts {
        if cancel.load(Ordering::Relaxed) {
            result.components = components.into();
            result.error = Some(Error::Cancelled.to_string());
            return result;
        }
        let built = builder::build_component(bundle);
        if let Some(warning) = built.warning {
            result.warnings.push_back(warning);
        }
        let mut component = built.component;
        if !seen_ids.insert(component.id.clone()) {
            result
                .warnings
                .push_back(format!("duplicate component identifier {}", component.id));
            continue;
        }
        classify::classify(&mut component, config);
        components.push(component);
        kept_bundles.push(bundle);
    }

    // Stage 2: the three derivations are mutually independent and
    // read-only over the classified list.
    let facts_index = control_flow_index(&kept_bundles, &components);
    let (relationships, (flow_model, method_complexity)) = rayon::join(
        || crate::relationships::build_relationships(&components),
        || {
            rayon::join(
                || crate::flow::derive_flows(&components, config),
                || {
                    complexity::annotate_components(&components, |id, method| {
                        facts_index.get(&(id.to_string(), method)).copied()
                    })
                },
            )
        },
    );

    if cancel.load(Ordering::Relaxed) {
        result.components = components.into();
        result.error = Some(Error::Cancelled.to_string());
        return result;
    }

    // Stage 3: join the outputs into the owned result graph.
    attach_complexity(&mut components, method_complexity);
    attach_dependencies(&mut components, &relationships);

    result.summary = summarize(&components, &relationships, &flow_model.flows);
    result.components = components.into();
    result.relationships = relationships.into();
    result.navigation_flows = flow_model.flows.into();
    result.user_flows = flow_model.user_flows.into();
    result.business_processes = flow_model.business_processes.into();
    result
}

/// Control-flow facts keyed by (component id, method index). The
/// builder preserves method order, so positions line up.
fn control_flow_index(
    facts: &[&FactBundle],
    components: &[Component],
) -> HashMap<(String, usize), ControlFlowFacts> {
    let mut index = HashMap::new();
    for (bundle, component) in facts.iter().zip(components) {
        for (i, method) in bundle.methods.iter().enumerate() {
            if let Some(cf) = method.control_flow {
                index.insert((component.id.clone(), i), cf);
            }
        }
    }
    index
}

fn attach_complexity(
    components: &mut [Component],
    annotations: Vec<complexity::MethodComplexity>,
) {
    let mut by_id: HashMap<&str, usize> = HashMap::new();
    for (i, component) in components.iter().enumerate() {
        by_id.entry(component.id.as_str()).or_insert(i);
    }
    // Borrow of components ends before the mutation below.
    let positions: Vec<(usize, usize, complexity::MethodComplexity)> = annotations
        .into_iter()
        .filter_map(|a| {
            by_id
                .get(a.component_id.as_str())
                .map(|&ci| (ci, a.method_index, a))
        })
        .collect();
    for (ci, mi, annotation) in positions {
        if let Some(method) = components[ci].methods.get_mut(mi) {
            method.complexity = Some(annotation.info);
        }
    }
}

/// A component's `dependencies` list holds exactly the resolved targets
/// of its DEPENDS_ON edges, so it can never dangle.
fn attach_dependencies(components: &mut [Component], relationships: &[crate::core::Relationship]) {
    let mut by_source: HashMap<&str, Vec<String>> = HashMap::new();
    for rel in relationships {
        if rel.relationship_type == RelationshipType::DependsOn {
            by_source
                .entry(rel.source.as_str())
                .or_default()
                .push(rel.target.clone());
        }
    }
    for component in components.iter_mut() {
        if let Some(targets) = by_source.remove(component.id.as_str()) {
            component.dependencies = targets;
        }
    }
}

fn summarize(
    components: &[Component],
    relationships: &[crate::core::Relationship],
    flows: &[crate::core::NavigationFlow],
) -> AnalysisSummary {
    let layer_count = |layer: Layer| components.iter().filter(|c| c.layer == layer).count();
    let high_severity_methods = components
        .iter()
        .flat_map(|c| &c.methods)
        .filter(|m| {
            m.complexity
                .as_ref()
                .is_some_and(|info| info.severity >= Severity::High)
        })
        .count();

    AnalysisSummary {
        total_components: components.len(),
        ui_components: layer_count(Layer::Ui),
        business_logic_components: layer_count(Layer::BusinessLogic),
        data_components: layer_count(Layer::Data),
        other_components: layer_count(Layer::Other),
        total_relationships: relationships.len(),
        total_navigation_flows: flows.len(),
        high_severity_methods,
    }
}

/// Read-only layer views over a finished result.
pub trait LayerViews {
    fn ui_components(&self, config: &ClassificationConfig) -> Vec<&Component>;
    fn business_logic_components(&self) -> Vec<&Component>;
    fn data_components(&self) -> Vec<&Component>;
}

impl LayerViews for ProjectAnalysisResult {
    /// UI view; honors the configured filter mode, so the name
    /// heuristic can widen the set beyond the classified layer.
    fn ui_components(&self, config: &ClassificationConfig) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| classify::is_ui_component(c, config))
            .collect()
    }

    fn business_logic_components(&self) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| c.layer == Layer::BusinessLogic)
            .collect()
    }

    fn data_components(&self) -> Vec<&Component> {
        self.components
            .iter()
            .filter(|c| c.layer == Layer::Data)
            .collect()
    }
}
