//! Navigation graph and user-flow derivation.
//!
//! Screens become [`UserFlowComponent`] nodes and navigation targets
//! become [`NavigationFlow`] edges. Node classification follows a fixed
//! priority: error handling, then entry/exit, then decision, then main
//! flow. Blocking conditions are recorded on edges; reachability under
//! conditions belongs to downstream consumers.

use petgraph::graphmap::DiGraphMap;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::classify;
use crate::config::ClassificationConfig;
use crate::core::{
    BusinessProcess, Component, FlowPath, FlowType, NavigationFlow, NavigationType,
    UserFlowComponent,
};
use crate::relationships::ComponentIndex;

/// Everything the flow stage hands to the aggregator.
pub struct FlowModel {
    pub flows: Vec<NavigationFlow>,
    pub user_flows: Vec<UserFlowComponent>,
    pub business_processes: Vec<BusinessProcess>,
}

/// Derive the complete flow model from the classified component list.
pub fn derive_flows(components: &[Component], config: &ClassificationConfig) -> FlowModel {
    let index = ComponentIndex::new(components);
    let screens = screen_components(components, &index, config);
    let flows = navigation_edges(components, &index, &screens);

    let graph: DiGraphMap<usize, ()> = build_graph(&screens, &flows);
    let by_source = flows_by_source(&flows);

    let user_flows: Vec<UserFlowComponent> = screens
        .iter()
        .enumerate()
        .map(|(node, id)| {
            let component = components.iter().find(|c| &c.id == *id);
            build_user_flow(component, id.as_str(), node, &graph, &by_source, config)
        })
        .collect();

    let business_processes = derive_business_processes(&screens, &graph, &user_flows);

    FlowModel {
        flows,
        user_flows,
        business_processes,
    }
}

/// Screen-like components: anything UI by classification or name, plus
/// anything that participates in navigation, so the graph is closed
/// over its own edges.
fn screen_components<'a>(
    components: &'a [Component],
    index: &ComponentIndex,
    config: &ClassificationConfig,
) -> Vec<&'a String> {
    let mut in_navigation: HashSet<&str> = HashSet::new();
    for component in components {
        for nav in &component.navigation_targets {
            if let Some(target) = index.resolve(&nav.target) {
                in_navigation.insert(target);
            }
        }
        if !component.navigation_targets.is_empty() {
            in_navigation.insert(&component.id);
        }
    }

    components
        .iter()
        .filter(|c| classify::is_ui_component(c, config) || in_navigation.contains(c.id.as_str()))
        .map(|c| &c.id)
        .collect()
}

/// Navigation edges whose source and target both resolve to screens.
///
/// Parallel routes between the same pair of screens are distinct edges
/// as long as they differ in navigation type or conditions; collapsing
/// them would hide an ungated route behind a gated one (and the other
/// way round) in downstream reachability analysis. Only exact
/// re-derivations are dropped.
fn navigation_edges(
    components: &[Component],
    index: &ComponentIndex,
    screens: &[&String],
) -> Vec<NavigationFlow> {
    let screen_set: HashSet<&str> = screens.iter().map(|s| s.as_str()).collect();
    let mut seen: HashSet<(String, String, NavigationType, String)> = HashSet::new();
    let mut flows = Vec::new();

    for component in components {
        if !screen_set.contains(component.id.as_str()) {
            continue;
        }
        for nav in &component.navigation_targets {
            let Some(target) = index.resolve(&nav.target) else {
                continue;
            };
            if !screen_set.contains(target) || target == component.id {
                continue;
            }
            let flow = NavigationFlow {
                source: component.id.clone(),
                target: target.to_string(),
                navigation_type: nav.navigation_type,
                conditions: nav.conditions.clone(),
            };
            let key = (
                flow.source.clone(),
                flow.target.clone(),
                flow.navigation_type,
                condition_signature(&flow),
            );
            if seen.insert(key) {
                flows.push(flow);
            }
        }
    }

    flows
}

fn build_graph(screens: &[&String], flows: &[NavigationFlow]) -> DiGraphMap<usize, ()> {
    let position: HashMap<&str, usize> = screens
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut graph = DiGraphMap::new();
    for i in 0..screens.len() {
        graph.add_node(i);
    }
    for flow in flows {
        if let (Some(&s), Some(&t)) = (position.get(flow.source.as_str()), position.get(flow.target.as_str())) {
            graph.add_edge(s, t, ());
        }
    }
    graph
}

fn flows_by_source<'a>(flows: &'a [NavigationFlow]) -> HashMap<&'a str, Vec<&'a NavigationFlow>> {
    let mut by_source: HashMap<&str, Vec<&NavigationFlow>> = HashMap::new();
    for flow in flows {
        by_source.entry(flow.source.as_str()).or_default().push(flow);
    }
    by_source
}

fn build_user_flow(
    component: Option<&Component>,
    id: &str,
    node: usize,
    graph: &DiGraphMap<usize, ()>,
    by_source: &HashMap<&str, Vec<&NavigationFlow>>,
    config: &ClassificationConfig,
) -> UserFlowComponent {
    let outgoing = by_source.get(id).map(Vec::as_slice).unwrap_or(&[]);
    let incoming_count = graph
        .neighbors_directed(node, petgraph::Direction::Incoming)
        .count();

    let flow_type = classify_flow_type(component, incoming_count, outgoing, config);

    let outgoing_paths = outgoing
        .iter()
        .map(|flow| FlowPath {
            flow: (*flow).clone(),
            description: format!("{} -> {}", flow.source, flow.target),
        })
        .collect();

    let (screen_name, user_actions, business_context) = match component {
        Some(c) => (
            c.name.clone(),
            handler_actions(c),
            (!c.package.is_empty()).then(|| c.package.clone()),
        ),
        None => (id.to_string(), Vec::new(), None),
    };

    UserFlowComponent {
        id: id.to_string(),
        screen_name,
        flow_type,
        outgoing_paths,
        user_actions,
        business_context,
        // Measured by a profiling collaborator, not by this engine.
        performance_metrics: None,
    }
}

/// Fixed classification priority: error handling, entry, exit,
/// decision, main flow. An isolated screen is an entry point.
fn classify_flow_type(
    component: Option<&Component>,
    incoming_count: usize,
    outgoing: &[&NavigationFlow],
    config: &ClassificationConfig,
) -> FlowType {
    if component.is_some_and(|c| is_error_screen(c, config)) {
        return FlowType::ErrorHandling;
    }
    if incoming_count == 0 {
        return FlowType::EntryPoint;
    }
    if outgoing.is_empty() {
        return FlowType::ExitPoint;
    }
    if is_decision(outgoing) {
        return FlowType::DecisionPoint;
    }
    FlowType::MainFlow
}

fn is_error_screen(component: &Component, config: &ClassificationConfig) -> bool {
    let name = component.name.to_lowercase();
    config.error_screen_markers.iter().any(|marker| {
        name.contains(marker.as_str())
            || component
                .annotations
                .iter()
                .any(|a| a.to_lowercase().contains(marker.as_str()))
    })
}

/// At least two outgoing edges whose condition sets differ.
fn is_decision(outgoing: &[&NavigationFlow]) -> bool {
    if outgoing.len() < 2 {
        return false;
    }
    let distinct: HashSet<String> = outgoing
        .iter()
        .map(|flow| condition_signature(flow))
        .collect();
    distinct.len() >= 2
}

fn condition_signature(flow: &NavigationFlow) -> String {
    let mut parts: Vec<String> = flow
        .conditions
        .iter()
        .map(|c| format!("{}:{}:{}", c.condition_type, c.predicate, c.is_blocking))
        .collect();
    parts.sort();
    parts.join("|")
}

/// Event-handler methods stand in for the user actions on a screen.
fn handler_actions(component: &Component) -> Vec<String> {
    component
        .methods
        .iter()
        .filter(|m| m.name.starts_with("on") && m.name.len() > 2)
        .map(|m| m.name.clone())
        .collect()
}

/// One business process per entry point: the chain of screens reachable
/// from it, in breadth-first order.
fn derive_business_processes(
    screens: &[&String],
    graph: &DiGraphMap<usize, ()>,
    user_flows: &[UserFlowComponent],
) -> Vec<BusinessProcess> {
    user_flows
        .iter()
        .filter(|uf| uf.flow_type == FlowType::EntryPoint && !uf.outgoing_paths.is_empty())
        .map(|entry| {
            let start = screens
                .iter()
                .position(|id| **id == entry.id)
                .unwrap_or_default();
            let mut visited = vec![start];
            let mut queue: VecDeque<usize> = VecDeque::from([start]);
            while let Some(node) = queue.pop_front() {
                for next in graph.neighbors_directed(node, petgraph::Direction::Outgoing) {
                    if !visited.contains(&next) {
                        visited.push(next);
                        queue.push_back(next);
                    }
                }
            }
            BusinessProcess {
                name: format!("{} flow", entry.screen_name),
                entry_screen: entry.id.clone(),
                screens: visited.iter().map(|&i| screens[i].clone()).collect(),
            }
        })
        .collect()
}
