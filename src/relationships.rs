//! Relationship derivation over the classified component list.
//!
//! Resolution is name-based against an in-project index; the first
//! registered component wins for a shadowed simple name. Names that do
//! not resolve stay recorded on the component (external supertypes,
//! injected names) and never produce a dangling edge.

use std::collections::{HashMap, HashSet};

use crate::core::{Component, Relationship, RelationshipType};

/// Name index over the component list. Keys are both bare names and
/// fully qualified identifiers; values are component identifiers.
pub struct ComponentIndex {
    by_name: HashMap<String, String>,
}

impl ComponentIndex {
    pub fn new(components: &[Component]) -> Self {
        let mut by_name = HashMap::new();
        for component in components {
            // First registration wins on ambiguous names.
            by_name
                .entry(component.name.clone())
                .or_insert_with(|| component.id.clone());
            by_name
                .entry(component.id.clone())
                .or_insert_with(|| component.id.clone());
        }
        Self { by_name }
    }

    /// Resolve a referenced name, accepting qualified forms by trying
    /// the full string first and its last segment second.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        if let Some(id) = self.by_name.get(name) {
            return Some(id.as_str());
        }
        name.rsplit('.')
            .next()
            .and_then(|simple| self.by_name.get(simple))
            .map(String::as_str)
    }
}

/// Derive the full relationship set for a project.
pub fn build_relationships(components: &[Component]) -> Vec<Relationship> {
    let index = ComponentIndex::new(components);
    let mut edges = EdgeSet::new();

    for component in components {
        derive_extends(component, &index, &mut edges);
        derive_implements(component, &index, &mut edges);
        derive_dependencies(component, &index, &mut edges);
        derive_field_edges(component, &index, &mut edges);
        derive_usage_edges(component, &index, &mut edges);
    }

    edges.into_vec()
}

fn derive_extends(component: &Component, index: &ComponentIndex, edges: &mut EdgeSet) {
    let Some(supertype) = component.supertype.as_deref() else {
        return;
    };
    // Unresolved base classes are external; the supertype stays recorded
    // on the component with no edge.
    if let Some(target) = index.resolve(supertype) {
        if target != component.id {
            edges.add(
                &component.id,
                target,
                RelationshipType::Extends,
                format!("{} extends {}", component.name, supertype),
            );
        }
    }
}

fn derive_implements(component: &Component, index: &ComponentIndex, edges: &mut EdgeSet) {
    for interface in &component.implements {
        if let Some(target) = index.resolve(interface) {
            if target != component.id {
                edges.add(
                    &component.id,
                    target,
                    RelationshipType::Implements,
                    format!("{} implements {}", component.name, interface),
                );
            }
        }
    }
}

fn derive_dependencies(component: &Component, index: &ComponentIndex, edges: &mut EdgeSet) {
    for name in &component.injected_dependencies {
        if let Some(target) = index.resolve(name) {
            edges.add(
                &component.id,
                target,
                RelationshipType::DependsOn,
                format!("{} depends on {}", component.name, name),
            );
        }
    }
}

/// Field-typed references: owned single references compose, collection
/// or optional references aggregate.
fn derive_field_edges(component: &Component, index: &ComponentIndex, edges: &mut EdgeSet) {
    for field in &component.fields {
        let relationship_type = if is_shared_reference(&field.type_name) {
            RelationshipType::Aggregates
        } else {
            RelationshipType::Composes
        };
        for referenced in referenced_type_names(&field.type_name) {
            if let Some(target) = index.resolve(referenced) {
                if target == component.id {
                    continue;
                }
                edges.add(
                    &component.id,
                    target,
                    relationship_type,
                    format!("{} holds {} via field {}", component.name, referenced, field.name),
                );
            }
        }
    }
}

/// Parameter and return references without a backing field become USES.
fn derive_usage_edges(component: &Component, index: &ComponentIndex, edges: &mut EdgeSet) {
    let field_targets: HashSet<String> = component
        .fields
        .iter()
        .flat_map(|f| referenced_type_names(&f.type_name))
        .filter_map(|name| index.resolve(name))
        .map(String::from)
        .collect();

    for method in &component.methods {
        let referenced = method
            .parameters
            .iter()
            .map(|p| p.type_name.as_str())
            .chain(std::iter::once(method.return_type.as_str()));
        for type_name in referenced {
            for name in referenced_type_names(type_name) {
                let Some(target) = index.resolve(name) else {
                    continue;
                };
                if target == component.id || field_targets.contains(target) {
                    continue;
                }
                edges.add(
                    &component.id,
                    target,
                    RelationshipType::Uses,
                    format!("{} uses {} in {}", component.name, name, method.name),
                );
            }
        }
    }
}

/// A collection-typed, optional or weakly held reference is shared
/// rather than owned.
fn is_shared_reference(type_name: &str) -> bool {
    static SHARED_WRAPPERS: &[&str] = &[
        "List<",
        "MutableList<",
        "Set<",
        "MutableSet<",
        "Map<",
        "MutableMap<",
        "Collection<",
        "Array<",
        "ArrayList<",
        "Optional<",
        "WeakReference<",
        "Lazy<",
    ];

    let trimmed = type_name.trim();
    trimmed.ends_with('?')
        || trimmed.ends_with("[]")
        || SHARED_WRAPPERS.iter().any(|w| {
            trimmed.starts_with(w) || trimmed.contains(&format!(".{w}"))
        })
}

/// Identifier tokens inside a possibly generic type string, e.g.
/// `Map<String, OrderRepository>` yields `Map`, `String`,
/// `OrderRepository`. Resolution filters out the non-component ones.
fn referenced_type_names(type_name: &str) -> Vec<&str> {
    type_name
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Insertion-ordered edge set with (source, target, type) uniqueness.
struct EdgeSet {
    seen: HashSet<(String, String, RelationshipType)>,
    edges: Vec<Relationship>,
}

impl EdgeSet {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            edges: Vec::new(),
        }
    }

    fn add(&mut self, source: &str, target: &str, relationship_type: RelationshipType, description: String) {
        let key = (source.to_string(), target.to_string(), relationship_type);
        if self.seen.insert(key) {
            self.edges.push(Relationship {
                source: source.to_string(),
                target: target.to_string(),
                relationship_type,
                description,
            });
        }
    }

    fn into_vec(self) -> Vec<Relationship> {
        self.edges
    }
}
