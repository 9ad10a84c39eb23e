//! Normalization of raw parser facts into canonical components.
//!
//! Every optional flag defaults to false and every list field to empty,
//! so later stages never special-case absence. A malformed bundle is not
//! fatal: it becomes a stub component carrying only identity plus a
//! per-component warning.

use log::warn;
use std::path::Path;

use crate::core::facts::{FactBundle, RawField, RawMethod, RawParameter};
use crate::core::{
    Component, ComponentKind, Field, Language, Layer, Method, NavigationTarget, Parameter,
};

/// Outcome of normalizing one fact bundle.
pub struct BuiltComponent {
    pub component: Component,
    pub warning: Option<String>,
}

/// Build one canonical component from a raw fact bundle.
pub fn build_component(facts: &FactBundle) -> BuiltComponent {
    match identify(facts) {
        Ok((id, name)) => BuiltComponent {
            component: normalize(facts, id, name),
            warning: None,
        },
        Err(reason) => {
            let name = fallback_name(&facts.file_path);
            let warning = format!("incomplete facts for {}: {reason}", name);
            warn!("{warning}");
            BuiltComponent {
                component: Component::stub(name.clone(), name, facts.file_path.clone()),
                warning: Some(warning),
            }
        }
    }
}

/// Identifier is `package.Name` when a package exists, bare `Name`
/// otherwise. Missing names cannot be recovered locally.
fn identify(facts: &FactBundle) -> Result<(String, String), String> {
    let name = facts.name.trim();
    if name.is_empty() {
        return Err("missing component name".to_string());
    }
    let id = if facts.package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", facts.package, name)
    };
    Ok((id, name.to_string()))
}

fn fallback_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("<unnamed>")
        .to_string()
}

fn normalize(facts: &FactBundle, id: String, name: String) -> Component {
    Component {
        id,
        name,
        kind: parse_kind(facts.kind.as_deref()),
        file_path: facts.file_path.clone(),
        language: Language::from_path(&facts.file_path),
        layer: Layer::Other,
        role: crate::core::Role::Unknown,
        package: facts.package.clone(),
        layer_hint: facts.layer_hint.as_deref().and_then(parse_layer),
        supertype: facts
            .supertype
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
        implements: facts.implements.clone(),
        annotations: facts.annotations.clone(),
        modifiers: facts.modifiers.clone(),
        fields: facts.fields.iter().map(build_field).collect(),
        methods: facts.methods.iter().map(build_method).collect(),
        // Resolution against the component index happens in the
        // relationship stage; until then everything is symbolic.
        dependencies: Vec::new(),
        injected_dependencies: facts.injected_dependencies.clone(),
        layout_references: facts.layout_references.clone(),
        navigation_targets: facts
            .navigation
            .iter()
            .map(|nav| NavigationTarget {
                target: nav.target.clone(),
                navigation_type: nav.navigation_type,
                conditions: nav.conditions.clone(),
            })
            .collect(),
    }
}

fn parse_kind(kind: Option<&str>) -> ComponentKind {
    static KIND_MAP: &[(&str, ComponentKind)] = &[
        ("class", ComponentKind::Class),
        ("interface", ComponentKind::Interface),
        ("enum", ComponentKind::Enum),
        ("object", ComponentKind::Object),
        ("annotation", ComponentKind::Annotation),
    ];

    kind.map(|k| {
        KIND_MAP
            .iter()
            .find(|(tag, _)| k.eq_ignore_ascii_case(tag))
            .map(|(_, kind)| *kind)
            .unwrap_or(ComponentKind::Unknown)
    })
    .unwrap_or_default()
}

fn parse_layer(tag: &str) -> Option<Layer> {
    match tag.to_lowercase().as_str() {
        "ui" => Some(Layer::Ui),
        "business" | "business logic" | "domain" => Some(Layer::BusinessLogic),
        "data" => Some(Layer::Data),
        "other" => Some(Layer::Other),
        _ => None,
    }
}

fn build_field(raw: &RawField) -> Field {
    Field {
        name: raw.name.clone(),
        type_name: raw.type_name.clone(),
        visibility: raw.visibility,
        is_static: raw.is_static,
        is_final: raw.is_final,
        initial_value: raw.initial_value.clone(),
    }
}

fn build_method(raw: &RawMethod) -> Method {
    Method {
        name: raw.name.clone(),
        return_type: raw.return_type.clone(),
        visibility: raw.visibility,
        parameters: raw.parameters.iter().map(build_parameter).collect(),
        is_static: raw.is_static,
        is_abstract: raw.is_abstract,
        complexity: None,
    }
}

fn build_parameter(raw: &RawParameter) -> Parameter {
    Parameter {
        name: raw.name.clone(),
        type_name: raw.type_name.clone(),
    }
}
