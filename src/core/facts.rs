//! Raw per-file facts supplied by the parsing collaborator.
//!
//! These records mirror the component schema pre-classification. Every
//! field except `name` is optional or defaulted so a partially parsed
//! source file still yields a usable bundle.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{FlowCondition, NavigationType, Visibility};

/// One raw fact bundle for a single declared type.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct FactBundle {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub file_path: PathBuf,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub supertype: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub fields: Vec<RawField>,
    #[serde(default)]
    pub methods: Vec<RawMethod>,
    /// Names referenced through dependency-injection markers
    /// (constructor-injected, `@Inject`-annotated, etc.).
    #[serde(default)]
    pub injected_dependencies: Vec<String>,
    #[serde(default)]
    pub layout_references: Vec<String>,
    #[serde(default)]
    pub navigation: Vec<RawNavigation>,
    /// Layer already tagged upstream; used verbatim when present.
    #[serde(default)]
    pub layer_hint: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct RawField {
    pub name: String,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub initial_value: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct RawMethod {
    pub name: String,
    #[serde(default)]
    pub return_type: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub control_flow: Option<ControlFlowFacts>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct RawParameter {
    pub name: String,
    #[serde(default)]
    pub type_name: String,
}

/// Control-flow shape of a method body, as measured by the parser.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct ControlFlowFacts {
    /// Maximum loop nesting depth observed in the body.
    #[serde(default)]
    pub loop_depth: u32,
    /// The method calls itself, directly or through a local helper.
    #[serde(default)]
    pub has_recursion: bool,
    /// More than one recursive call per activation (tree recursion).
    #[serde(default)]
    pub branching_recursion: bool,
    /// The body grows an auxiliary structure proportional to input size.
    #[serde(default)]
    pub allocates_per_input: bool,
}

/// A navigation call observed in a method body.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct RawNavigation {
    pub target: String,
    #[serde(default)]
    pub navigation_type: NavigationType,
    #[serde(default)]
    pub conditions: Vec<FlowCondition>,
}
