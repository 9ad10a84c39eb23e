//! Classification configuration.
//!
//! The role table, role-to-layer mapping and UI name heuristics live here
//! as process-wide immutable configuration rather than literals scattered
//! through the classifier. The default instance is cached in a `OnceLock`;
//! tests construct their own instances to exercise alternative tables.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::core::{Layer, Role};

/// How a role rule matches a component's supertype or annotations.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Supertype name ends with the pattern.
    SupertypeSuffix,
    /// Any annotation equals the pattern (case-insensitive, no `@`).
    Annotation,
    /// Any implemented interface name ends with the pattern.
    InterfaceSuffix,
    /// Component name ends with the pattern.
    NameSuffix,
}

/// One entry in the ordered role table. Rules are checked top to bottom;
/// the first match wins, which keeps classification deterministic.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoleRule {
    pub kind: MatchKind,
    pub pattern: String,
    pub role: Role,
}

impl RoleRule {
    fn new(kind: MatchKind, pattern: &str, role: Role) -> Self {
        Self {
            kind,
            pattern: pattern.to_string(),
            role,
        }
    }
}

/// Which heuristic the UI-component filter applies.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UiFilterMode {
    /// Components whose classified layer is UI.
    LayerOnly,
    /// Components matching the UI name heuristic, regardless of layer.
    NameOnly,
    /// Either of the above. The two paths can disagree on purpose; the
    /// union preserves both outcomes for filtering.
    #[default]
    Union,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClassificationConfig {
    /// Ordered role rules, first match wins.
    #[serde(default = "default_role_rules")]
    pub role_rules: Vec<RoleRule>,

    /// Name suffixes that mark a component as UI in the name fallback.
    #[serde(default = "default_ui_name_suffixes")]
    pub ui_name_suffixes: Vec<String>,

    /// Name substrings that mark a component as UI in the name fallback.
    #[serde(default = "default_ui_name_substrings")]
    pub ui_name_substrings: Vec<String>,

    /// Supertype suffixes treated as UI base types in the name fallback.
    #[serde(default = "default_ui_base_type_suffixes")]
    pub ui_base_type_suffixes: Vec<String>,

    /// Markers that classify a screen as error handling in flow analysis.
    #[serde(default = "default_error_screen_markers")]
    pub error_screen_markers: Vec<String>,

    #[serde(default)]
    pub ui_filter_mode: UiFilterMode,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            role_rules: default_role_rules(),
            ui_name_suffixes: default_ui_name_suffixes(),
            ui_name_substrings: default_ui_name_substrings(),
            ui_base_type_suffixes: default_ui_base_type_suffixes(),
            error_screen_markers: default_error_screen_markers(),
            ui_filter_mode: UiFilterMode::default(),
        }
    }
}

impl ClassificationConfig {
    /// Layer derived from a classified role. Unknown roles land in Other.
    pub fn layer_for_role(&self, role: Role) -> Layer {
        match role {
            Role::Activity
            | Role::Fragment
            | Role::Composable
            | Role::Adapter
            | Role::ViewHolder
            | Role::CustomView => Layer::Ui,
            Role::Service
            | Role::Receiver
            | Role::ViewModel
            | Role::Presenter
            | Role::UseCase
            | Role::Worker => Layer::BusinessLogic,
            Role::Repository | Role::Dao | Role::Entity | Role::Dto | Role::ApiClient => {
                Layer::Data
            }
            Role::Unknown => Layer::Other,
        }
    }
}

fn default_role_rules() -> Vec<RoleRule> {
    use MatchKind::*;
    vec![
        // Framework base types first; these are the strongest signal.
        RoleRule::new(SupertypeSuffix, "Activity", Role::Activity),
        RoleRule::new(SupertypeSuffix, "Fragment", Role::Fragment),
        RoleRule::new(SupertypeSuffix, "Service", Role::Service),
        RoleRule::new(SupertypeSuffix, "BroadcastReceiver", Role::Receiver),
        RoleRule::new(SupertypeSuffix, "ViewModel", Role::ViewModel),
        RoleRule::new(SupertypeSuffix, "RecyclerView.Adapter", Role::Adapter),
        RoleRule::new(SupertypeSuffix, "ListAdapter", Role::Adapter),
        RoleRule::new(SupertypeSuffix, "ViewHolder", Role::ViewHolder),
        RoleRule::new(SupertypeSuffix, "View", Role::CustomView),
        RoleRule::new(SupertypeSuffix, "Worker", Role::Worker),
        // Annotations next.
        RoleRule::new(Annotation, "Composable", Role::Composable),
        RoleRule::new(Annotation, "Dao", Role::Dao),
        RoleRule::new(Annotation, "Entity", Role::Entity),
        RoleRule::new(Annotation, "Serializable", Role::Dto),
        // Interface and naming conventions last.
        RoleRule::new(InterfaceSuffix, "Repository", Role::Repository),
        RoleRule::new(NameSuffix, "Repository", Role::Repository),
        RoleRule::new(NameSuffix, "RepositoryImpl", Role::Repository),
        RoleRule::new(NameSuffix, "UseCase", Role::UseCase),
        RoleRule::new(NameSuffix, "Interactor", Role::UseCase),
        RoleRule::new(NameSuffix, "Presenter", Role::Presenter),
        RoleRule::new(NameSuffix, "ViewModel", Role::ViewModel),
        RoleRule::new(NameSuffix, "Dao", Role::Dao),
        RoleRule::new(NameSuffix, "Dto", Role::Dto),
        RoleRule::new(NameSuffix, "ApiService", Role::ApiClient),
        RoleRule::new(NameSuffix, "ApiClient", Role::ApiClient),
    ]
}

fn default_ui_name_suffixes() -> Vec<String> {
    ["activity", "fragment", "adapter", "viewholder"]
        .map(String::from)
        .to_vec()
}

fn default_ui_name_substrings() -> Vec<String> {
    ["screen", "page", "dialog"].map(String::from).to_vec()
}

fn default_ui_base_type_suffixes() -> Vec<String> {
    ["Activity", "Fragment", "View", "Dialog", "ViewGroup"]
        .map(String::from)
        .to_vec()
}

fn default_error_screen_markers() -> Vec<String> {
    ["error", "crash", "failure", "exception"]
        .map(String::from)
        .to_vec()
}

static CONFIG: OnceLock<ClassificationConfig> = OnceLock::new();

/// Process-wide default classification tables.
pub fn default_config() -> &'static ClassificationConfig {
    CONFIG.get_or_init(ClassificationConfig::default)
}
