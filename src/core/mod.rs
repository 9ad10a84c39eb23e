pub mod errors;
pub mod facts;

use im::Vector;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Coarse architectural bucket a component belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Layer {
    Ui,
    BusinessLogic,
    Data,
    Other,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Layer::Ui => "UI",
            Layer::BusinessLogic => "Business Logic",
            Layer::Data => "Data",
            Layer::Other => "Other",
        };
        write!(f, "{s}")
    }
}

/// Semantic category within a layer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    Activity,
    Fragment,
    Composable,
    Adapter,
    ViewHolder,
    CustomView,
    Service,
    Receiver,
    ViewModel,
    Presenter,
    UseCase,
    Repository,
    Dao,
    Entity,
    Dto,
    ApiClient,
    Worker,
    Unknown,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Activity => "Activity",
            Role::Fragment => "Fragment",
            Role::Composable => "Composable",
            Role::Adapter => "Adapter",
            Role::ViewHolder => "ViewHolder",
            Role::CustomView => "CustomView",
            Role::Service => "Service",
            Role::Receiver => "Receiver",
            Role::ViewModel => "ViewModel",
            Role::Presenter => "Presenter",
            Role::UseCase => "UseCase",
            Role::Repository => "Repository",
            Role::Dao => "DAO",
            Role::Entity => "Entity",
            Role::Dto => "DTO",
            Role::ApiClient => "ApiClient",
            Role::Worker => "Worker",
            Role::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// Kind of declaration a component was built from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ComponentKind {
    #[default]
    Class,
    Interface,
    Enum,
    Object,
    Annotation,
    Unknown,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Language {
    Kotlin,
    Java,
    Swift,
    Dart,
    Unknown,
}

impl Language {
    pub fn from_extension(ext: &str) -> Self {
        static EXTENSION_MAP: &[(&[&str], Language)] = &[
            (&["kt", "kts"], Language::Kotlin),
            (&["java"], Language::Java),
            (&["swift"], Language::Swift),
            (&["dart"], Language::Dart),
        ];

        EXTENSION_MAP
            .iter()
            .find(|(exts, _)| exts.contains(&ext))
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::Unknown)
    }

    pub fn from_path(path: &std::path::Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
}

/// A declared field on a component.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub name: String,
    pub type_name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub initial_value: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
}

/// A method with its optional complexity annotation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Method {
    pub name: String,
    pub return_type: String,
    pub visibility: Visibility,
    pub parameters: Vec<Parameter>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub complexity: Option<ComplexityInfo>,
}

/// One analyzable unit of source structure: a class, screen, service, etc.
///
/// All list fields are always-initialized (possibly empty) so downstream
/// stages never special-case absence. `dependencies` holds only identifiers
/// of components present in the same model; names that did not resolve stay
/// in `injected_dependencies`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Component {
    pub id: String,
    pub name: String,
    pub kind: ComponentKind,
    pub file_path: PathBuf,
    pub language: Language,
    pub layer: Layer,
    pub role: Role,
    pub package: String,
    /// Layer already tagged by the parser; used verbatim by classification.
    #[serde(default)]
    pub layer_hint: Option<Layer>,
    pub supertype: Option<String>,
    pub implements: Vec<String>,
    pub annotations: Vec<String>,
    pub modifiers: Vec<String>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub dependencies: Vec<String>,
    pub injected_dependencies: Vec<String>,
    pub layout_references: Vec<String>,
    pub navigation_targets: Vec<NavigationTarget>,
}

impl Component {
    /// Minimal component carrying only identity, used when a fact bundle
    /// is too malformed to normalize fully.
    pub fn stub(id: String, name: String, file_path: PathBuf) -> Self {
        Self {
            id,
            name,
            kind: ComponentKind::Unknown,
            file_path,
            language: Language::Unknown,
            layer: Layer::Other,
            role: Role::Unknown,
            package: String::new(),
            layer_hint: None,
            supertype: None,
            implements: Vec::new(),
            annotations: Vec::new(),
            modifiers: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            dependencies: Vec::new(),
            injected_dependencies: Vec::new(),
            layout_references: Vec::new(),
            navigation_targets: Vec::new(),
        }
    }
}

/// A navigation destination recorded on a component before flow derivation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NavigationTarget {
    pub target: String,
    #[serde(default)]
    pub navigation_type: NavigationType,
    #[serde(default)]
    pub conditions: Vec<FlowCondition>,
}

/// Typed directed edge between two components.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub relationship_type: RelationshipType,
    pub description: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    Extends,
    Implements,
    DependsOn,
    Uses,
    Composes,
    Aggregates,
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RelationshipType::Extends => "EXTENDS",
            RelationshipType::Implements => "IMPLEMENTS",
            RelationshipType::DependsOn => "DEPENDS_ON",
            RelationshipType::Uses => "USES",
            RelationshipType::Composes => "COMPOSES",
            RelationshipType::Aggregates => "AGGREGATES",
        };
        write!(f, "{s}")
    }
}

/// Directed navigation edge between two screens.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NavigationFlow {
    pub source: String,
    pub target: String,
    pub navigation_type: NavigationType,
    pub conditions: Vec<FlowCondition>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum NavigationType {
    #[default]
    Forward,
    Back,
    Up,
    Custom,
}

/// A gating condition on a navigation edge. Blocking conditions are
/// recorded here and evaluated by downstream reachability consumers,
/// not by this engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FlowCondition {
    pub condition_type: String,
    pub predicate: String,
    #[serde(default)]
    pub is_blocking: bool,
}

/// Flow-graph classification of a screen node.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum FlowType {
    EntryPoint,
    ExitPoint,
    DecisionPoint,
    ErrorHandling,
    MainFlow,
}

/// One outgoing path from a user-flow node.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FlowPath {
    pub flow: NavigationFlow,
    pub description: String,
}

/// Runtime metrics a profiling collaborator can attach to a screen.
/// The engine itself never measures these; it carries them on the
/// model so rendering can annotate flow nodes.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct PerformanceMetrics {
    pub render_time_ms: Option<f64>,
    pub interaction_latency_ms: Option<f64>,
    pub memory_kb: Option<u64>,
}

/// A screen-level node in the user-flow graph.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserFlowComponent {
    pub id: String,
    pub screen_name: String,
    pub flow_type: FlowType,
    pub outgoing_paths: Vec<FlowPath>,
    pub user_actions: Vec<String>,
    pub business_context: Option<String>,
    #[serde(default)]
    pub performance_metrics: Option<PerformanceMetrics>,
}

/// A navigation chain starting at an entry point, grouped as one
/// user-visible process.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BusinessProcess {
    pub name: String,
    pub entry_screen: String,
    pub screens: Vec<String>,
}

/// Ordered set of asymptotic complexity classes.
///
/// The derive order is the severity order, so `PartialOrd` comparisons
/// between classes are meaningful.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComplexityClass {
    Constant,
    Logarithmic,
    Linear,
    Linearithmic,
    Quadratic,
    Cubic,
    Exponential,
    Factorial,
}

impl ComplexityClass {
    /// Display label with the conventional Unicode superscripts.
    pub fn label(&self) -> &'static str {
        match self {
            ComplexityClass::Constant => "O(1)",
            ComplexityClass::Logarithmic => "O(log n)",
            ComplexityClass::Linear => "O(n)",
            ComplexityClass::Linearithmic => "O(n log n)",
            ComplexityClass::Quadratic => "O(n²)",
            ComplexityClass::Cubic => "O(n³)",
            ComplexityClass::Exponential => "O(2ⁿ)",
            ComplexityClass::Factorial => "O(n!)",
        }
    }

    /// Severity is a total function of the class, not a substring match
    /// on the label.
    pub fn severity(&self) -> Severity {
        match self {
            ComplexityClass::Constant | ComplexityClass::Logarithmic => Severity::Low,
            ComplexityClass::Linear | ComplexityClass::Linearithmic => Severity::Medium,
            ComplexityClass::Quadratic => Severity::High,
            ComplexityClass::Cubic | ComplexityClass::Exponential | ComplexityClass::Factorial => {
                Severity::Critical
            }
        }
    }
}

impl std::fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Numeric tier used by renderers for color-coding, 1 through 4.
    ///
    /// Note for consumers expecting a three-tier scale: quadratic
    /// methods land at 3 while cubic and worse land at 4, so the
    /// single "high" bucket of a three-tier scheme is split here.
    pub fn level(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        write!(f, "{s}")
    }
}

/// Complexity estimate attached to a method.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ComplexityInfo {
    pub time_complexity: ComplexityClass,
    pub space_complexity: ComplexityClass,
    pub loop_depth: u32,
    pub has_recursion: bool,
    pub rationale: String,
    pub contributors: Vec<String>,
    pub severity: Severity,
}

/// Per-layer and per-edge-type counts over a finished model.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct AnalysisSummary {
    pub total_components: usize,
    pub ui_components: usize,
    pub business_logic_components: usize,
    pub data_components: usize,
    pub other_components: usize,
    pub total_relationships: usize,
    pub total_navigation_flows: usize,
    pub high_severity_methods: usize,
}

/// The full project model produced by one analysis run.
///
/// Populated append-only by the pipeline and never mutated after the
/// aggregator returns it. The `im::Vector` fields make cloning a snapshot
/// cheap for consumers. A non-empty `error` means the model may be
/// partial, not that it is unusable.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ProjectAnalysisResult {
    pub components: Vector<Component>,
    pub relationships: Vector<Relationship>,
    pub navigation_flows: Vector<NavigationFlow>,
    pub user_flows: Vector<UserFlowComponent>,
    pub business_processes: Vector<BusinessProcess>,
    pub warnings: Vector<String>,
    pub summary: AnalysisSummary,
    pub error: Option<String>,
}

impl ProjectAnalysisResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a component up by identifier.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn is_partial(&self) -> bool {
        self.error.is_some()
    }
}
