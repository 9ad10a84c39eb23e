// Export modules for library usage
pub mod aggregator;
pub mod builder;
pub mod classify;
pub mod cli;
pub mod complexity;
pub mod config;
pub mod core;
pub mod flow;
pub mod io;
pub mod relationships;

// Re-export commonly used types
pub use crate::core::{
    AnalysisSummary, BusinessProcess, Component, ComponentKind, ComplexityClass, ComplexityInfo,
    Field, FlowCondition, FlowPath, FlowType, Language, Layer, Method, NavigationFlow,
    NavigationType, PerformanceMetrics, ProjectAnalysisResult, Relationship, RelationshipType,
    Role, Severity, UserFlowComponent, Visibility,
};

pub use crate::aggregator::{analyze_project, analyze_project_with_cancel, LayerViews};
pub use crate::complexity::estimate;
pub use crate::config::{ClassificationConfig, UiFilterMode};
pub use crate::core::errors::{Error, Result};
pub use crate::core::facts::{ControlFlowFacts, FactBundle, RawMethod, RawNavigation};
