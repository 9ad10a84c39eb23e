//! Layer and role classification.
//!
//! Classification is role-first: the ordered rule table in
//! [`ClassificationConfig`] is matched against supertype, annotations,
//! interfaces and name, then the layer is derived from the role. An
//! explicit layer hint from the parser overrides the derived layer but
//! not the role. Unrecognized components fall through to
//! `Role::Unknown` / `Layer::Other`; nothing here fails.

use crate::config::{ClassificationConfig, MatchKind, UiFilterMode};
use crate::core::{Component, Layer, Role};

/// Classify a component in place.
pub fn classify(component: &mut Component, config: &ClassificationConfig) {
    let role = classify_role(component, config);
    let layer = component
        .layer_hint
        .unwrap_or_else(|| config.layer_for_role(role));
    component.role = role;
    component.layer = layer;
}

/// First matching rule in the role table wins.
pub fn classify_role(component: &Component, config: &ClassificationConfig) -> Role {
    config
        .role_rules
        .iter()
        .find(|rule| rule_matches(rule.kind, &rule.pattern, component))
        .map(|rule| rule.role)
        .unwrap_or(Role::Unknown)
}

fn rule_matches(kind: MatchKind, pattern: &str, component: &Component) -> bool {
    match kind {
        MatchKind::SupertypeSuffix => component
            .supertype
            .as_deref()
            .is_some_and(|s| s.ends_with(pattern)),
        MatchKind::Annotation => component
            .annotations
            .iter()
            .any(|a| a.trim_start_matches('@').eq_ignore_ascii_case(pattern)),
        MatchKind::InterfaceSuffix => component.implements.iter().any(|i| i.ends_with(pattern)),
        MatchKind::NameSuffix => component.name.ends_with(pattern),
    }
}

/// Name-based UI detection, used by the UI filter independently of the
/// role table. The two heuristics can disagree; that mismatch is a
/// documented limitation of name-based filtering, not a bug.
pub fn is_ui_by_name(component: &Component, config: &ClassificationConfig) -> bool {
    let name = component.name.to_lowercase();
    let by_name = config
        .ui_name_suffixes
        .iter()
        .any(|suffix| name.ends_with(suffix.as_str()))
        || config
            .ui_name_substrings
            .iter()
            .any(|sub| name.contains(sub.as_str()));
    let by_base_type = component.supertype.as_deref().is_some_and(|supertype| {
        config
            .ui_base_type_suffixes
            .iter()
            .any(|suffix| supertype.ends_with(suffix.as_str()))
    });
    by_name || by_base_type
}

/// Predicate behind the aggregator's UI-component view.
pub fn is_ui_component(component: &Component, config: &ClassificationConfig) -> bool {
    match config.ui_filter_mode {
        UiFilterMode::LayerOnly => component.layer == Layer::Ui,
        UiFilterMode::NameOnly => is_ui_by_name(component, config),
        UiFilterMode::Union => component.layer == Layer::Ui || is_ui_by_name(component, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use std::path::PathBuf;

    fn component(name: &str) -> Component {
        Component::stub(
            name.to_string(),
            name.to_string(),
            PathBuf::from(format!("{name}.kt")),
        )
    }

    #[test]
    fn activity_supertype_classifies_as_ui_activity() {
        let mut c = component("LoginActivity");
        c.supertype = Some("android.app.Activity".to_string());
        classify(&mut c, config::default_config());
        assert_eq!(c.role, Role::Activity);
        assert_eq!(c.layer, Layer::Ui);
    }

    #[test]
    fn composable_annotation_beats_name_rules() {
        let mut c = component("ProfileViewModel");
        c.annotations = vec!["@Composable".to_string()];
        classify(&mut c, config::default_config());
        assert_eq!(c.role, Role::Composable);
        assert_eq!(c.layer, Layer::Ui);
    }

    #[test]
    fn repository_interface_classifies_as_data() {
        let mut c = component("OrderStore");
        c.implements = vec!["OrderRepository".to_string()];
        classify(&mut c, config::default_config());
        assert_eq!(c.role, Role::Repository);
        assert_eq!(c.layer, Layer::Data);
    }

    #[test]
    fn use_case_name_suffix_classifies_as_business_logic() {
        let mut c = component("PlaceOrderUseCase");
        classify(&mut c, config::default_config());
        assert_eq!(c.role, Role::UseCase);
        assert_eq!(c.layer, Layer::BusinessLogic);
    }

    #[test]
    fn unmatched_component_falls_through_to_other() {
        let mut c = component("StringUtils");
        classify(&mut c, config::default_config());
        assert_eq!(c.role, Role::Unknown);
        assert_eq!(c.layer, Layer::Other);
    }

    #[test]
    fn explicit_layer_hint_overrides_derived_layer() {
        let mut c = component("PaymentGateway");
        c.layer_hint = Some(Layer::Data);
        classify(&mut c, config::default_config());
        assert_eq!(c.layer, Layer::Data);
        assert_eq!(c.role, Role::Unknown);
    }

    #[test]
    fn name_heuristic_detects_screens_without_role_match() {
        let c = {
            let mut c = component("CheckoutScreenHost");
            c.layer = Layer::Other;
            c
        };
        assert!(is_ui_by_name(&c, config::default_config()));
        // Union mode lets the name heuristic override the Other layer.
        assert!(is_ui_component(&c, config::default_config()));
    }

    #[test]
    fn ui_base_type_supertype_triggers_name_fallback() {
        let mut c = component("TotalsBar");
        c.supertype = Some("android.widget.View".to_string());
        assert!(is_ui_by_name(&c, config::default_config()));
    }

    #[test]
    fn layer_only_mode_ignores_name_heuristic() {
        let mut cfg = ClassificationConfig::default();
        cfg.ui_filter_mode = UiFilterMode::LayerOnly;
        let c = component("SettingsScreenMapper");
        assert!(!is_ui_component(&c, &cfg));
    }
}
