use formforge::catalog::Catalog;
use formforge::compose::{ComposedGroup, compose};
use formforge::model::{
    DisableConfig, FieldTemplate, Group, PanelConfig, TemplateConfig, TemplateMeta,
};
use formforge::registry::Registry;

fn template(id: &str, group: &str, label: &str) -> FieldTemplate {
    FieldTemplate {
        tag: "input".to_string(),
        config: TemplateConfig {
            label: label.to_string(),
            ..TemplateConfig::default()
        },
        meta: TemplateMeta {
            group: group.to_string(),
            id: id.to_string(),
            icon: None,
        },
        ..FieldTemplate::default()
    }
}

fn compose_with(config: PanelConfig) -> (Vec<ComposedGroup>, Registry) {
    let catalog = Catalog::build(config).unwrap();
    let mut registry = Registry::new();
    let composed = compose(&catalog, "fb-1", &mut registry);
    (composed, registry)
}

#[test]
fn no_template_id_appears_in_more_than_one_group() {
    // a user element reusing a built-in id from a different group exercises
    // the overlap dedup: the first group match must win
    let mut duplicate = template("checkbox", "custom", "Other Checkbox");
    duplicate.tag = "div".to_string();
    let config = PanelConfig {
        groups: vec![Group::new("custom", "Custom", &[])],
        elements: vec![duplicate],
        ..PanelConfig::default()
    };
    let (composed, _) = compose_with(config);

    let mut seen = Vec::new();
    for group in &composed {
        for control in &group.controls {
            assert!(
                !seen.contains(&control.template_id),
                "template {} emitted twice",
                control.template_id
            );
            seen.push(control.template_id.clone());
        }
    }
    // the duplicate landed in `common` (processed first), not `custom`
    let custom = composed.iter().find(|g| g.group_id == "custom").unwrap();
    assert!(custom.controls.is_empty());
}

#[test]
fn element_order_override_wins_over_declaration_order() {
    let config = PanelConfig {
        element_order: [("common".to_string(), vec!["button".to_string()])]
            .into_iter()
            .collect(),
        ..PanelConfig::default()
    };
    let (composed, _) = compose_with(config);
    let common = composed.iter().find(|g| g.group_id == "common").unwrap();
    let ids: Vec<&str> = common.controls.iter().map(|c| c.template_id.as_str()).collect();
    // user preference first, then the group's declared order
    assert_eq!(&ids[..2], &["button", "checkbox"]);
}

#[test]
fn element_order_override_repermutes_user_declared_elements() {
    let config = PanelConfig {
        groups: vec![Group::new("custom", "Custom", &[])],
        elements: vec![
            template("alpha", "custom", "Alpha"),
            template("beta", "custom", "Beta"),
        ],
        element_order: [("custom".to_string(), vec!["beta".to_string()])]
            .into_iter()
            .collect(),
        ..PanelConfig::default()
    };
    let (composed, _) = compose_with(config);
    let custom = composed.iter().find(|g| g.group_id == "custom").unwrap();
    let ids: Vec<&str> = custom.controls.iter().map(|c| c.template_id.as_str()).collect();
    assert_eq!(ids, vec!["beta", "alpha"]);
}

#[test]
fn disabling_a_group_removes_all_its_elements() {
    let config = PanelConfig {
        disable: DisableConfig {
            groups: vec!["html".to_string()],
            elements: Vec::new(),
        },
        ..PanelConfig::default()
    };
    let (composed, _) = compose_with(config);
    assert!(composed.iter().all(|g| g.group_id != "html"));
    for group in &composed {
        for control in &group.controls {
            assert_ne!(control.group_id, "html");
        }
    }
}

#[test]
fn disabling_an_element_leaves_siblings_intact() {
    let config = PanelConfig {
        disable: DisableConfig {
            groups: Vec::new(),
            elements: vec!["divider".to_string()],
        },
        ..PanelConfig::default()
    };
    let (composed, _) = compose_with(config);
    let html = composed.iter().find(|g| g.group_id == "html").unwrap();
    let ids: Vec<&str> = html.controls.iter().map(|c| c.template_id.as_str()).collect();
    assert!(!ids.contains(&"divider"));
    assert!(ids.contains(&"header"));
    assert!(ids.contains(&"paragraph"));
}

#[test]
fn user_groups_and_group_order_are_honored() {
    let config = PanelConfig {
        group_order: vec!["custom".to_string()],
        groups: vec![Group::new("custom", "Custom Widgets", &[])],
        elements: vec![template("stars", "custom", "Star Rating")],
        ..PanelConfig::default()
    };
    let (composed, _) = compose_with(config);
    assert_eq!(composed[0].group_id, "custom");
    assert_eq!(composed[0].label, "Custom Widgets");
    assert_eq!(composed[0].controls[0].template_id, "stars");
}

#[test]
fn undeclared_group_reference_produces_no_match() {
    let config = PanelConfig {
        elements: vec![template("orphan", "no-such-group", "Orphan")],
        ..PanelConfig::default()
    };
    let (composed, _) = compose_with(config);
    for group in &composed {
        assert!(group.controls.iter().all(|c| c.template_id != "orphan"));
    }
}

#[test]
fn registry_resolves_instance_and_template_id_to_the_same_template() {
    let (composed, registry) = compose_with(PanelConfig::default());
    for group in &composed {
        for control in &group.controls {
            let by_instance = registry.lookup(&control.instance_id).unwrap();
            let by_template = registry.lookup(&control.template_id).unwrap();
            assert!(std::ptr::eq(by_instance, by_template));
            assert_eq!(by_instance.meta.id, control.template_id);
        }
    }
}

#[test]
fn composition_is_deterministic_across_passes() {
    let (first, _) = compose_with(PanelConfig::default());
    let (second, _) = compose_with(PanelConfig::default());
    assert_eq!(first, second);
}

#[test]
fn instance_ids_are_scoped_to_the_panel() {
    let catalog = Catalog::build(PanelConfig::default()).unwrap();
    let mut registry = Registry::new();
    let a = compose(&catalog, "fb-1", &mut registry);
    let b = compose(&catalog, "fb-2", &mut registry);
    assert_ne!(a[0].controls[0].instance_id, b[0].controls[0].instance_id);
    assert_ne!(a[0].controls[0].instance_id, a[0].controls[0].template_id);
}
