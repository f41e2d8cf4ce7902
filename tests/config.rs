//! Wire-format coverage for panel configuration and composed output.

use formforge::catalog::{Catalog, built_in_elements};
use formforge::compose::compose;
use formforge::model::{AttrValue, FieldTemplate, PanelConfig};
use formforge::registry::Registry;

const USER_CONFIG: &str = r#"{
  "groupOrder": ["custom", "html"],
  "elementOrder": { "common": ["checkbox"] },
  "disable": { "elements": ["divider"] },
  "groups": [
    { "id": "custom", "label": "Custom Widgets", "elementOrder": ["stars"] }
  ],
  "elements": [
    {
      "tag": "input",
      "attrs": { "type": "number", "required": false, "className": "star-rating" },
      "config": { "label": "Star Rating", "disabledAttrs": ["type"] },
      "meta": { "group": "custom", "icon": "star", "id": "stars" },
      "fMap": "attrs.value"
    }
  ]
}"#;

#[test]
fn panel_config_parses_from_camel_case_json() {
    let config: PanelConfig = serde_json::from_str(USER_CONFIG).unwrap();

    assert_eq!(config.group_order, vec!["custom", "html"]);
    assert_eq!(config.element_order["common"], vec!["checkbox"]);
    assert_eq!(config.disable.elements, vec!["divider"]);
    assert!(config.sortable, "sortable defaults to true");

    let stars = &config.elements[0];
    assert_eq!(stars.meta.id, "stars");
    assert_eq!(stars.f_map.as_deref(), Some("attrs.value"));
    assert_eq!(stars.config.disabled_attrs, vec!["type"]);
    assert_eq!(stars.attrs["required"], AttrValue::Bool(false));
    assert_eq!(stars.attrs["className"], AttrValue::text("star-rating"));
}

#[test]
fn parsed_config_composes_end_to_end() {
    let config: PanelConfig = serde_json::from_str(USER_CONFIG).unwrap();
    let catalog = Catalog::build(config).unwrap();
    let mut registry = Registry::new();
    let composed = compose(&catalog, "fb-1", &mut registry);

    let order: Vec<&str> = composed.iter().map(|g| g.group_id.as_str()).collect();
    assert_eq!(order, vec!["custom", "html", "common", "layout"]);

    let custom = &composed[0];
    assert_eq!(custom.controls[0].template_id, "stars");
    assert_eq!(custom.controls[0].icon.as_deref(), Some("star"));

    let common = composed.iter().find(|g| g.group_id == "common").unwrap();
    let ids: Vec<&str> = common.controls.iter().map(|c| c.template_id.as_str()).collect();
    // user override prepends to the declared "button, checkbox" order
    assert_eq!(&ids[..2], &["checkbox", "button"]);

    let html = composed.iter().find(|g| g.group_id == "html").unwrap();
    assert!(html.controls.iter().all(|c| c.template_id != "divider"));
}

#[test]
fn built_in_templates_round_trip_through_json() {
    for template in built_in_elements() {
        let json = serde_json::to_string(template).unwrap();
        let back: FieldTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, template, "round trip of {}", template.meta.id);
    }
}

#[test]
fn composed_output_serializes_with_camel_case_keys() {
    let catalog = Catalog::build(PanelConfig::default()).unwrap();
    let mut registry = Registry::new();
    let composed = compose(&catalog, "fb-1", &mut registry);

    let json = serde_json::to_value(&composed).unwrap();
    let first = &json[0];
    assert!(first.get("elementId").is_some());
    assert!(first.get("groupId").is_some());
    let control = &first["controls"][0];
    assert!(control.get("instanceId").is_some());
    assert!(control.get("templateId").is_some());
    assert!(control.get("classList").is_some());
}
