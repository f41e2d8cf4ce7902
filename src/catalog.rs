//! Built-in field template catalog and user-configuration merge.
//!
//! The catalog is the single source read by the composition engine: the
//! built-in templates and groups merged with one builder instance's
//! [`PanelConfig`] (extra elements/groups, disable lists, order overrides).
//!
//! # Usage
//!
//! ```rust,ignore
//! use formforge::catalog::Catalog;
//! use formforge::model::PanelConfig;
//!
//! let catalog = Catalog::build(PanelConfig::default())?;
//! assert!(catalog.elements.iter().any(|t| t.meta.id == "checkbox"));
//! ```

use anyhow::{Result, bail};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::warn;

use crate::model::{
    AttrValue, DisableConfig, FieldTemplate, Group, OptionChoice, OptionConfig, PanelConfig,
    TemplateConfig, TemplateMeta,
};
use crate::ordering::unique;

/// Group ids that are always defined.
pub const BUILT_IN_GROUP_IDS: [&str; 3] = ["common", "html", "layout"];

/// The group whose templates receive layout (row/column) treatment on
/// activation instead of becoming fields.
pub const LAYOUT_GROUP: &str = "layout";

/// Template id of the row-with-column layout variant.
pub const LAYOUT_COLUMN: &str = "layout-column";

// ────────────────────────────────────────────────────────────────────────────
// Catalog
// ────────────────────────────────────────────────────────────────────────────

/// The effective set of groups and templates for one builder instance.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Merged groups, built-in entries first unless overridden.
    pub groups: Vec<Group>,
    /// Element pool: built-in templates followed by user templates.
    pub elements: Vec<FieldTemplate>,
    /// Effective group order: user preference followed by the built-ins,
    /// first occurrence winning.
    pub group_order: Vec<String>,
    /// Per-group user element-order overrides.
    pub element_order: IndexMap<String, Vec<String>>,
    pub disable: DisableConfig,
    pub sortable: bool,
}

impl Catalog {
    /// Merge `config` over the built-in defaults.
    ///
    /// Fails if any template (built-in or user-supplied) lacks a `meta.id`
    /// or `meta.group`; silently dropping such an entry would corrupt the
    /// dedup and ordering invariants downstream. Undeclared group
    /// references and duplicate template ids are logged, not fatal.
    pub fn build(config: PanelConfig) -> Result<Self> {
        let group_order = unique(
            config
                .group_order
                .iter()
                .cloned()
                .chain(BUILT_IN_GROUP_IDS.iter().map(|s| s.to_string())),
        );

        let mut groups = built_in_groups();
        for user_group in config.groups {
            match groups.iter().position(|g| g.id == user_group.id) {
                Some(i) => groups[i] = user_group,
                None => groups.push(user_group),
            }
        }

        let mut elements: Vec<FieldTemplate> = built_in_elements().to_vec();
        elements.extend(config.elements);

        let mut seen_ids: Vec<&str> = Vec::with_capacity(elements.len());
        for element in &elements {
            if element.meta.id.is_empty() {
                bail!(
                    "catalog entry '{}' (<{}>) has no meta.id",
                    element.config.label,
                    element.tag
                );
            }
            if element.meta.group.is_empty() {
                bail!(
                    "catalog entry '{}' ({}) has no meta.group",
                    element.config.label,
                    element.meta.id
                );
            }
            if seen_ids.contains(&element.meta.id.as_str()) {
                warn!(
                    id = %element.meta.id,
                    "duplicate template id; only the first definition will be composed"
                );
            } else {
                seen_ids.push(&element.meta.id);
            }
            if !groups.iter().any(|g| g.id == element.meta.group) {
                warn!(
                    id = %element.meta.id,
                    group = %element.meta.group,
                    "template references an undeclared group and will not be composed"
                );
            }
        }

        Ok(Self {
            groups,
            elements,
            group_order,
            element_order: config.element_order,
            disable: config.disable,
            sortable: config.sortable,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in groups and templates
// ────────────────────────────────────────────────────────────────────────────

/// The three built-in groups with their preferred element orders.
pub fn built_in_groups() -> Vec<Group> {
    vec![
        Group::new("layout", "Layout", &["row", "column"]),
        Group::new("common", "Common Fields", &["button", "checkbox"]),
        Group::new("html", "HTML Elements", &["header", "block-text"]),
    ]
}

/// The built-in field templates, lazily initialized once per process.
pub fn built_in_elements() -> &'static [FieldTemplate] {
    static ELEMENTS: Lazy<Vec<FieldTemplate>> = Lazy::new(build_elements);
    &ELEMENTS
}

/// Helper to create a template skeleton concisely; callers fill in attrs,
/// options and content as needed.
fn field(tag: &str, group: &str, id: &str, icon: &str, label: &str) -> FieldTemplate {
    FieldTemplate {
        tag: tag.to_string(),
        attrs: IndexMap::new(),
        config: TemplateConfig {
            label: label.to_string(),
            ..TemplateConfig::default()
        },
        meta: TemplateMeta {
            group: group.to_string(),
            id: id.to_string(),
            icon: Some(icon.to_string()),
        },
        options: Vec::new(),
        content: None,
        f_map: None,
    }
}

fn choice(label: &str, value: &str, selected: bool) -> OptionChoice {
    OptionChoice {
        label: label.to_string(),
        value: value.to_string(),
        selected,
    }
}

/// Generate `count` numbered sub-choices, e.g. "Option 1" / `option-1`.
fn numbered_options(label: &str, value_prefix: &str, count: usize) -> Vec<OptionConfig> {
    (1..=count)
        .map(|i| OptionConfig {
            label: format!("{label} {i}"),
            value: Some(format!("{value_prefix}-{i}")),
            selected: false,
            choices: IndexMap::new(),
        })
        .collect()
}

fn build_elements() -> Vec<FieldTemplate> {
    let mut c = Vec::with_capacity(15);

    // ── Layout ──────────────────────────────────────────────────────────
    c.push(field("div", "layout", "layout-column", "columns", "Column"));
    c.push(field("div", "layout", "layout-row", "rows", "Row"));

    // ── Common fields ───────────────────────────────────────────────────
    let mut text_input = field("input", "common", "text-input", "text-input", "Text Input");
    text_input.attrs.insert("type".into(), AttrValue::text("text"));
    text_input.attrs.insert("required".into(), AttrValue::Bool(false));
    text_input.attrs.insert("className".into(), AttrValue::text(""));
    text_input.config.disabled_attrs = vec!["type".into()];
    text_input.f_map = Some("attrs.value".into());
    c.push(text_input);

    let mut date_input = field("input", "common", "date-input", "calendar", "Date");
    date_input.attrs.insert("type".into(), AttrValue::text("date"));
    date_input.attrs.insert("required".into(), AttrValue::Bool(false));
    date_input.attrs.insert("className".into(), AttrValue::text(""));
    date_input.config.disabled_attrs = vec!["type".into()];
    c.push(date_input);

    let mut button = field("button", "common", "button", "button", "Button");
    button.attrs.insert(
        "className".into(),
        AttrValue::Choices(vec![
            choice("Grouped", "f-btn-group", false),
            choice("Ungrouped", "f-field-group", false),
        ]),
    );
    button.config.hide_label = true;
    button.config.disabled_attrs = vec!["type".into()];
    button.options = vec![OptionConfig {
        label: "Button".to_string(),
        value: None,
        selected: false,
        choices: IndexMap::from([
            (
                "type".to_string(),
                vec![
                    choice("Button", "button", true),
                    choice("Reset", "reset", false),
                    choice("Submit", "submit", false),
                ],
            ),
            (
                "className".to_string(),
                vec![
                    choice("Default", "", true),
                    choice("Primary", "primary", false),
                    choice("Danger", "error", false),
                    choice("Success", "success", false),
                    choice("Warning", "warning", false),
                ],
            ),
        ]),
    }];
    c.push(button);

    let mut select = field("select", "common", "select", "select", "Select");
    select.attrs.insert("required".into(), AttrValue::Bool(false));
    select.attrs.insert("className".into(), AttrValue::text(""));
    select.options = numbered_options("Option", "option", 3);
    c.push(select);

    let mut textarea = field("textarea", "common", "textarea", "textarea", "Textarea");
    textarea.attrs.insert("required".into(), AttrValue::Bool(false));
    c.push(textarea);

    let mut checkbox = field("input", "common", "checkbox", "checkbox", "Checkbox/Group");
    checkbox.attrs.insert("type".into(), AttrValue::text("checkbox"));
    checkbox.attrs.insert("required".into(), AttrValue::Bool(false));
    checkbox.config.disabled_attrs = vec!["type".into()];
    checkbox.options = numbered_options("Checkbox", "checkbox", 1);
    c.push(checkbox);

    let mut radio = field("input", "common", "radio", "radio-group", "Radio Group");
    radio.attrs.insert("type".into(), AttrValue::text("radio"));
    radio.attrs.insert("required".into(), AttrValue::Bool(false));
    radio.config.disabled_attrs = vec!["type".into()];
    radio.options = numbered_options("Radio", "radio", 3);
    c.push(radio);

    // ── HTML elements ───────────────────────────────────────────────────
    let mut header = field("h1", "html", "header", "header", "Header");
    header.attrs.insert(
        "tag".into(),
        AttrValue::Choices(vec![
            choice("H1", "h1", false),
            choice("H2", "h2", false),
            choice("H3", "h3", false),
            choice("H4", "h4", false),
        ]),
    );
    header.attrs.insert("className".into(), AttrValue::text(""));
    header.config.editable = true;
    header.config.hide_label = true;
    header.content = Some("Header".to_string());
    c.push(header);

    let mut paragraph = field("p", "html", "paragraph", "paragraph", "Paragraph");
    paragraph.attrs.insert("className".into(), AttrValue::text(""));
    paragraph.config.hide_label = true;
    paragraph.config.editable = true;
    paragraph.content = Some(
        "Leverage agile frameworks to provide a robust synopsis for high level \
         overviews. Iterative approaches to corporate strategy foster collaborative \
         thinking to further the overall value proposition."
            .to_string(),
    );
    c.push(paragraph);

    let mut divider = field("hr", "html", "divider", "divider", "Divider");
    divider.config.hide_label = true;
    c.push(divider);

    // ── Remaining common fields ─────────────────────────────────────────
    let mut upload = field("input", "common", "upload", "upload", "File Upload");
    upload.attrs.insert("type".into(), AttrValue::text("file"));
    upload.attrs.insert("required".into(), AttrValue::Bool(false));
    upload.config.disabled_attrs = vec!["type".into()];
    upload.f_map = Some("attrs.value".into());
    c.push(upload);

    let mut number = field("input", "common", "number", "hash", "Number");
    number.attrs.insert("type".into(), AttrValue::text("number"));
    number.attrs.insert("required".into(), AttrValue::Bool(false));
    number.attrs.insert("className".into(), AttrValue::text(""));
    number.config.disabled_attrs = vec!["type".into()];
    number.f_map = Some("attrs.value".into());
    c.push(number);

    let mut hidden = field("input", "common", "hidden", "hidden", "Hidden");
    hidden.attrs.insert("type".into(), AttrValue::text("hidden"));
    hidden.attrs.insert("value".into(), AttrValue::text(""));
    hidden.config.hide_label = true;
    hidden.f_map = Some("attrs.value".into());
    c.push(hidden);

    c
}
