use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Attribute values
// ────────────────────────────────────────────────────────────────────────────

/// One choice in an enumerable attribute or option list
/// (e.g. a button `className` variant, a header level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChoice {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub selected: bool,
}

/// A default attribute value on a template. Scalar attributes hold a text or
/// boolean value; enumerable attributes hold the list of selectable choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Text(String),
    Choices(Vec<OptionChoice>),
}

impl AttrValue {
    /// Convenience constructor for plain text attributes.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FieldTemplate
// ────────────────────────────────────────────────────────────────────────────

/// Editor-facing configuration of a template: display label and editability
/// flags consumed by the field-edit panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    pub label: String,
    #[serde(default)]
    pub hide_label: bool,
    #[serde(default)]
    pub editable: bool,
    /// Attributes the edit panel must not offer for modification
    /// (e.g. the `type` of an `<input type="checkbox">`).
    #[serde(default)]
    pub disabled_attrs: Vec<String>,
}

/// Identity and palette metadata of a template.
///
/// `id` is the template identity, unique across the whole catalog; `group`
/// names the owning [`Group`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateMeta {
    pub group: String,
    pub id: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// One selectable sub-choice of a template: select options, checkbox/radio
/// items, or button variants. Button variants carry per-attribute choice
/// lists instead of a single value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionConfig {
    pub label: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub selected: bool,
    #[serde(flatten)]
    pub choices: IndexMap<String, Vec<OptionChoice>>,
}

/// An immutable-by-convention definition of one draggable field type.
///
/// `attrs` preserves declaration order so the edit panel and any generated
/// markup list attributes the way the template author wrote them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTemplate {
    /// Rendered element kind (`input`, `select`, `h1`, …).
    pub tag: String,
    #[serde(default)]
    pub attrs: IndexMap<String, AttrValue>,
    pub config: TemplateConfig,
    pub meta: TemplateMeta,
    #[serde(default)]
    pub options: Vec<OptionConfig>,
    /// Static content for non-field elements (headers, paragraphs).
    #[serde(default)]
    pub content: Option<String>,
    /// Field-data-path mapping: where a rendered field stores its value
    /// (e.g. `attrs.value`).
    #[serde(default)]
    pub f_map: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Group
// ────────────────────────────────────────────────────────────────────────────

/// A named bucket of templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub label: String,
    /// Preferred intra-group order of template ids. Templates not listed
    /// keep their catalog declaration order after the listed ones.
    #[serde(default)]
    pub element_order: Vec<String>,
}

impl Group {
    pub fn new(id: impl Into<String>, label: impl Into<String>, element_order: &[&str]) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            element_order: element_order.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Panel configuration
// ────────────────────────────────────────────────────────────────────────────

/// Disabled groups and elements. Entries are matched case-insensitively as
/// substrings, so `"html"` disables the `html` group and `"input"` disables
/// every `*-input` template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisableConfig {
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub elements: Vec<String>,
}

/// User-supplied panel configuration, merged over the built-in defaults by
/// [`Catalog::build`](crate::catalog::Catalog::build). All fields optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelConfig {
    /// Preferred group order; the built-in groups are appended.
    #[serde(default)]
    pub group_order: Vec<String>,
    /// Per-group overrides prepended to the group's declared element order.
    #[serde(default)]
    pub element_order: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub disable: DisableConfig,
    /// Extra templates appended after the built-in definitions.
    #[serde(default)]
    pub elements: Vec<FieldTemplate>,
    /// Extra groups; an entry sharing a built-in id overrides that group.
    #[serde(default)]
    pub groups: Vec<Group>,
    /// When false, palette reordering is disabled and any persisted order
    /// is cleared at startup.
    #[serde(default = "default_sortable")]
    pub sortable: bool,
}

fn default_sortable() -> bool {
    true
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            group_order: Vec::new(),
            element_order: IndexMap::new(),
            disable: DisableConfig::default(),
            elements: Vec::new(),
            groups: Vec::new(),
            sortable: true,
        }
    }
}
