//! Group composition engine: one full pass of ordering, filtering and dedup
//! producing the palette's renderable content.
//!
//! The pass reads the merged [`Catalog`], registers every emitted control in
//! the [`Registry`], and returns one [`ComposedGroup`] per enabled group.
//! It is deterministic and is re-run in full whenever the catalog or
//! configuration changes.

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::ordering::{is_disabled, order_by_keys, unique};
use crate::registry::Registry;

// ────────────────────────────────────────────────────────────────────────────
// Composed view-models
// ────────────────────────────────────────────────────────────────────────────

/// One rendered, interactive control inside the palette: a template wrapped
/// with a freshly minted instance id and its display affordances.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlElement {
    /// Unique per rendered control, distinct from the template id.
    pub instance_id: String,
    pub template_id: String,
    pub group_id: String,
    /// Activation affordance label.
    pub label: String,
    pub icon: Option<String>,
    /// Style tags: `field-control`, group-scoped and template-scoped.
    pub class_list: Vec<String>,
}

/// A renderable control-group container with its ordered controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedGroup {
    /// Scoped container element id: `<panel>-<group>-control-group`.
    pub element_id: String,
    pub group_id: String,
    pub label: String,
    pub controls: Vec<ControlElement>,
}

// ────────────────────────────────────────────────────────────────────────────
// Composition pass
// ────────────────────────────────────────────────────────────────────────────

/// Run one composition pass.
///
/// Groups are ordered by the catalog's effective group order, then disabled
/// groups are dropped. Each remaining group reorders the shared element pool
/// by its effective element order (user override prepended to the declared
/// order) and emits the pool entries that are enabled, owned by the group,
/// and not yet consumed by an earlier group. First group match wins: a given
/// template id appears in at most one composed group per pass.
pub fn compose(catalog: &Catalog, panel_id: &str, registry: &mut Registry) -> Vec<ComposedGroup> {
    let mut groups = order_by_keys(&catalog.groups, &catalog.group_order, |g| g.id.as_str());
    groups.retain(|g| !is_disabled(&g.id, &catalog.disable.groups));

    // One shared pool across groups: each group's ordering pass re-permutes
    // the whole pool before filtering, so an earlier group's explicit order
    // carries into a later group's "no preference" relative order.
    let mut pool = catalog.elements.clone();
    let mut used_ids: Vec<String> = Vec::new();
    let mut composed = Vec::with_capacity(groups.len());

    for group in &groups {
        let element_order = match catalog.element_order.get(&group.id) {
            Some(user_order) => unique(
                user_order
                    .iter()
                    .cloned()
                    .chain(group.element_order.iter().cloned()),
            ),
            None => group.element_order.clone(),
        };
        pool = order_by_keys(&pool, &element_order, |t| t.meta.id.as_str());

        let mut controls = Vec::new();
        for template in &pool {
            let keep = !is_disabled(&template.meta.id, &catalog.disable.elements)
                && template.meta.group == group.id
                && !used_ids.contains(&template.meta.id);
            if !keep {
                continue;
            }
            used_ids.push(template.meta.id.clone());

            let instance_id = mint_instance_id(panel_id, &template.meta.id);
            registry.register(&instance_id, template);
            controls.push(ControlElement {
                instance_id,
                template_id: template.meta.id.clone(),
                group_id: group.id.clone(),
                label: template.config.label.clone(),
                icon: template.meta.icon.clone(),
                class_list: vec![
                    "field-control".to_string(),
                    format!("{}-control", group.id),
                    format!("{}-control", template.meta.id),
                ],
            });
        }

        composed.push(ComposedGroup {
            element_id: format!("{panel_id}-{}-control-group", group.id),
            group_id: group.id.clone(),
            label: group.label.clone(),
            controls,
        });
    }

    debug!(
        groups = composed.len(),
        controls = used_ids.len(),
        "composed control panel"
    );
    composed
}

/// Mint a control-instance id. A template is emitted at most once per pass,
/// so the panel and template ids identify the control; hashing them into a
/// v5 UUID keeps composition deterministic and lets persisted palette order
/// reference the same instances on the next initial render.
fn mint_instance_id(panel_id: &str, template_id: &str) -> String {
    Uuid::new_v5(
        &Uuid::NAMESPACE_OID,
        format!("{panel_id}/{template_id}").as_bytes(),
    )
    .to_string()
}
