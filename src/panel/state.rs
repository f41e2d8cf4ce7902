//! Control panel state management.
//!
//! [`ControlPanel`] owns the composed palette for one builder instance: the
//! merged catalog, the field registry, the composed groups, and the
//! per-group ordered list of control-instance ids. That id list is the
//! single source of truth for palette order — DOM and gesture-library state
//! are projections of it, refreshed on every reorder event.

use std::collections::BTreeSet;

use anyhow::Result;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::catalog::{Catalog, LAYOUT_COLUMN, LAYOUT_GROUP};
use crate::compose::{ComposedGroup, ControlElement, compose};
use crate::model::PanelConfig;
use crate::ordering::order_by_keys;
use crate::registry::Registry;

use super::events::{ControlEvent, DropTarget};
use super::stage::{ClearRequest, Stage};
use super::storage::OrderStore;

/// Storage key prefix for persisted per-group order records. The full key
/// is the prefix followed by the group container's element id, which scopes
/// the record to one builder instance and one group.
pub const ORDER_KEY_PREFIX: &str = "formforge-controls-";

/// Shared gesture-library group name for all palette control groups.
pub const DRAG_GROUP: &str = "controls";

// ────────────────────────────────────────────────────────────────────────────
// Surface state machine
// ────────────────────────────────────────────────────────────────────────────

/// What the palette is currently doing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    /// Palette displayed, not filtering, not dragging.
    #[default]
    Idle,
    /// A non-empty search term is active.
    Filtering,
    /// A control is being dragged.
    Dragging { instance_id: String },
}

/// Configuration handed to the gesture library for every palette group:
/// one shared drag group, clone-on-pull (the palette keeps its original),
/// no drops accepted from elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct DragProfile {
    pub group: String,
    pub clone_on_pull: bool,
    pub accept_drops: bool,
    pub sort: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// ControlPanel
// ────────────────────────────────────────────────────────────────────────────

/// The interactive control surface for one builder instance. Generic over
/// [`Stage`] so activation flows can be driven against a real canvas or a
/// recording simulation.
pub struct ControlPanel<S: Stage> {
    panel_id: String,
    catalog: Catalog,
    registry: Registry,
    groups: Vec<ComposedGroup>,
    /// Per-group ordered instance ids; the single source of truth.
    order: IndexMap<String, Vec<String>>,
    /// Controls with live activation bindings. Dragging detaches a
    /// control's listeners; its group is re-wired on drag completion.
    wired: BTreeSet<String>,
    state: PanelState,
    filter_term: String,
    hidden: BTreeSet<String>,
    indicator: Option<String>,
    store: Box<dyn OrderStore>,
    stage: S,
}

impl<S: Stage> ControlPanel<S> {
    /// Build the panel: merge `config` over the built-in catalog, run one
    /// composition pass, and seed each group's order from the injected
    /// store.
    pub fn new(
        config: PanelConfig,
        panel_id: &str,
        store: Box<dyn OrderStore>,
        stage: S,
    ) -> Result<Self> {
        let catalog = Catalog::build(config)?;
        let mut panel = Self {
            panel_id: panel_id.to_string(),
            catalog,
            registry: Registry::new(),
            groups: Vec::new(),
            order: IndexMap::new(),
            wired: BTreeSet::new(),
            state: PanelState::Idle,
            filter_term: String::new(),
            hidden: BTreeSet::new(),
            indicator: None,
            store,
            stage,
        };
        panel.rebuild();
        Ok(panel)
    }

    /// Re-run the composition pass in full and re-seed palette order.
    /// Required whenever the catalog or configuration changes; observable
    /// output is deterministic for a given catalog and stored order.
    pub fn rebuild(&mut self) {
        self.registry.reset();
        self.groups = compose(&self.catalog, &self.panel_id, &mut self.registry);

        self.order.clear();
        self.wired.clear();
        for group in &self.groups {
            let natural: Vec<String> = group
                .controls
                .iter()
                .map(|c| c.instance_id.clone())
                .collect();
            let key = format!("{ORDER_KEY_PREFIX}{}", group.element_id);

            let seeded = if !self.catalog.sortable {
                // persistence disabled: proactively clear any stored order
                self.store.remove(&key);
                natural
            } else if let Some(value) = self.store.get(&key) {
                let stored: Vec<String> = value.split('|').map(str::to_string).collect();
                order_by_keys(&natural, &stored, |id| id.as_str())
            } else {
                natural
            };

            self.wired.extend(seeded.iter().cloned());
            self.order.insert(group.group_id.clone(), seeded);
        }

        self.apply_filter();
    }

    // ── Projections ─────────────────────────────────────────────────────

    pub fn panel_id(&self) -> &str {
        &self.panel_id
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// Composed groups in display order, controls in composition order.
    pub fn groups(&self) -> &[ComposedGroup] {
        &self.groups
    }

    /// Current instance-id order of one group.
    pub fn group_order(&self, group_id: &str) -> Option<&[String]> {
        self.order.get(group_id).map(Vec::as_slice)
    }

    /// The group's controls projected through its current order.
    pub fn ordered_controls(&self, group_id: &str) -> Vec<&ControlElement> {
        let Some(order) = self.order.get(group_id) else {
            return Vec::new();
        };
        let Some(group) = self.groups.iter().find(|g| g.group_id == group_id) else {
            return Vec::new();
        };
        order
            .iter()
            .filter_map(|id| group.controls.iter().find(|c| &c.instance_id == id))
            .collect()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn sortable(&self) -> bool {
        self.catalog.sortable
    }

    pub fn drag_profile(&self) -> DragProfile {
        DragProfile {
            group: DRAG_GROUP.to_string(),
            clone_on_pull: true,
            accept_drops: false,
            sort: self.catalog.sortable,
        }
    }

    /// Filter-status indicator text, present while a term is active.
    pub fn filter_indicator(&self) -> Option<&str> {
        self.indicator.as_deref()
    }

    pub fn is_visible(&self, instance_id: &str) -> bool {
        !self.hidden.contains(instance_id)
    }

    /// Whether a control's activation bindings are currently attached.
    pub fn is_wired(&self, instance_id: &str) -> bool {
        self.wired.contains(instance_id)
    }

    // ── Filtering ───────────────────────────────────────────────────────

    /// Toggle every control's visibility by case-insensitive substring
    /// match of `term` against its label. An empty term restores the
    /// pre-filter state and removes the indicator. Superseding terms
    /// simply re-run the toggle; the operation is idempotent.
    pub fn filter(&mut self, term: &str) {
        self.filter_term = term.to_string();
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.hidden.clear();
        if self.filter_term.is_empty() {
            self.indicator = None;
            if self.state == PanelState::Filtering {
                self.state = PanelState::Idle;
            }
            return;
        }

        let term = self.filter_term.to_lowercase();
        for group in &self.groups {
            for control in &group.controls {
                if !control.label.to_lowercase().contains(&term) {
                    self.hidden.insert(control.instance_id.clone());
                }
            }
        }
        self.indicator = Some(format!("Filtering '{}'", self.filter_term));
        if !matches!(self.state, PanelState::Dragging { .. }) {
            self.state = PanelState::Filtering;
        }
    }

    // ── Events & activation ─────────────────────────────────────────────

    /// Dispatch one activation event.
    pub fn handle_event(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Click { instance_id } => {
                if matches!(self.state, PanelState::Dragging { .. }) {
                    debug!(%instance_id, "click ignored while dragging");
                    return;
                }
                self.activate(&instance_id);
            }
            ControlEvent::DragStart { instance_id } => {
                // the gesture library detaches the dragged node's listeners
                self.wired.remove(&instance_id);
                self.state = PanelState::Dragging { instance_id };
            }
            ControlEvent::DragEnd { target } => {
                match target {
                    DropTarget::Stage { instance_id } => {
                        if let Some(group_id) = self.group_of(&instance_id) {
                            self.rewire_group(&group_id);
                        }
                        self.activate(&instance_id);
                    }
                    DropTarget::Palette { group_id, order } => {
                        self.complete_reorder(&group_id, &order);
                    }
                }
                self.state = if self.filter_term.is_empty() {
                    PanelState::Idle
                } else {
                    PanelState::Filtering
                };
            }
        }
    }

    /// Append the element behind `instance_id` to the stage.
    ///
    /// Unknown ids are recoverable: the activation is logged and aborted,
    /// nothing propagates past the event boundary. Returns whether the
    /// activation ran.
    pub fn activate(&mut self, instance_id: &str) -> bool {
        let Some(meta) = self.registry.lookup(instance_id).map(|t| t.meta.clone()) else {
            warn!(%instance_id, "activation for unknown control instance ignored");
            return false;
        };

        let row = self.stage.add_row();
        if meta.group != LAYOUT_GROUP {
            let column = self.stage.add_column(&row);
            self.stage.add_field(&column, instance_id);
        } else if meta.id == LAYOUT_COLUMN {
            self.stage.add_column(&row);
        }
        self.stage.save_column_order(&row);
        self.stage.distribute_column_widths(&row);
        self.stage.save();
        true
    }

    // ── Reordering & persistence ────────────────────────────────────────

    /// Reconcile a completed intra-group drag: ids present in `observed`
    /// come first in observed order, unmatched known ids keep their
    /// relative order, unknown observed ids are dropped. The result is
    /// persisted and the group's activation bindings are re-attached.
    pub fn complete_reorder(&mut self, group_id: &str, observed: &[String]) {
        if !self.catalog.sortable {
            debug!(%group_id, "reorder ignored; palette is not sortable");
            return;
        }
        let Some(element_id) = self
            .groups
            .iter()
            .find(|g| g.group_id == group_id)
            .map(|g| g.element_id.clone())
        else {
            warn!(%group_id, "reorder for unknown group ignored");
            return;
        };
        let Some(current) = self.order.get(group_id) else {
            return;
        };

        let reconciled = order_by_keys(current, observed, |id| id.as_str());
        self.store.set(
            &format!("{ORDER_KEY_PREFIX}{element_id}"),
            &reconciled.join("|"),
        );
        self.order.insert(group_id.to_string(), reconciled);
        self.rewire_group(group_id);
    }

    fn group_of(&self, instance_id: &str) -> Option<String> {
        self.groups
            .iter()
            .find(|g| g.controls.iter().any(|c| c.instance_id == instance_id))
            .map(|g| g.group_id.clone())
    }

    /// Re-attach activation bindings for every control in a group. Drag
    /// operations detach listeners from nodes they remove, so each control
    /// surviving a drag must be re-wired before it is interactive again.
    fn rewire_group(&mut self, group_id: &str) {
        let ids: Vec<String> = self
            .groups
            .iter()
            .filter(|g| g.group_id == group_id)
            .flat_map(|g| g.controls.iter().map(|c| c.instance_id.clone()))
            .collect();
        self.wired.extend(ids);
    }

    // ── Form actions ────────────────────────────────────────────────────

    /// Trigger a save of overall form state.
    pub fn save(&mut self) {
        self.stage.save();
    }

    /// The clear-all form action: a cancelable confirmation request when
    /// form data exists, a direct notice otherwise.
    pub fn request_clear(&self, coords: (i32, i32)) -> ClearRequest {
        let row_count = self.stage.row_count();
        if row_count > 0 {
            ClearRequest::Confirm {
                message: "Are you sure you want to remove all fields?".to_string(),
                coords,
                row_count,
            }
        } else {
            ClearRequest::Notice {
                message: "There are no fields to clear".to_string(),
            }
        }
    }

    /// The action run when a clear-all confirmation is accepted.
    pub fn confirm_clear(&mut self) {
        self.stage.clear();
        self.stage.save();
    }
}
