//! Interactive control surface: the draggable palette of composed field
//! controls.
//!
//! This module renders nothing itself — it owns the palette's state and
//! exposes it as view-models and projections. It supports:
//!
//! - **Activation**: click-to-add and drag-to-stage, routed through the
//!   field registry into the external stage collaborator
//! - **Filtering**: live text-filtering of visible controls with a
//!   filter-status indicator
//! - **Reordering**: drag-and-drop reorder of controls per group, with the
//!   in-memory id order as the single source of truth
//! - **Persistence**: per-group order persisted to a durable key→string
//!   store and replayed on the next initial render
//! - **Re-wiring**: activation bindings re-attached to every control that
//!   survives a drag out of its group
//! - **Form actions**: save and clear-all (with confirmation round-trip)

pub mod events;
pub mod stage;
pub mod state;
pub mod storage;

pub use events::{ControlEvent, DropTarget};
pub use stage::{ClearRequest, RecordingStage, Stage, StageCall};
pub use state::{ControlPanel, DragProfile, PanelState};
pub use storage::{JsonFileStore, MemoryStore, OrderStore};
