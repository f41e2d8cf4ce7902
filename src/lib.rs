//! Field palette & control-group composition engine for a drag-and-drop
//! form builder.
//!
//! This crate provides the control-panel subsystem: a catalog of field-type
//! templates partitioned into ordered groups, a registry mapping on-screen
//! control instances back to their templates, and the interactive palette
//! state (filtering, drag reordering, durable per-group order).
//!
//! The binary `formforge` demonstrates usage and prints the composed panel
//! as JSON.

pub mod catalog;
pub mod compose;
pub mod model;
pub mod ordering;
pub mod panel;
pub mod registry;
