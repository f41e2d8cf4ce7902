//! Activation event kinds raised by the rendered palette.
//!
//! The gesture library and DOM layer translate raw input into these
//! variants; the panel dispatches each kind to its handler. This is the
//! whole event surface — there is no string-keyed callback table.

/// Where a completed drag ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    /// Dropped onto the building surface. Drags out of the palette clone
    /// the control, so the palette keeps its original.
    Stage { instance_id: String },
    /// Intra-group reorder inside the palette, carrying the gesture
    /// library's observed instance-id order. The palette is not an accepted
    /// drop target from elsewhere, so the group can only have been
    /// permuted, never extended.
    Palette { group_id: String, order: Vec<String> },
}

/// One activation event on a palette control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// Click on a control's activation button.
    Click { instance_id: String },
    /// A drag out of a control began.
    DragStart { instance_id: String },
    /// A drag completed.
    DragEnd { target: DropTarget },
}
