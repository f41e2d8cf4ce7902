//! The stage collaborator interface: the building surface that owns rows,
//! columns and fields once a control is activated.
//!
//! [`Stage`] is the sole write boundary out of the control panel. The crate
//! ships [`RecordingStage`], which implements the interface by recording
//! every structural call, so activation flows can be simulated and asserted
//! without a real canvas.

use serde::Serialize;

/// External building surface. All methods are synchronous; implementations
/// own row/column/field lifecycle and overall form-state persistence.
pub trait Stage {
    /// Create a new row, returning its id.
    fn add_row(&mut self) -> String;
    /// Create a new column inside `row_id`, returning its id.
    fn add_column(&mut self, row_id: &str) -> String;
    /// Create a field bound to the control instance inside `column_id`,
    /// returning the field id.
    fn add_field(&mut self, column_id: &str, instance_id: &str) -> String;
    /// Persist the column ordering of `row_id`.
    fn save_column_order(&mut self, row_id: &str);
    /// Recompute the column width distribution of `row_id`.
    fn distribute_column_widths(&mut self, row_id: &str);
    /// Save the overall form state.
    fn save(&mut self);
    /// Remove all rows.
    fn clear(&mut self);
    /// Number of rows currently on the stage.
    fn row_count(&self) -> usize;
}

/// Outbound response to a clear-all request.
#[derive(Debug, Clone, PartialEq)]
pub enum ClearRequest {
    /// Existing form data: a cancelable confirmation round-trip. Run
    /// [`ControlPanel::confirm_clear`](super::ControlPanel::confirm_clear)
    /// on confirmation.
    Confirm {
        message: String,
        /// UI anchor coordinates of the triggering action.
        coords: (i32, i32),
        row_count: usize,
    },
    /// No form data: a direct notice, no confirmation round-trip.
    Notice { message: String },
}

// ────────────────────────────────────────────────────────────────────────────
// RecordingStage
// ────────────────────────────────────────────────────────────────────────────

/// One call into the stage, in invocation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StageCall {
    AddRow { row_id: String },
    AddColumn { row_id: String, column_id: String },
    AddField { column_id: String, field_id: String, instance_id: String },
    SaveColumnOrder { row_id: String },
    DistributeColumnWidths { row_id: String },
    Save,
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct RowRecord {
    id: String,
    columns: Vec<ColumnRecord>,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ColumnRecord {
    id: String,
    fields: Vec<String>,
}

/// A stage that records structure and calls instead of rendering.
#[derive(Debug, Clone, Default)]
pub struct RecordingStage {
    rows: Vec<RowRecord>,
    next_id: usize,
    calls: Vec<StageCall>,
    saves: usize,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> &[StageCall] {
        &self.calls
    }

    /// Number of `save` invocations.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Column ids of a row.
    pub fn columns_of(&self, row_id: &str) -> Vec<String> {
        self.rows
            .iter()
            .find(|r| r.id == row_id)
            .map(|r| r.columns.iter().map(|c| c.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Instance ids of the fields inside a column.
    pub fn fields_of(&self, column_id: &str) -> Vec<String> {
        self.rows
            .iter()
            .flat_map(|r| &r.columns)
            .find(|c| c.id == column_id)
            .map(|c| c.fields.clone())
            .unwrap_or_default()
    }
}

impl Stage for RecordingStage {
    fn add_row(&mut self) -> String {
        let row_id = self.mint("row");
        self.rows.push(RowRecord {
            id: row_id.clone(),
            columns: Vec::new(),
        });
        self.calls.push(StageCall::AddRow {
            row_id: row_id.clone(),
        });
        row_id
    }

    fn add_column(&mut self, row_id: &str) -> String {
        let column_id = self.mint("column");
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == row_id) {
            row.columns.push(ColumnRecord {
                id: column_id.clone(),
                fields: Vec::new(),
            });
        }
        self.calls.push(StageCall::AddColumn {
            row_id: row_id.to_string(),
            column_id: column_id.clone(),
        });
        column_id
    }

    fn add_field(&mut self, column_id: &str, instance_id: &str) -> String {
        let field_id = self.mint("field");
        if let Some(column) = self
            .rows
            .iter_mut()
            .flat_map(|r| &mut r.columns)
            .find(|c| c.id == column_id)
        {
            column.fields.push(instance_id.to_string());
        }
        self.calls.push(StageCall::AddField {
            column_id: column_id.to_string(),
            field_id: field_id.clone(),
            instance_id: instance_id.to_string(),
        });
        field_id
    }

    fn save_column_order(&mut self, row_id: &str) {
        self.calls.push(StageCall::SaveColumnOrder {
            row_id: row_id.to_string(),
        });
    }

    fn distribute_column_widths(&mut self, row_id: &str) {
        self.calls.push(StageCall::DistributeColumnWidths {
            row_id: row_id.to_string(),
        });
    }

    fn save(&mut self) {
        self.saves += 1;
        self.calls.push(StageCall::Save);
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.calls.push(StageCall::Clear);
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_stage_tracks_structure() {
        let mut stage = RecordingStage::new();
        let row = stage.add_row();
        let column = stage.add_column(&row);
        stage.add_field(&column, "inst-1");

        assert_eq!(stage.row_count(), 1);
        assert_eq!(stage.columns_of(&row), vec![column.clone()]);
        assert_eq!(stage.fields_of(&column), vec!["inst-1".to_string()]);
    }

    #[test]
    fn test_recording_stage_clear() {
        let mut stage = RecordingStage::new();
        stage.add_row();
        stage.clear();
        assert_eq!(stage.row_count(), 0);
        assert_eq!(stage.calls().last(), Some(&StageCall::Clear));
    }
}
