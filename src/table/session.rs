// src/table/session.rs
use std::collections::HashSet;

use super::definitions::TableData;

/// Literal code the operator must type before a row deletion is committed.
pub const DELETION_CONFIRM_CODE: &str = "125";

/// One editing pass over a loaded table.
///
/// Cell edits and row additions apply to the working copy immediately. A row
/// deletion arms the confirmation gate instead: the reduced table is held as
/// pending until the operator confirms it with the right code. A wrong code
/// reverts the working copy to the as-loaded original, which also discards
/// any cell edits made since load.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: TableData,
    working: TableData,
    gate: Option<DeletionGate>,
}

/// Transient state of one deletion attempt.
#[derive(Debug, Clone)]
pub struct DeletionGate {
    pending: TableData,
    pub code_input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Approved { deleted: usize },
    Reverted,
}

impl EditSession {
    pub fn new(table: TableData) -> Self {
        EditSession {
            original: table.clone(),
            working: table,
            gate: None,
        }
    }

    pub fn original(&self) -> &TableData {
        &self.original
    }

    pub fn working(&self) -> &TableData {
        &self.working
    }

    pub fn working_mut(&mut self) -> &mut TableData {
        &mut self.working
    }

    pub fn gate(&self) -> Option<&DeletionGate> {
        self.gate.as_ref()
    }

    pub fn gate_mut(&mut self) -> Option<&mut DeletionGate> {
        self.gate.as_mut()
    }

    /// Rows the armed gate would remove, if any.
    pub fn pending_removed(&self) -> Option<usize> {
        self.gate
            .as_ref()
            .map(|gate| self.working.row_count().saturating_sub(gate.pending.row_count()))
    }

    /// Submits the table produced by this editing pass. An equal or grown
    /// row count is accepted as-is; a shrunk table arms the gate instead.
    /// Returns true when the gate was armed.
    pub fn submit(&mut self, edited: TableData) -> bool {
        if edited.row_count() >= self.working.row_count() {
            self.working = edited;
            false
        } else {
            self.gate = Some(DeletionGate {
                pending: edited,
                code_input: String::new(),
            });
            true
        }
    }

    /// Removes the given rows from the working table, pending confirmation.
    pub fn delete_rows(&mut self, rows: &HashSet<usize>) -> bool {
        if rows.is_empty() {
            return false;
        }
        let pending = self.working.without_rows(rows);
        self.submit(pending)
    }

    /// Resolves the armed gate against the code typed so far. Returns None
    /// when no gate is armed. Either outcome drops the gate; a later
    /// deletion starts a fresh attempt.
    pub fn confirm_deletion(&mut self) -> Option<GateOutcome> {
        let gate = self.gate.take()?;
        if gate.code_input == DELETION_CONFIRM_CODE {
            let deleted = self.working.row_count().saturating_sub(gate.pending.row_count());
            self.working = gate.pending;
            Some(GateOutcome::Approved { deleted })
        } else {
            self.working = self.original.clone();
            Some(GateOutcome::Reverted)
        }
    }

    /// Drops the armed gate without touching the working table.
    pub fn cancel_deletion(&mut self) {
        self.gate = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::definitions::{ColumnDataType, ColumnSpec};

    fn three_row_table() -> TableData {
        TableData {
            columns: vec![
                ColumnSpec {
                    header: "name".to_string(),
                    data_type: ColumnDataType::String,
                },
                ColumnSpec {
                    header: "count".to_string(),
                    data_type: ColumnDataType::I64,
                },
            ],
            grid: vec![
                vec![Some("alpha".to_string()), Some("1".to_string())],
                vec![Some("beta".to_string()), Some("2".to_string())],
                vec![Some("gamma".to_string()), Some("3".to_string())],
            ],
        }
    }

    #[test]
    fn cell_edits_pass_through_without_a_gate() {
        let mut session = EditSession::new(three_row_table());
        let mut edited = session.working().clone();
        edited.set_cell(0, 0, Some("delta".to_string()));
        assert!(!session.submit(edited));
        assert!(session.gate().is_none());
        assert_eq!(session.working().cell(0, 0), Some("delta"));
        assert_eq!(session.working().row_count(), 3);
    }

    #[test]
    fn row_additions_pass_through_without_a_gate() {
        let mut session = EditSession::new(three_row_table());
        let mut edited = session.working().clone();
        edited.push_empty_row();
        assert!(!session.submit(edited));
        assert!(session.gate().is_none());
        assert_eq!(session.working().row_count(), 4);
    }

    #[test]
    fn shrunk_table_arms_the_gate_and_defers_the_deletion() {
        let mut session = EditSession::new(three_row_table());
        let rows: HashSet<usize> = [1].into_iter().collect();
        assert!(session.delete_rows(&rows));
        assert_eq!(session.pending_removed(), Some(1));
        // Working table untouched until confirmation.
        assert_eq!(session.working().row_count(), 3);
    }

    #[test]
    fn correct_code_commits_the_reduced_table() {
        let mut session = EditSession::new(three_row_table());
        let rows: HashSet<usize> = [1].into_iter().collect();
        session.delete_rows(&rows);
        if let Some(gate) = session.gate_mut() {
            gate.code_input = DELETION_CONFIRM_CODE.to_string();
        }
        assert_eq!(
            session.confirm_deletion(),
            Some(GateOutcome::Approved { deleted: 1 })
        );
        assert!(session.gate().is_none());
        assert_eq!(session.working().row_count(), 2);
        assert_eq!(session.working().cell(0, 0), Some("alpha"));
        assert_eq!(session.working().cell(1, 0), Some("gamma"));
    }

    #[test]
    fn wrong_code_reverts_to_the_original_including_cell_edits() {
        let mut session = EditSession::new(three_row_table());
        // A cell edit in the same pass as the deletion...
        session.working_mut().set_cell(0, 1, Some("99".to_string()));
        let rows: HashSet<usize> = [2].into_iter().collect();
        session.delete_rows(&rows);
        if let Some(gate) = session.gate_mut() {
            gate.code_input = "999".to_string();
        }
        assert_eq!(session.confirm_deletion(), Some(GateOutcome::Reverted));
        // ...is discarded too: the outcome is the as-loaded table.
        assert_eq!(session.working(), &three_row_table());
        assert!(session.gate().is_none());
    }

    #[test]
    fn cancel_drops_the_gate_and_keeps_the_working_table() {
        let mut session = EditSession::new(three_row_table());
        session.working_mut().set_cell(1, 0, Some("edited".to_string()));
        let rows: HashSet<usize> = [0].into_iter().collect();
        session.delete_rows(&rows);
        session.cancel_deletion();
        assert!(session.gate().is_none());
        assert_eq!(session.working().row_count(), 3);
        assert_eq!(session.working().cell(1, 0), Some("edited"));
    }

    #[test]
    fn confirm_without_a_gate_is_a_no_op() {
        let mut session = EditSession::new(three_row_table());
        assert_eq!(session.confirm_deletion(), None);
    }

    #[test]
    fn each_deletion_attempt_starts_with_an_empty_code() {
        let mut session = EditSession::new(three_row_table());
        let rows: HashSet<usize> = [0].into_iter().collect();
        session.delete_rows(&rows);
        if let Some(gate) = session.gate_mut() {
            gate.code_input = "999".to_string();
        }
        session.confirm_deletion();

        session.delete_rows(&rows);
        assert_eq!(session.gate().map(|g| g.code_input.as_str()), Some(""));
    }

    #[test]
    fn deleting_only_out_of_range_rows_does_not_arm_the_gate() {
        let mut session = EditSession::new(three_row_table());
        let rows: HashSet<usize> = [42].into_iter().collect();
        assert!(!session.delete_rows(&rows));
        assert!(session.gate().is_none());
    }
}
