// src/table/systems/edit.rs
use bevy::prelude::*;

use crate::table::events::{
    AddRowRequest, CancelDeletionRequest, ConfirmDeletionRequest, RequestDeleteRows,
    TableOperationFeedback, UpdateCellEvent,
};
use crate::table::resources::ActiveTable;
use crate::table::session::GateOutcome;

pub fn handle_cell_update(
    mut events: EventReader<UpdateCellEvent>,
    mut active: ResMut<ActiveTable>,
) {
    for event in events.read() {
        let Some(session) = active.session.as_mut() else {
            warn!("Cell update received with no table loaded; ignoring.");
            continue;
        };
        if !session
            .working_mut()
            .set_cell(event.row, event.col, event.value.clone())
        {
            warn!(
                "Cell update out of bounds at row {}, col {}; ignoring.",
                event.row, event.col
            );
        }
    }
}

pub fn handle_add_row_request(
    mut events: EventReader<AddRowRequest>,
    mut active: ResMut<ActiveTable>,
) {
    for _ in events.read() {
        if let Some(session) = active.session.as_mut() {
            session.working_mut().push_empty_row();
        }
    }
}

pub fn handle_delete_rows_request(
    mut events: EventReader<RequestDeleteRows>,
    mut active: ResMut<ActiveTable>,
) {
    for event in events.read() {
        let Some(session) = active.session.as_mut() else {
            continue;
        };
        if session.delete_rows(&event.row_indices) {
            info!(
                "Deletion of {} row(s) pending confirmation.",
                session.pending_removed().unwrap_or(0)
            );
        }
    }
}

pub fn handle_confirm_deletion(
    mut events: EventReader<ConfirmDeletionRequest>,
    mut active: ResMut<ActiveTable>,
    mut feedback: EventWriter<TableOperationFeedback>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    let Some(session) = active.session.as_mut() else {
        return;
    };
    match session.confirm_deletion() {
        Some(GateOutcome::Approved { deleted }) => {
            feedback.write(TableOperationFeedback {
                message: format!("Deleted {} row(s)", deleted),
                is_error: false,
            });
        }
        Some(GateOutcome::Reverted) => {
            feedback.write(TableOperationFeedback {
                message: "Incorrect code. No rows were deleted.".to_string(),
                is_error: true,
            });
        }
        None => {}
    }
}

pub fn handle_cancel_deletion(
    mut events: EventReader<CancelDeletionRequest>,
    mut active: ResMut<ActiveTable>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    if let Some(session) = active.session.as_mut() {
        session.cancel_deletion();
    }
}
