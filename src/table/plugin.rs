// src/table/plugin.rs
use bevy::prelude::*;

use crate::storage::TableReadCache;

use super::events::{
    AddRowRequest, CancelDeletionRequest, ConfirmDeletionRequest, RequestDeleteRows,
    RequestProcessUpload, RequestRemoteLoad, RequestSaveTable, RequestUploadDialog,
    TableOperationFeedback, UpdateCellEvent,
};
use super::resources::{ActiveTable, StartupStatus};
use super::systems;

// System sets for ordering within a frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
enum TableSystemSet {
    UserInput,      // Systems reacting directly to UI events
    ApplyChanges,   // Systems mutating the session / resources
    FileOperations, // Systems performing storage IO
}

/// Plugin wiring the Load -> Edit -> Save workflow.
pub struct TablePlugin;

impl Plugin for TablePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                TableSystemSet::UserInput,
                TableSystemSet::ApplyChanges.after(TableSystemSet::UserInput),
                TableSystemSet::FileOperations.after(TableSystemSet::ApplyChanges),
            ),
        );

        app.init_resource::<ActiveTable>()
            .init_resource::<TableReadCache>()
            .init_resource::<StartupStatus>();

        app.add_event::<RequestRemoteLoad>()
            .add_event::<RequestUploadDialog>()
            .add_event::<RequestProcessUpload>()
            .add_event::<UpdateCellEvent>()
            .add_event::<AddRowRequest>()
            .add_event::<RequestDeleteRows>()
            .add_event::<ConfirmDeletionRequest>()
            .add_event::<CancelDeletionRequest>()
            .add_event::<RequestSaveTable>()
            .add_event::<TableOperationFeedback>();

        app.add_systems(Startup, systems::startup::initialize_storage);

        app.add_systems(
            Update,
            (systems::load::handle_upload_dialog_request,).in_set(TableSystemSet::UserInput),
        );
        app.add_systems(
            Update,
            (
                systems::load::handle_remote_load_request,
                systems::load::handle_process_upload,
                systems::edit::handle_cell_update,
                systems::edit::handle_add_row_request,
                systems::edit::handle_delete_rows_request,
                systems::edit::handle_confirm_deletion,
                systems::edit::handle_cancel_deletion,
            )
                .chain()
                .in_set(TableSystemSet::ApplyChanges),
        );
        app.add_systems(
            Update,
            (systems::save::handle_save_request,).in_set(TableSystemSet::FileOperations),
        );

        info!("TablePlugin initialized.");
    }
}
