// src/table/events.rs
use bevy::prelude::Event;
use std::collections::HashSet;
use std::path::PathBuf;

/// Sent when the user clicks "Load from S3" in the sidebar.
/// Handled by `systems::load::handle_remote_load_request`.
#[derive(Event, Debug, Clone)]
pub struct RequestRemoteLoad;

/// Sent when the user clicks "Choose file…" in upload mode. Opens the
/// blocking file dialog; a picked file becomes a `RequestProcessUpload`.
#[derive(Event, Debug, Clone)]
pub struct RequestUploadDialog;

#[derive(Event, Debug, Clone)]
pub struct RequestProcessUpload {
    pub path: PathBuf,
}

/// One committed change to a single grid cell. `None` is null.
#[derive(Event, Debug, Clone)]
pub struct UpdateCellEvent {
    pub row: usize,
    pub col: usize,
    pub value: Option<String>,
}

/// Sent when the user clicks the "Add Row" button under the grid.
#[derive(Event, Debug, Clone)]
pub struct AddRowRequest;

/// Asks the session to remove the selected rows, pending confirmation.
#[derive(Event, Debug, Clone)]
pub struct RequestDeleteRows {
    pub row_indices: HashSet<usize>,
}

/// Resolves the armed confirmation gate against the typed code.
#[derive(Event, Debug, Clone)]
pub struct ConfirmDeletionRequest;

/// Drops the armed confirmation gate without applying the deletion.
#[derive(Event, Debug, Clone)]
pub struct CancelDeletionRequest;

#[derive(Debug, Clone)]
pub enum SaveDestination {
    Remote,
    Local { path: String },
}

#[derive(Event, Debug, Clone)]
pub struct RequestSaveTable {
    pub destination: SaveDestination,
}

/// User-visible outcome of any load/edit/save operation. Mirrored into
/// `UiFeedbackState` for display; nothing is logged elsewhere or retried.
#[derive(Event, Debug, Clone)]
pub struct TableOperationFeedback {
    pub message: String,
    pub is_error: bool,
}
