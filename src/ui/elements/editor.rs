// src/ui/elements/editor.rs
use std::collections::HashSet;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::table::events::{
    AddRowRequest, CancelDeletionRequest, ConfirmDeletionRequest, RequestDeleteRows,
    RequestRemoteLoad, RequestSaveTable, RequestUploadDialog, UpdateCellEvent,
};
use crate::table::resources::{ActiveTable, LoadSource, RemoteAddress, StartupStatus};
use crate::ui::UiFeedbackState;

use super::{load_panel, popups, save_panel, summary, table_grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadModeChoice {
    #[default]
    Remote,
    Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveModeChoice {
    #[default]
    Remote,
    Local,
}

#[derive(Resource, Debug, Default)]
pub struct EditorWindowState {
    pub load_mode: LoadModeChoice,
    pub save_mode: SaveModeChoice,
    pub local_save_path: String,
    pub show_summary: bool,
    pub selected_rows: HashSet<usize>,
}

#[allow(clippy::too_many_arguments)]
pub fn editor_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<EditorWindowState>,
    mut active: ResMut<ActiveTable>,
    status: Res<StartupStatus>,
    address: Option<Res<RemoteAddress>>,
    ui_feedback: Res<UiFeedbackState>,
    mut remote_load_writer: EventWriter<RequestRemoteLoad>,
    mut upload_writer: EventWriter<RequestUploadDialog>,
    mut cell_update_writer: EventWriter<UpdateCellEvent>,
    mut add_row_writer: EventWriter<AddRowRequest>,
    mut delete_rows_writer: EventWriter<RequestDeleteRows>,
    mut confirm_writer: EventWriter<ConfirmDeletionRequest>,
    mut cancel_writer: EventWriter<CancelDeletionRequest>,
    mut save_writer: EventWriter<RequestSaveTable>,
) {
    let ctx = contexts.ctx_mut();

    // Configuration errors halt the workflow before any table operation.
    if let Some(error) = &status.config_error {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Parquet Client Data Editor");
            ui.colored_label(egui::Color32::RED, format!("Configuration error: {}", error));
            ui.label("Set the credential store entries and restart.");
        });
        return;
    }

    popups::show_deletion_gate_popup(ctx, &mut active, &mut confirm_writer, &mut cancel_writer);

    egui::SidePanel::left("load_panel").show(ctx, |ui| {
        load_panel::show_load_panel(
            ui,
            &mut state,
            address.as_deref(),
            &mut remote_load_writer,
            &mut upload_writer,
        );
    });

    let source_line = match &active.source {
        Some(LoadSource::Remote { bucket, key }) => Some(format!("Editing s3://{}/{}", bucket, key)),
        Some(LoadSource::Upload { filename }) => Some(format!("Editing uploaded file '{}'", filename)),
        None => None,
    };

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Parquet Client Data Editor");
        if !ui_feedback.last_message.is_empty() {
            let color = if ui_feedback.is_error {
                egui::Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.colored_label(color, &ui_feedback.last_message);
        }
        ui.separator();

        let Some(session) = active.session.as_ref() else {
            // Load halted or nothing loaded yet: no grid, no save controls.
            ui.label("No table loaded yet. Pick a source on the left.");
            return;
        };

        if let Some(line) = &source_line {
            ui.label(line);
        }
        ui.strong("Edit Table");
        table_grid::show_table_grid(
            ui,
            session.working(),
            &mut state,
            &mut cell_update_writer,
            &mut add_row_writer,
            &mut delete_rows_writer,
        );

        ui.separator();
        save_panel::show_save_panel(ui, &mut state, address.as_deref(), &mut save_writer);

        ui.separator();
        summary::show_summary_section(ui, &mut state, session.working());
    });
}
