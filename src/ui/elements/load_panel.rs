// src/ui/elements/load_panel.rs
use bevy::prelude::*;
use bevy_egui::egui;

use crate::table::events::{RequestRemoteLoad, RequestUploadDialog};
use crate::table::resources::RemoteAddress;

use super::editor::{EditorWindowState, LoadModeChoice};

/// Sidebar block choosing where the table comes from.
pub fn show_load_panel(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    address: Option<&RemoteAddress>,
    remote_load_writer: &mut EventWriter<RequestRemoteLoad>,
    upload_writer: &mut EventWriter<RequestUploadDialog>,
) {
    ui.heading("Load Data");
    ui.separator();

    ui.label("Choose load mode:");
    ui.radio_value(&mut state.load_mode, LoadModeChoice::Remote, "Use S3 file");
    ui.radio_value(&mut state.load_mode, LoadModeChoice::Upload, "Upload local file");
    ui.separator();

    match state.load_mode {
        LoadModeChoice::Remote => match address {
            Some(address) => {
                ui.label(format!("Source: {}", address.uri()));
                if ui.button("Load from S3").clicked() {
                    remote_load_writer.write(RequestRemoteLoad);
                }
            }
            None => {
                ui.colored_label(egui::Color32::RED, "Storage is not configured.");
            }
        },
        LoadModeChoice::Upload => {
            ui.label("Pick a Parquet file to edit.");
            if ui.button("Choose file…").clicked() {
                upload_writer.write(RequestUploadDialog);
            }
        }
    }
}
