// src/ui/elements/save_panel.rs
use bevy::prelude::*;
use bevy_egui::egui;

use crate::table::events::{RequestSaveTable, SaveDestination};
use crate::table::resources::RemoteAddress;
use crate::table::systems::save::default_local_save_path;

use super::editor::{EditorWindowState, SaveModeChoice};

/// The "Save Changes" block under the grid. Remote and local destinations
/// are mutually exclusive per save action.
pub fn show_save_panel(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    address: Option<&RemoteAddress>,
    save_writer: &mut EventWriter<RequestSaveTable>,
) {
    ui.strong("Save Changes");
    ui.horizontal(|ui| {
        ui.label("Save to:");
        ui.radio_value(&mut state.save_mode, SaveModeChoice::Remote, "S3");
        ui.radio_value(&mut state.save_mode, SaveModeChoice::Local, "Local");
    });

    match state.save_mode {
        SaveModeChoice::Remote => match address {
            Some(address) => {
                ui.label(format!("Destination: {}", address.uri()));
                if ui.button("Save to S3").clicked() {
                    save_writer.write(RequestSaveTable {
                        destination: SaveDestination::Remote,
                    });
                }
            }
            None => {
                ui.colored_label(
                    egui::Color32::RED,
                    "Storage is not configured; only local save is available.",
                );
            }
        },
        SaveModeChoice::Local => {
            if state.local_save_path.is_empty() {
                state.local_save_path =
                    default_local_save_path(address.map(|a| a.key.as_str()));
            }
            ui.horizontal(|ui| {
                ui.label("Local save path:");
                ui.text_edit_singleline(&mut state.local_save_path);
            });
            if ui.button("Save locally").clicked() {
                save_writer.write(RequestSaveTable {
                    destination: SaveDestination::Local {
                        path: state.local_save_path.clone(),
                    },
                });
            }
        }
    }
}
