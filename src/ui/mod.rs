// src/ui/mod.rs
use bevy::prelude::*;
use bevy_egui::EguiContextPass;

pub mod common;
pub mod elements;
pub mod systems;

use elements::editor::{editor_ui, EditorWindowState};
use systems::handle_ui_feedback;

/// Last operation outcome shown inline above the grid.
#[derive(Resource, Default, Debug, Clone)]
pub struct UiFeedbackState {
    pub last_message: String,
    pub is_error: bool,
}

/// Plugin for the editor window UI.
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiFeedbackState>()
            .init_resource::<EditorWindowState>()
            .add_systems(Update, handle_ui_feedback)
            .add_systems(EguiContextPass, editor_ui);

        info!("EditorUiPlugin initialized.");
    }
}
