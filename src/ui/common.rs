// src/ui/common.rs
use bevy_egui::egui;

/// Frameless single-line editor for one grid cell. Returns the new text when
/// the user changed it this frame; the caller turns that into an
/// `UpdateCellEvent`.
pub fn edit_cell_widget(ui: &mut egui::Ui, id: egui::Id, current_text: &str) -> Option<String> {
    let mut buffer = current_text.to_owned();
    let response = ui.add(
        egui::TextEdit::singleline(&mut buffer)
            .id(id)
            .frame(false)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        Some(buffer)
    } else {
        None
    }
}
