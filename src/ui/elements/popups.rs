// src/ui/elements/popups.rs
use bevy::prelude::*;
use bevy_egui::egui;

use crate::table::events::{CancelDeletionRequest, ConfirmDeletionRequest};
use crate::table::resources::ActiveTable;

/// Displays the deletion confirmation window while a gate is armed.
/// Handles the code input and sends the confirm/cancel events.
pub fn show_deletion_gate_popup(
    ctx: &egui::Context,
    active: &mut ActiveTable,
    confirm_writer: &mut EventWriter<ConfirmDeletionRequest>,
    cancel_writer: &mut EventWriter<CancelDeletionRequest>,
) {
    let Some(session) = active.session.as_mut() else {
        return;
    };
    let Some(pending_removed) = session.pending_removed() else {
        return;
    };
    let Some(gate) = session.gate_mut() else {
        return;
    };

    let mut popup_open = true;
    // Flags to defer event sending until after the UI scope
    let mut trigger_confirm = false;
    let mut trigger_cancel = false;

    egui::Window::new("Confirm Deletion")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut popup_open)
        .show(ctx, |ui| {
            ui.label(format!("This will remove {} row(s).", pending_removed));
            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Enter code '125' to confirm deletion:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut gate.code_input)
                        .desired_width(60.0)
                        .lock_focus(true),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    trigger_confirm = true;
                }
            });
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Confirm Deletion").clicked() {
                    trigger_confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    trigger_cancel = true;
                }
            });
        });

    if trigger_confirm {
        confirm_writer.write(ConfirmDeletionRequest);
    } else if trigger_cancel || !popup_open {
        // Closing via the 'x' abandons the pending deletion.
        cancel_writer.write(CancelDeletionRequest);
    }
}
