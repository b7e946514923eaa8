// src/ui/elements/summary.rs
use bevy_egui::egui;

use crate::table::definitions::TableData;

use super::editor::EditorWindowState;

/// Optional descriptive-statistics block for the current working table.
pub fn show_summary_section(ui: &mut egui::Ui, state: &mut EditorWindowState, table: &TableData) {
    ui.checkbox(&mut state.show_summary, "Show table summary");
    if !state.show_summary {
        return;
    }

    egui::Grid::new("summary_grid")
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Column");
            ui.strong("Type");
            ui.strong("Non-null");
            ui.strong("Nulls");
            ui.strong("Distinct");
            ui.strong("Min");
            ui.strong("Max");
            ui.strong("Mean");
            ui.end_row();

            for summary in table.summarize() {
                ui.label(&summary.header);
                ui.label(summary.data_type.to_string());
                ui.label(summary.non_null.to_string());
                ui.label(summary.nulls.to_string());
                ui.label(summary.distinct.to_string());
                ui.label(format_stat(summary.min));
                ui.label(format_stat(summary.max));
                ui.label(format_stat(summary.mean));
                ui.end_row();
            }
        });
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.3}", value),
        None => "-".to_string(),
    }
}
