// src/ui/elements/table_grid.rs
use bevy::prelude::*;
use bevy_egui::egui;
use egui_extras::{Column, TableBuilder};

use crate::table::definitions::{ColumnDataType, TableData};
use crate::table::events::{AddRowRequest, RequestDeleteRows, UpdateCellEvent};
use crate::ui::common::edit_cell_widget;

use super::editor::EditorWindowState;

/// Empty input clears non-string cells to null; string columns keep the
/// empty string as a value.
pub fn normalize_cell_input(text: String, data_type: ColumnDataType) -> Option<String> {
    if text.is_empty() && data_type != ColumnDataType::String {
        None
    } else {
        Some(text)
    }
}

/// Renders the editable grid plus its row controls.
pub fn show_table_grid(
    ui: &mut egui::Ui,
    table: &TableData,
    state: &mut EditorWindowState,
    cell_update_writer: &mut EventWriter<UpdateCellEvent>,
    add_row_writer: &mut EventWriter<AddRowRequest>,
    delete_rows_writer: &mut EventWriter<RequestDeleteRows>,
) {
    // Selections can outlive a shrink (approved deletion, reload).
    let row_count = table.row_count();
    state.selected_rows.retain(|row| *row < row_count);

    let text_style = egui::TextStyle::Body;
    let row_height = ui.text_style_height(&text_style) + ui.style().spacing.item_spacing.y;
    let num_cols = table.column_count();

    let grid_height = (ui.available_height() - 160.0).max(140.0);
    egui::ScrollArea::both()
        .id_salt("table_grid_scroll")
        .max_height(grid_height)
        .show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Min))
                .vscroll(false)
                .min_scrolled_height(0.0)
                .column(Column::auto())
                .columns(Column::auto().at_least(80.0), num_cols)
                .header(row_height + 4.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Sel");
                    });
                    for spec in &table.columns {
                        header.col(|ui| {
                            ui.strong(&spec.header)
                                .on_hover_text(spec.data_type.to_string());
                        });
                    }
                })
                .body(|body| {
                    body.rows(row_height, row_count, |mut row| {
                        let row_idx = row.index();
                        row.col(|ui| {
                            let mut selected = state.selected_rows.contains(&row_idx);
                            if ui.checkbox(&mut selected, "").changed() {
                                if selected {
                                    state.selected_rows.insert(row_idx);
                                } else {
                                    state.selected_rows.remove(&row_idx);
                                }
                            }
                        });
                        for (col_idx, spec) in table.columns.iter().enumerate() {
                            row.col(|ui| {
                                let text = table.cell(row_idx, col_idx).unwrap_or("");
                                let id = egui::Id::new(("cell", row_idx, col_idx));
                                if let Some(new_text) = edit_cell_widget(ui, id, text) {
                                    cell_update_writer.write(UpdateCellEvent {
                                        row: row_idx,
                                        col: col_idx,
                                        value: normalize_cell_input(new_text, spec.data_type),
                                    });
                                }
                            });
                        }
                    });
                });
        });

    ui.horizontal(|ui| {
        if ui.button("Add Row").clicked() {
            add_row_writer.write(AddRowRequest);
        }
        let selected_count = state.selected_rows.len();
        let button_text = if selected_count > 0 {
            format!("Delete {} Row(s)", selected_count)
        } else {
            "Delete Selected".to_string()
        };
        if ui
            .add_enabled(selected_count > 0, egui::Button::new(button_text))
            .clicked()
        {
            delete_rows_writer.write(RequestDeleteRows {
                row_indices: state.selected_rows.clone(),
            });
            state.selected_rows.clear();
        }
    });
}
