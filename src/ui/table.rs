use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

/// Render the filtered rows as a striped, scrollable table.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let table = &state.filtered;
    ui.heading("📄 Filtered Data Table");
    ui.label(format!("{} rows", table.len()));
    ui.add_space(4.0);

    if table.column_names.is_empty() {
        ui.label("The file has no columns.");
        return;
    }

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .min_scrolled_height(0.0);
        for _ in &table.column_names {
            builder = builder.column(Column::auto().at_least(80.0).clip(true));
        }

        builder
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for col in &table.column_names {
                    header.col(|ui: &mut Ui| {
                        ui.label(RichText::new(col).strong());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let record = &table.rows[row.index()];
                    for col in &table.column_names {
                        row.col(|ui: &mut Ui| {
                            ui.label(record.get(col).to_string());
                        });
                    }
                });
            });
    });
}
