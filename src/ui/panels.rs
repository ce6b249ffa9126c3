use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use shopsy_dashboard::data::filter::filter_options;
use shopsy_dashboard::data::schema;

use crate::state::{AppState, Section};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔍 Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No file loaded.");
            return;
        }
    };

    // Collect what we need so we can mutate state inside the loop.
    let columns = dataset.column_names.clone();
    let has_date = dataset.has_column(schema::DATE);
    let options: Vec<(&str, Option<_>)> = schema::FILTER_COLUMNS
        .iter()
        .map(|&col| {
            let values = dataset
                .has_column(col)
                .then(|| filter_options(dataset, col));
            (col, values)
        })
        .collect();
    let warn = ui.visuals().warn_fg_color;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Date range ----
            ui.strong("Date Range");
            match state.date_filter {
                Some(current) => {
                    let mut edited = current;
                    ui.checkbox(&mut edited.enabled, "Filter by date");
                    ui.add_enabled_ui(edited.enabled, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            ui.label("From");
                            ui.add(DatePickerButton::new(&mut edited.from).id_salt("date_from"));
                        });
                        ui.horizontal(|ui: &mut Ui| {
                            ui.label("To");
                            ui.add(DatePickerButton::new(&mut edited.to).id_salt("date_to"));
                        });
                    });
                    if edited != current {
                        state.set_date_filter(edited);
                    }
                }
                None if has_date => {
                    ui.label(RichText::new("No valid dates in 'Date'.").color(warn));
                }
                None => {
                    ui.label(RichText::new("Column 'Date' not found.").color(warn));
                }
            }
            ui.separator();

            // ---- Per-column multiselects (collapsible) ----
            for (col, values) in &options {
                let Some(values) = values else {
                    ui.label(RichText::new(format!("Column '{col}' not found.")).color(warn));
                    continue;
                };

                let selected = state
                    .selection
                    .categories
                    .get(*col)
                    .cloned()
                    .unwrap_or_default();
                let picked = selected.iter().filter(|v| !v.is_null()).count();
                let header_text = if selected.is_empty() {
                    format!("{col}  (all)")
                } else {
                    format!("{col}  ({picked}/{})", values.len())
                };

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(*col)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(col);
                            }
                            if ui.small_button("Clear").clicked() {
                                state.clear_filter(col);
                            }
                        });

                        for val in values {
                            let mut checked = selected.contains(val);
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.toggle_filter_value(col, val);
                            }
                        }
                    });
            }
            ui.separator();

            egui::CollapsingHeader::new("🧾 Columns in your file")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for col in &columns {
                        ui.label(col);
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for section in Section::ALL {
            if ui
                .selectable_label(state.section == section, section.label())
                .clicked()
            {
                state.section = section;
            }
        }

        ui.separator();

        if let (Some(ds), Some(name)) = (&state.dataset, &state.source_name) {
            ui.label(format!(
                "{name}: {} rows loaded, {} after filters",
                ds.len(),
                state.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            let color = if state.status_is_error {
                Color32::RED
            } else {
                Color32::from_rgb(0, 170, 90)
            };
            ui.label(RichText::new(msg).color(color));
        }

        let user = state.session.user().map(str::to_owned);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("Logout").clicked() {
                state.logout();
            }
            if let Some(user) = &user {
                ui.label(user);
            }
        });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload your CSV or Excel file")
        .add_filter("Supported files", &["csv", "xlsx", "xlsm", "xls", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xls"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    let Some(path) = file else {
        return;
    };
    match shopsy_dashboard::data::loader::load_file(&path) {
        Ok(table) => {
            log::info!(
                "Loaded {} rows with columns {:?} from {}",
                table.len(),
                table.column_names,
                path.display()
            );
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            state.set_dataset(table, name);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.set_status(format!("Error: {e:#}"), true);
        }
    }
}
