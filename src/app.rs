use eframe::egui;

use shopsy_dashboard::auth::IdentityVerifier;

use crate::state::{AppState, Section};
use crate::ui::{kpi, login, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    verifier: Box<dyn IdentityVerifier>,
}

impl DashboardApp {
    pub fn new(title: impl Into<String>, verifier: Box<dyn IdentityVerifier>) -> Self {
        Self {
            state: AppState::new(title),
            verifier,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Login gate ----
        if !self.state.session.is_logged_in() {
            egui::CentralPanel::default().show(ctx, |ui| {
                login::login_screen(ui, &mut self.state, self.verifier.as_ref());
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected section ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Please upload a CSV or Excel file to begin  (File → Open…)");
                });
                return;
            }
            match self.state.section {
                Section::Kpis => kpi::kpi_cards(ui, &self.state),
                Section::Charts => plot::charts(ui, &self.state),
                Section::Table => table::data_table(ui, &self.state),
                Section::Summary => kpi::summary(ui, &self.state),
            }
        });
    }
}
