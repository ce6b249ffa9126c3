use eframe::egui::{self, Color32, RichText, Ui};

use shopsy_dashboard::auth::IdentityVerifier;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Login screen
// ---------------------------------------------------------------------------

/// Render the login form; opens the session on valid credentials.
pub fn login_screen(ui: &mut Ui, state: &mut AppState, verifier: &dyn IdentityVerifier) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() * 0.2);
        ui.heading(format!("🔐 {} Login", state.title));
        ui.add_space(12.0);

        let form = &mut state.login_form;
        egui::Grid::new("login_form")
            .num_columns(2)
            .spacing([8.0, 8.0])
            .show(ui, |ui: &mut Ui| {
                ui.label("Email");
                ui.add(egui::TextEdit::singleline(&mut form.id).desired_width(260.0));
                ui.end_row();

                ui.label("Password");
                let secret = ui.add(
                    egui::TextEdit::singleline(&mut form.secret)
                        .password(true)
                        .desired_width(260.0),
                );
                ui.end_row();

                let submitted_by_enter =
                    secret.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.label("");
                let clicked = ui.button("Login").clicked();

                if clicked || submitted_by_enter {
                    let (id, secret) = (form.id.clone(), std::mem::take(&mut form.secret));
                    if state.session.login(verifier, &id, &secret) {
                        form.error = None;
                    } else {
                        form.error = Some("❌ Invalid credentials".to_string());
                    }
                }
                ui.end_row();
            });

        if let Some(err) = &state.login_form.error {
            ui.add_space(8.0);
            ui.label(RichText::new(err).color(Color32::RED));
        }
    });
}
