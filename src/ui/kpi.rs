use eframe::egui::{self, RichText, ScrollArea, Ui};

use shopsy_dashboard::format::{format_count, format_currency, format_grouped};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

fn metric_card(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).small().weak());
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

fn card_row(ui: &mut Ui, cards: Vec<(&str, String)>) {
    ui.columns(cards.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(cards) {
            metric_card(col, label, value);
        }
    });
    ui.add_space(6.0);
}

/// Render the KPI section.
pub fn kpi_cards(ui: &mut Ui, state: &AppState) {
    let m = &state.metrics;
    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.heading("📊 Key Performance Indicators");
        ui.add_space(8.0);

        card_row(
            ui,
            vec![
                ("Total Assigned", format_count(m.total_assigned)),
                ("Total Delivered", format_count(m.total_delivered)),
                ("Conversion Rate (%)", format_grouped(m.conversion_rate, 2)),
                ("Total Payout", format_currency(m.total_payout)),
            ],
        );
        card_row(
            ui,
            vec![
                ("Shopsy Delivered", format_count(m.shopsy_delivered)),
                ("Shopsy Payout", format_currency(m.shopsy_payout)),
                ("Shopsy Rate Card", format_currency(m.shopsy_rate_card)),
            ],
        );
        card_row(
            ui,
            vec![
                ("Document Delivered", format_count(m.document_delivered)),
                ("Document Payout", format_currency(m.document_payout)),
                ("Document Rate Card", format_currency(m.document_rate_card)),
            ],
        );
        card_row(
            ui,
            vec![
                ("Non-Shopsy Delivered", format_count(m.non_shopsy_delivered)),
                ("Non-Shopsy Payout", format_currency(m.non_shopsy_payout)),
                ("Non-Shopsy Rate Card", format_currency(m.non_shopsy_rate_card)),
            ],
        );
        card_row(
            ui,
            vec![
                ("Total U2S", format_count(m.total_u2s)),
                ("Total Non-U2S", format_count(m.total_non_u2s)),
            ],
        );
    });
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Render the summary section: headline numbers as a bullet list.
pub fn summary(ui: &mut Ui, state: &AppState) {
    let m = &state.metrics;
    ui.heading("📋 Summary");
    ui.add_space(8.0);

    let lines = [
        ("Total Assigned", format_count(m.total_assigned)),
        ("Total Delivered", format_count(m.total_delivered)),
        ("Conversion Rate", format!("{}%", format_grouped(m.conversion_rate, 2))),
        ("Total Payout", format_currency(m.total_payout)),
        ("Shopsy Delivered", format_count(m.shopsy_delivered)),
        ("Document Delivered", format_count(m.document_delivered)),
        ("Non-Shopsy Delivered", format_count(m.non_shopsy_delivered)),
        ("Total U2S", format_count(m.total_u2s)),
        ("Total Non-U2S", format_count(m.total_non_u2s)),
    ];
    for (label, value) in lines {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("•");
            ui.label(RichText::new(format!("{label}:")).strong());
            ui.label(value);
        });
    }
}
