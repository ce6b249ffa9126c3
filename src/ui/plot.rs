use chrono::{Datelike, NaiveDate};
use eframe::egui::{ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use shopsy_dashboard::data::aggregate::DailyKpi;
use shopsy_dashboard::data::schema;

use crate::state::AppState;

/// Every series drawn by the charts; each keeps one colour everywhere.
pub const SERIES: &[&str] = &[
    "Assigned",
    "Delivered",
    "Remaining",
    "Payout",
    "Shopsy Delivered",
    "Document Delivered",
    "Shopsy Payout",
    "Non-Shopsy Payout",
    "U2S",
    "Non-U2S",
];

const CHART_HEIGHT: f32 = 240.0;

fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn x_to_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// One `[x, y]` point per day.
fn series(daily: &[DailyKpi], value: fn(&DailyKpi) -> f64) -> Vec<[f64; 2]> {
    daily.iter().map(|d| [date_to_x(d.date), value(d)]).collect()
}

// ---------------------------------------------------------------------------
// Charts section (central panel)
// ---------------------------------------------------------------------------

/// Render the performance charts for the filtered rows.
pub fn charts(ui: &mut Ui, state: &AppState) {
    let table = &state.filtered;
    let has = |col: &str| table.has_column(col);
    let m = &state.metrics;
    let daily = &state.daily;
    let colors = &state.series_colors;

    let time_plot = |id: &str| {
        Plot::new(id)
            .legend(Legend::default())
            .height(CHART_HEIGHT)
            .x_axis_formatter(|mark, _range| x_to_label(mark.value))
            .label_formatter(|name, value| {
                if name.is_empty() {
                    x_to_label(value.x)
                } else {
                    format!("{name}\n{}\n{:.2}", x_to_label(value.x), value.y)
                }
            })
            .allow_drag(true)
            .allow_scroll(false)
            .allow_zoom(true)
    };
    let line = |name: &str, value: fn(&DailyKpi) -> f64| {
        let points: PlotPoints = series(daily, value).into();
        Line::new(points)
            .name(name)
            .color(colors.color_for(name))
            .width(2.0)
    };
    // `offset` shifts a series sideways so two series sit next to each other.
    let bars = |name: &str, offset: f64, value: fn(&DailyKpi) -> f64| {
        let bars = series(daily, value)
            .into_iter()
            .map(|[x, y]| Bar::new(x + offset, y).width(0.4))
            .collect();
        BarChart::new(bars).name(name).color(colors.color_for(name))
    };

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.heading("📈 Performance Charts");

        if m.total_assigned != 0.0 && m.total_delivered != 0.0 {
            ui.strong("Delivery Breakdown");
            let total = m.total_assigned.max(m.total_delivered);
            let share = |v: f64| if total == 0.0 { 0.0 } else { v / total * 100.0 };
            let breakdown = [("Delivered", m.total_delivered), ("Remaining", m.remaining())];
            Plot::new("delivery_breakdown")
                .legend(Legend::default())
                .height(CHART_HEIGHT * 0.6)
                .show_x(false)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .show(ui, |plot_ui| {
                    for (i, (name, value)) in breakdown.into_iter().enumerate() {
                        let bar = Bar::new(i as f64, value)
                            .width(0.6)
                            .name(format!("{name} ({:.1}%)", share(value)));
                        plot_ui.bar_chart(
                            BarChart::new(vec![bar])
                                .name(name)
                                .color(colors.color_for(name)),
                        );
                    }
                });
        }

        if !has(schema::DATE) {
            ui.label("Column 'Date' not found; time-series charts are unavailable.");
            return;
        }
        if daily.is_empty() {
            ui.label("No rows with a valid date.");
            return;
        }

        if has(schema::ASSIGNED) && has(schema::DELIVERED) {
            ui.strong("Assigned vs Delivered Over Time");
            time_plot("assigned_vs_delivered").show(ui, |plot_ui| {
                plot_ui.line(line("Assigned", |d| d.assigned));
                plot_ui.line(line("Delivered", |d| d.delivered));
            });
        }

        if has(schema::PAYOUT) {
            ui.strong("Total Payout Over Time");
            time_plot("payout").show(ui, |plot_ui| {
                plot_ui.line(line("Payout", |d| d.payout).fill(0.0));
            });
        }

        if has(schema::SHOPSY_DELIVERED) && has(schema::DOCUMENT_DELIVERED) {
            ui.strong("Shopsy vs Document Deliveries");
            time_plot("shopsy_vs_document").show(ui, |plot_ui| {
                plot_ui.bar_chart(bars("Shopsy Delivered", -0.2, |d| d.shopsy_delivered));
                plot_ui.bar_chart(bars("Document Delivered", 0.2, |d| d.document_delivered));
            });
        }

        if has(schema::PAYOUT) && has(schema::SHOPSY_PAYOUT) && has(schema::DOCUMENT_DELIVERED) {
            ui.strong("Shopsy vs Non-Shopsy Payout");
            time_plot("shopsy_vs_non_shopsy").show(ui, |plot_ui| {
                plot_ui.line(line("Shopsy Payout", |d| d.shopsy_payout));
                plot_ui.line(line("Non-Shopsy Payout", |d| d.non_shopsy_payout));
            });
        }

        let u2s_inputs = [
            schema::DELIVERED,
            schema::SHOPSY_DELIVERED,
            schema::DOCUMENT_DELIVERED,
            schema::TOTAL_U2S,
        ];
        if u2s_inputs.into_iter().all(|c| has(c)) {
            ui.strong("U2S vs Non-U2S Deliveries");
            time_plot("u2s_vs_non_u2s").show(ui, |plot_ui| {
                plot_ui.line(line("U2S", |d| d.total_u2s).fill(0.0));
                plot_ui.line(line("Non-U2S", |d| d.non_u2s).fill(0.0));
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_round_trip_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(x_to_label(date_to_x(d)), "2024-02-29");
        assert_eq!(x_to_label(date_to_x(d) + 0.4), "2024-02-29");
    }
}
