use serde::Serialize;

use super::model::Table;
use super::schema;

/// Headline KPIs of a (filtered) delivery sheet.
///
/// Every ratio is guarded: a zero denominator yields `0.0`, never NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub total_assigned: f64,
    pub total_delivered: f64,
    pub conversion_rate: f64,
    pub total_payout: f64,
    pub shopsy_delivered: f64,
    pub shopsy_payout: f64,
    pub shopsy_rate_card: f64,
    pub document_delivered: f64,
    pub document_payout: f64,
    pub document_rate_card: f64,
    pub non_shopsy_delivered: f64,
    pub non_shopsy_payout: f64,
    pub non_shopsy_rate_card: f64,
    pub total_u2s: f64,
    pub total_non_u2s: f64,
}

impl Metrics {
    /// Assigned but not (yet) delivered.
    pub fn remaining(&self) -> f64 {
        self.total_assigned - self.total_delivered
    }
}

/// Sum of the numeric cells of `column`. A missing column contributes zero,
/// as do null and non-numeric cells.
pub fn column_sum(table: &Table, column: &str) -> f64 {
    if !table.has_column(column) {
        return 0.0;
    }
    table
        .rows
        .iter()
        .filter_map(|r| r.get(column).as_f64())
        .sum()
}

/// `numerator / denominator` rounded to two decimals, or `0.0` when the
/// denominator is zero.
pub fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    guarded_scaled(numerator, denominator, 1.0)
}

/// Like [`guarded_ratio`], scaled to a percentage before rounding.
pub fn guarded_percent(numerator: f64, denominator: f64) -> f64 {
    guarded_scaled(numerator, denominator, 100.0)
}

fn guarded_scaled(numerator: f64, denominator: f64, scale: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    round2(numerator / denominator * scale)
}

/// Two decimals, ties to even.
fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round_ties_even() / 100.0;
    if r.is_finite() {
        r
    } else {
        0.0
    }
}

/// Derive the full KPI set from a table.
pub fn compute_metrics(table: &Table) -> Metrics {
    let total_assigned = column_sum(table, schema::ASSIGNED);
    let total_delivered = column_sum(table, schema::DELIVERED);
    let total_payout = column_sum(table, schema::PAYOUT);
    let shopsy_delivered = column_sum(table, schema::SHOPSY_DELIVERED);
    let shopsy_payout = column_sum(table, schema::SHOPSY_PAYOUT);
    let document_delivered = column_sum(table, schema::DOCUMENT_DELIVERED);
    let total_u2s = column_sum(table, schema::TOTAL_U2S);

    let document_payout = document_delivered * schema::DOCUMENT_RATE;
    let non_shopsy_delivered = total_delivered - shopsy_delivered - document_delivered;
    let non_shopsy_payout = total_payout - shopsy_payout - document_payout;

    Metrics {
        total_assigned,
        total_delivered,
        conversion_rate: guarded_percent(total_delivered, total_assigned),
        total_payout,
        shopsy_delivered,
        shopsy_payout,
        shopsy_rate_card: guarded_ratio(shopsy_payout, shopsy_delivered),
        document_delivered,
        document_payout,
        document_rate_card: guarded_ratio(document_payout, document_delivered),
        non_shopsy_delivered,
        non_shopsy_payout,
        non_shopsy_rate_card: guarded_ratio(non_shopsy_payout, non_shopsy_delivered),
        total_u2s,
        total_non_u2s: non_shopsy_delivered - total_u2s,
    }
}
