use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::model::Table;
use super::schema;

/// Per-date sums of the metric columns plus the derived splits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyKpi {
    pub date: NaiveDate,
    pub assigned: f64,
    pub delivered: f64,
    pub payout: f64,
    pub shopsy_delivered: f64,
    pub shopsy_payout: f64,
    pub document_delivered: f64,
    pub total_u2s: f64,
    pub non_shopsy_delivered: f64,
    pub non_shopsy_payout: f64,
    pub non_u2s: f64,
}

impl DailyKpi {
    fn new(date: NaiveDate) -> Self {
        DailyKpi {
            date,
            assigned: 0.0,
            delivered: 0.0,
            payout: 0.0,
            shopsy_delivered: 0.0,
            shopsy_payout: 0.0,
            document_delivered: 0.0,
            total_u2s: 0.0,
            non_shopsy_delivered: 0.0,
            non_shopsy_payout: 0.0,
            non_u2s: 0.0,
        }
    }

    fn add(&mut self, column: &str, value: f64) {
        let slot = match column {
            schema::ASSIGNED => &mut self.assigned,
            schema::DELIVERED => &mut self.delivered,
            schema::PAYOUT => &mut self.payout,
            schema::SHOPSY_DELIVERED => &mut self.shopsy_delivered,
            schema::SHOPSY_PAYOUT => &mut self.shopsy_payout,
            schema::DOCUMENT_DELIVERED => &mut self.document_delivered,
            schema::TOTAL_U2S => &mut self.total_u2s,
            _ => return,
        };
        *slot += value;
    }

    fn derive(&mut self) {
        self.non_shopsy_delivered = self.delivered - self.shopsy_delivered - self.document_delivered;
        self.non_shopsy_payout =
            self.payout - self.shopsy_payout - self.document_delivered * schema::DOCUMENT_RATE;
        self.non_u2s = self.non_shopsy_delivered - self.total_u2s;
    }
}

/// Group rows by date and sum the metric columns per day, ascending.
///
/// Rows without a valid date are left out. Missing metric columns sum to zero.
pub fn aggregate_by_date(table: &Table) -> Vec<DailyKpi> {
    if !table.has_column(schema::DATE) {
        return Vec::new();
    }
    let present: Vec<&str> = schema::METRIC_COLUMNS
        .into_iter()
        .filter(|c| table.has_column(c))
        .collect();

    let mut buckets: BTreeMap<NaiveDate, DailyKpi> = BTreeMap::new();
    for row in &table.rows {
        let Some(date) = row.get(schema::DATE).as_date() else {
            continue;
        };
        let bucket = buckets.entry(date).or_insert_with(|| DailyKpi::new(date));
        for col in &present {
            if let Some(v) = row.get(col).as_f64() {
                bucket.add(col, v);
            }
        }
    }

    buckets
        .into_values()
        .map(|mut day| {
            day.derive();
            day
        })
        .collect()
}
