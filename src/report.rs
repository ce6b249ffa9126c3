//! Headless KPI report behind the `kpi-report` binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;

use crate::data::aggregate::{aggregate_by_date, DailyKpi};
use crate::data::filter::{apply_filters, filter_options, FilterSelection};
use crate::data::kpi::{compute_metrics, Metrics};
use crate::data::model::{parse_date, CellValue, Table};
use crate::error::DashboardError;

/// Compute delivery KPIs for a sheet and print them as JSON.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "kpi-report")]
pub struct ReportArgs {
    /// Delivery sheet (.csv, .xlsx, .xls, .json or .parquet).
    pub path: PathBuf,

    /// First day to include (YYYY-MM-DD).
    #[arg(long, value_parser = parse_day)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD).
    #[arg(long, value_parser = parse_day)]
    pub to: Option<NaiveDate>,

    /// Keep rows whose column shows this value (repeatable).
    ///
    /// Filters on the same column are OR-ed, different columns are AND-ed.
    #[arg(long = "filter", value_name = "COLUMN=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
}

fn parse_day(s: &str) -> Result<NaiveDate, DashboardError> {
    parse_date(s).ok_or_else(|| DashboardError::InvalidDate(s.to_string()))
}

fn parse_filter(s: &str) -> Result<(String, String), DashboardError> {
    let (col, val) = s
        .split_once('=')
        .ok_or_else(|| DashboardError::InvalidFilter(s.to_string()))?;
    Ok((col.trim().to_string(), val.trim().to_string()))
}

impl ReportArgs {
    /// Turn the textual filters into a selection over `table`'s values.
    /// A value that matches no cell still restricts, so it selects nothing.
    pub fn selection(&self, table: &Table) -> FilterSelection {
        let mut selection = FilterSelection::default();
        if self.from.is_some() || self.to.is_some() {
            let from = self.from.unwrap_or(NaiveDate::MIN);
            let to = self.to.unwrap_or(NaiveDate::MAX);
            selection.date_range = Some((from, to));
        }
        for (col, wanted) in &self.filters {
            let mut matches: Vec<CellValue> = filter_options(table, col)
                .into_iter()
                .filter(|v| v.to_string() == *wanted)
                .collect();
            if matches.is_empty() {
                matches.push(CellValue::Text(wanted.clone()));
            }
            selection
                .categories
                .entry(col.clone())
                .or_default()
                .extend(matches);
        }
        selection
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub rows: usize,
    pub metrics: Metrics,
    pub daily: Vec<DailyKpi>,
}

pub fn build_report(table: &Table, selection: &FilterSelection) -> Report {
    let filtered = apply_filters(table, selection);
    Report {
        rows: filtered.len(),
        metrics: compute_metrics(&filtered),
        daily: aggregate_by_date(&filtered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn args(list: &[&str]) -> Result<ReportArgs, clap::Error> {
        ReportArgs::try_parse_from(std::iter::once("kpi-report").chain(list.iter().copied()))
    }

    fn sheet() -> Table {
        let row = |day: u32, vendor: i64, assigned: i64, delivered: i64| -> Row {
            [
                ("Date", CellValue::Date(NaiveDate::from_ymd_opt(2024, 8, day).unwrap())),
                ("Vendor ID", CellValue::Integer(vendor)),
                ("Assigned", CellValue::Integer(assigned)),
                ("Delivered", CellValue::Integer(delivered)),
            ]
            .into_iter()
            .collect()
        };
        Table::from_rows(vec![row(1, 11, 10, 5), row(2, 12, 10, 10), row(3, 11, 20, 15)])
    }

    #[test]
    fn parses_path_dates_and_filters() {
        let parsed = args(&["sheet.csv", "--from", "2024-08-02", "--filter", "Vendor ID = 11"]).unwrap();
        assert_eq!(parsed.path, PathBuf::from("sheet.csv"));
        assert_eq!(parsed.from, NaiveDate::from_ymd_opt(2024, 8, 2));
        assert_eq!(parsed.to, None);
        assert_eq!(parsed.filters, vec![("Vendor ID".to_string(), "11".to_string())]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(args(&[]).is_err());
        assert!(args(&["a.csv", "--from"]).is_err());
        assert!(args(&["a.csv", "--from", "yesterday"]).is_err());
        assert!(args(&["a.csv", "--filter", "novalue"]).is_err());
        assert!(args(&["a.csv", "--verbose"]).is_err());
        assert!(args(&["a.csv", "b.csv"]).is_err());
    }

    #[test]
    fn report_applies_textual_filters() {
        let table = sheet();
        let parsed = args(&["x.csv", "--filter", "Vendor ID=11", "--to", "2024-08-02"]).unwrap();
        let report = build_report(&table, &parsed.selection(&table));
        assert_eq!(report.rows, 1);
        assert_eq!(report.metrics.conversion_rate, 50.0);
        assert_eq!(report.daily.len(), 1);
    }

    #[test]
    fn unknown_filter_value_matches_nothing() {
        let table = sheet();
        let parsed = args(&["x.csv", "--filter", "Vendor ID=99"]).unwrap();
        let report = build_report(&table, &parsed.selection(&table));
        assert_eq!(report.rows, 0);
        assert_eq!(report.metrics, Metrics::default());
    }

    #[test]
    fn filter_on_absent_column_is_ignored() {
        let table = sheet();
        let parsed = args(&["x.csv", "--filter", "WM Name=Ravi"]).unwrap();
        assert_eq!(build_report(&table, &parsed.selection(&table)).rows, 3);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = build_report(&sheet(), &FilterSelection::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rows"], 3);
        assert_eq!(json["metrics"]["total_assigned"], 40.0);
        assert_eq!(json["daily"][0]["date"], "2024-08-01");
    }
}
