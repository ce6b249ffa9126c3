use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::model::{CellValue, Table};
use super::schema;

// ---------------------------------------------------------------------------
// Filter selection: date range + which values are selected per column
// ---------------------------------------------------------------------------

/// Active filters. An absent or empty include-set means "no restriction".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    /// Inclusive `(from, to)` bounds over the `Date` column.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// column_name → accepted values.
    pub categories: BTreeMap<String, BTreeSet<CellValue>>,
}

impl FilterSelection {
    /// Whether no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.date_range.is_none() && self.categories.values().all(BTreeSet::is_empty)
    }

    /// Toggle a single value in a column's include-set.
    pub fn toggle(&mut self, column: &str, value: &CellValue) {
        let selected = self.categories.entry(column.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
    }

    /// Drop the include-set for a column.
    pub fn clear(&mut self, column: &str) {
        self.categories.remove(column);
    }
}

/// Return indices of rows that pass all active filters.
///
/// A row passes when:
/// * no date range is set, or the table has no `Date` column, or its date
///   lies within the inclusive range (null/malformed dates fail)
/// * for each non-empty include-set over a column the table has, the row's
///   value is a member of the set
pub fn filtered_indices(table: &Table, selection: &FilterSelection) -> Vec<usize> {
    let date_range = selection
        .date_range
        .filter(|_| table.has_column(schema::DATE));

    let active: Vec<(&String, &BTreeSet<CellValue>)> = selection
        .categories
        .iter()
        .filter(|(col, selected)| !selected.is_empty() && table.has_column(col))
        .collect();

    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            if let Some((from, to)) = date_range {
                match row.get(schema::DATE).as_date() {
                    Some(d) if from <= d && d <= to => {}
                    _ => return false,
                }
            }
            active
                .iter()
                .all(|(col, selected)| selected.contains(row.get(col)))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Return a new table holding the rows that pass all active filters.
/// The input table is left untouched.
pub fn apply_filters(table: &Table, selection: &FilterSelection) -> Table {
    if selection.is_empty() {
        return table.clone();
    }
    table.select(&filtered_indices(table, selection))
}

/// Values offered for a categorical filter, sorted, without nulls.
/// Empty when the column is absent.
pub fn filter_options(table: &Table, column: &str) -> Vec<CellValue> {
    table
        .unique_values(column)
        .into_iter()
        .filter(|v| !v.is_null())
        .collect()
}

/// Earliest and latest valid date, used to seed the date-range picker.
pub fn date_bounds(table: &Table) -> Option<(NaiveDate, NaiveDate)> {
    if !table.has_column(schema::DATE) {
        return None;
    }
    let mut dates = table.rows.iter().filter_map(|r| r.get(schema::DATE).as_date());
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn row(day: Option<u32>, wm: &str, vendor: i64) -> Row {
        let date_cell = day.map_or(CellValue::Null, |d| CellValue::Date(date(2024, 5, d)));
        [
            ("Date", date_cell),
            ("WM Name", text(wm)),
            ("Vendor ID", CellValue::Integer(vendor)),
            ("Assigned", CellValue::Integer(10)),
        ]
        .into_iter()
        .collect()
    }

    fn sample() -> Table {
        Table::new(
            vec!["Date".into(), "WM Name".into(), "Vendor ID".into(), "Assigned".into()],
            vec![
                row(Some(1), "Ravi", 7),
                row(Some(2), "Meena", 7),
                row(Some(3), "Ravi", 8),
                row(None, "Ravi", 8),
            ],
        )
    }

    #[test]
    fn no_filter_is_identity() {
        let table = sample();
        assert_eq!(apply_filters(&table, &FilterSelection::default()), table);
    }

    #[test]
    fn date_range_is_inclusive_and_drops_null_dates() {
        let table = sample();
        let selection = FilterSelection {
            date_range: Some((date(2024, 5, 2), date(2024, 5, 3))),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&table, &selection), vec![1, 2]);
    }

    #[test]
    fn reversed_range_matches_nothing() {
        let selection = FilterSelection {
            date_range: Some((date(2024, 5, 3), date(2024, 5, 1))),
            ..Default::default()
        };
        assert!(apply_filters(&sample(), &selection).is_empty());
    }

    #[test]
    fn categorical_filters_combine_with_and() {
        let table = sample();
        let mut selection = FilterSelection::default();
        selection.toggle("WM Name", &text("Ravi"));
        selection.toggle("Vendor ID", &CellValue::Integer(8));
        assert_eq!(filtered_indices(&table, &selection), vec![2, 3]);

        selection.date_range = Some((date(2024, 5, 1), date(2024, 5, 31)));
        assert_eq!(filtered_indices(&table, &selection), vec![2]);
    }

    #[test]
    fn empty_include_set_is_no_restriction() {
        let table = sample();
        let mut selection = FilterSelection::default();
        selection.toggle("WM Name", &text("Ravi"));
        selection.toggle("WM Name", &text("Ravi"));
        assert!(selection.is_empty());
        assert_eq!(apply_filters(&table, &selection).len(), table.len());
    }

    #[test]
    fn filters_on_absent_columns_are_no_ops() {
        let table = Table::new(
            vec!["WM Name".into()],
            vec![[("WM Name", text("A"))].into_iter().collect()],
        );
        assert!(filter_options(&table, "Vendor ID").is_empty());

        let mut selection = FilterSelection::default();
        selection.toggle("Vendor ID", &CellValue::Integer(1));
        selection.date_range = Some((date(2024, 1, 1), date(2024, 1, 2)));
        assert_eq!(apply_filters(&table, &selection), table);
    }

    #[test]
    fn filtering_never_grows_and_is_idempotent() {
        let table = sample();
        let mut selection = FilterSelection::default();
        selection.toggle("WM Name", &text("Ravi"));
        selection.date_range = Some((date(2024, 5, 1), date(2024, 5, 2)));

        let once = apply_filters(&table, &selection);
        let twice = apply_filters(&once, &selection);
        assert!(once.len() <= table.len());
        assert_eq!(once, twice);
        assert_eq!(table.len(), 4, "input must not be mutated");
    }

    #[test]
    fn options_are_sorted_and_skip_nulls() {
        let mut table = sample();
        table.rows.push(Row::default());
        assert_eq!(filter_options(&table, "WM Name"), vec![text("Meena"), text("Ravi")]);
    }

    #[test]
    fn bounds_span_valid_dates() {
        assert_eq!(date_bounds(&sample()), Some((date(2024, 5, 1), date(2024, 5, 3))));
        assert_eq!(date_bounds(&Table::default()), None);
    }
}
