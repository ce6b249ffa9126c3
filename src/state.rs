use chrono::NaiveDate;

use shopsy_dashboard::auth::Session;
use shopsy_dashboard::data::aggregate::{aggregate_by_date, DailyKpi};
use shopsy_dashboard::data::filter::{apply_filters, date_bounds, FilterSelection};
use shopsy_dashboard::data::kpi::{compute_metrics, Metrics};
use shopsy_dashboard::data::model::{CellValue, Table};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Kpis,
    Charts,
    Table,
    Summary,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Kpis, Section::Charts, Section::Table, Section::Summary];

    pub fn label(self) -> &'static str {
        match self {
            Section::Kpis => "KPIs",
            Section::Charts => "Charts",
            Section::Table => "Table",
            Section::Summary => "Summary",
        }
    }
}

/// Text typed into the login form.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub id: String,
    pub secret: String,
    pub error: Option<String>,
}

/// Date-range widget state. The picker keeps its dates while disabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateFilter {
    pub enabled: bool,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub title: String,

    /// Login state of this window's user.
    pub session: Session,
    pub login_form: LoginForm,

    /// Loaded sheet (None until the user opens a file).
    pub dataset: Option<Table>,
    /// File name of the loaded sheet.
    pub source_name: Option<String>,

    pub selection: FilterSelection,
    /// Present only when the sheet has at least one valid date.
    pub date_filter: Option<DateFilter>,

    /// Derived from `dataset` + `selection` on every change.
    pub filtered: Table,
    pub metrics: Metrics,
    pub daily: Vec<DailyKpi>,

    pub section: Section,

    /// Colours of the chart series.
    pub series_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl AppState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            session: Session::default(),
            login_form: LoginForm::default(),
            dataset: None,
            source_name: None,
            selection: FilterSelection::default(),
            date_filter: None,
            filtered: Table::default(),
            metrics: Metrics::default(),
            daily: Vec::new(),
            section: Section::Kpis,
            series_colors: ColorMap::new(crate::ui::plot::SERIES),
            status_message: None,
            status_is_error: false,
        }
    }

    /// Ingest a newly loaded sheet, reset filters and recompute.
    pub fn set_dataset(&mut self, dataset: Table, source_name: impl Into<String>) {
        self.selection = FilterSelection::default();
        self.date_filter = date_bounds(&dataset).map(|(from, to)| DateFilter {
            enabled: false,
            from,
            to,
        });
        self.dataset = Some(dataset);
        self.source_name = Some(source_name.into());
        self.set_status("File uploaded successfully!", false);
        self.recompute();
    }

    /// Re-run the KPI engine after a data or filter change.
    pub fn recompute(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.filtered = apply_filters(ds, &self.selection);
        self.metrics = compute_metrics(&self.filtered);
        self.daily = aggregate_by_date(&self.filtered);
        log::debug!(
            "Recomputed KPIs: {} of {} rows, {} days",
            self.filtered.len(),
            ds.len(),
            self.daily.len()
        );
    }

    /// Push the date widget into the filter selection.
    pub fn set_date_filter(&mut self, filter: DateFilter) {
        self.date_filter = Some(filter);
        self.selection.date_range = filter.enabled.then_some((filter.from, filter.to));
        self.recompute();
    }

    /// Toggle a single value in a column's include-set.
    pub fn toggle_filter_value(&mut self, column: &str, value: &CellValue) {
        self.selection.toggle(column, value);
        self.recompute();
    }

    /// Select every value of a column, blanks included, so no row drops out.
    pub fn select_all(&mut self, column: &str) {
        if let Some(ds) = &self.dataset {
            let all = ds.unique_values(column);
            self.selection.categories.insert(column.to_string(), all);
            self.recompute();
        }
    }

    /// Remove the restriction on a column.
    pub fn clear_filter(&mut self, column: &str) {
        self.selection.clear(column);
        self.recompute();
    }

    pub fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status_message = Some(message.into());
        self.status_is_error = is_error;
    }

    /// End the session and drop everything loaded under it.
    pub fn logout(&mut self) {
        self.session.logout();
        *self = Self::new(std::mem::take(&mut self.title));
    }
}
