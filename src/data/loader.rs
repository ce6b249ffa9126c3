use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Date32Type, Float32Type, Float64Type, Int32Type, Int64Type};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Row, Table};
use super::schema;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a delivery sheet from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`                  – header row with column names
/// * `.xlsx` / `.xlsm` / `.xls` – first worksheet, header row with column names
/// * `.json`                 – `[{ "Date": "...", "Assigned": 12, ... }, ...]`
/// * `.parquet`              – flat columns
///
/// The `Date` column is coerced to dates afterwards; values that do not
/// parse become null.
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let mut table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "xlsx" | "xlsm" | "xls" => load_workbook(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DashboardError::UnsupportedFile(other.to_string()).into()),
    };
    table.coerce_dates(schema::DATE);
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells: BTreeMap<String, CellValue> = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();
        rows.push(Row::new(cells));
    }

    Ok(Table::new(headers, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// Read the first worksheet. The first row holds the column names; blank
/// header cells get positional names so no data is dropped.
fn load_workbook(path: &Path) -> Result<Table> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| anyhow!("opening workbook: {e}"))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("workbook has no worksheets")?;
    log::debug!("Reading worksheet '{sheet}' from {}", path.display());

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| anyhow!("reading worksheet '{sheet}': {e}"))?;
    let mut sheet_rows = range.rows();

    let Some(header_row) = sheet_rows.next() else {
        return Ok(Table::default());
    };
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Data::Empty => format!("Unnamed: {i}"),
            other => other.to_string(),
        })
        .collect();

    let rows = sheet_rows
        .map(|cells| {
            headers
                .iter()
                .zip(cells.iter())
                .map(|(col, cell)| (col.clone(), excel_to_cell(cell)))
                .collect::<Row>()
        })
        .collect();

    Ok(Table::new(headers, rows))
}

fn excel_to_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => guess_cell_type(s),
        Data::DateTime(dt) => {
            excel_serial_to_date(dt.as_f64()).map_or(CellValue::Null, CellValue::Date)
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Excel stores dates as days since 1899-12-30 (1900 date system).
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Date": "2024-05-01", "WM Name": "Ravi", "Assigned": 40, "Delivered": 36 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    // Columns keep the order in which keys first appear across the records.
    let mut table = Table::default();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            table.push_column(key);
        }
        table.rows.push(
            obj.iter()
                .map(|(key, val)| (key.clone(), json_to_cell(val)))
                .collect(),
        );
    }

    Ok(table)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per sheet column.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let cells: BTreeMap<String, CellValue> = schema
                .fields()
                .iter()
                .enumerate()
                .map(|(i, field)| (field.name().clone(), arrow_to_cell(batch.column(i), row)))
                .collect();
            rows.push(Row::new(cells));
        }
    }

    Ok(Table::new(column_names, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_to_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        DataType::Date32 => {
            let days = col.as_primitive::<Date32Type>().value(row);
            NaiveDate::from_ymd_opt(1970, 1, 1)
                .and_then(|epoch| epoch.checked_add_signed(Duration::days(days as i64)))
                .map_or(CellValue::Null, CellValue::Date)
        }
        other => CellValue::Text(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_keeps_header_order_and_types_cells() {
        let file = write_temp(
            ".csv",
            "Date,WM Name,Assigned,Payout\n2024-05-01,Ravi,40,120.5\nbad date,Meena,,7\n",
        );
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.column_names, vec!["Date", "WM Name", "Assigned", "Payout"]);
        assert_eq!(table.len(), 2);
        let first = &table.rows[0];
        assert_eq!(
            first.get("Date"),
            &CellValue::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        );
        assert_eq!(first.get("Assigned"), &CellValue::Integer(40));
        assert_eq!(first.get("Payout"), &CellValue::Float(120.5));

        let second = &table.rows[1];
        assert!(second.get("Date").is_null());
        assert!(second.get("Assigned").is_null());
    }

    #[test]
    fn json_records_load() {
        let file = write_temp(
            ".json",
            r#"[{"Date": "2024-05-02", "WM Name": "Ravi", "Delivered": 3},
                {"Delivered": 2.5, "Vendor ID": "V1"}]"#,
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_names, vec!["Date", "WM Name", "Delivered", "Vendor ID"]);
        assert_eq!(table.rows[1].get("Delivered"), &CellValue::Float(2.5));
        assert!(table.rows[1].get("Date").is_null());
    }

    #[test]
    fn json_must_be_an_array() {
        let file = write_temp(".json", r#"{"Delivered": 3}"#);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn parquet_flat_columns_load() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Date", DataType::Date32, true),
            Field::new("Profile ID", DataType::Utf8, false),
            Field::new("Assigned", DataType::Int64, false),
            Field::new("Payout", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Date32Array::from(vec![Some(19_844), None])),
                Arc::new(StringArray::from(vec!["P1", "P2"])),
                Arc::new(Int64Array::from(vec![10, 20])),
                Arc::new(Float64Array::from(vec![Some(1.5), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.as_file().try_clone().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.column_names, vec!["Date", "Profile ID", "Assigned", "Payout"]);
        assert_eq!(
            table.rows[0].get("Date"),
            &CellValue::Date(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap())
        );
        assert_eq!(table.rows[1].get("Profile ID"), &CellValue::Text("P2".into()));
        assert!(table.rows[1].get("Payout").is_null());
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let file = write_temp(".txt", "hello");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn workbook_first_sheet_loads() {
        use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        sheet.write_string(0, 0, "Date").unwrap();
        sheet.write_string(0, 1, "WM Name").unwrap();
        sheet.write_string(0, 3, "Assigned").unwrap();

        let day = ExcelDateTime::from_ymd(2024, 5, 1).unwrap();
        sheet.write_datetime_with_format(1, 0, &day, &date_format).unwrap();
        sheet.write_string(1, 1, "Ravi").unwrap();
        sheet.write_string(1, 2, "note").unwrap();
        sheet.write_number(1, 3, 40.0).unwrap();

        // Ragged: the second row stops after the name.
        sheet.write_string(2, 0, "2024-05-02").unwrap();
        sheet.write_boolean(2, 1, true).unwrap();
        workbook.save(file.path()).unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.column_names, vec!["Date", "WM Name", "Unnamed: 2", "Assigned"]);
        assert_eq!(table.len(), 2);

        let first = &table.rows[0];
        assert_eq!(
            first.get("Date"),
            &CellValue::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        );
        assert_eq!(first.get("WM Name"), &CellValue::Text("Ravi".into()));
        assert_eq!(first.get("Unnamed: 2"), &CellValue::Text("note".into()));
        assert_eq!(first.get("Assigned").as_f64(), Some(40.0));

        let second = &table.rows[1];
        assert_eq!(
            second.get("Date"),
            &CellValue::Date(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap())
        );
        assert_eq!(second.get("WM Name"), &CellValue::Bool(true));
        assert!(second.get("Unnamed: 2").is_null());
        assert!(second.get("Assigned").is_null());
    }

    #[test]
    fn excel_serials_map_to_dates() {
        assert_eq!(excel_serial_to_date(45413.0), NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(excel_serial_to_date(45413.75), NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }
}
