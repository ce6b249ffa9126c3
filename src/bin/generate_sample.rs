//! Writes a synthetic delivery sheet for trying out the dashboard.
//!
//! `generate-sample [out.parquet|out.csv]` (default `sample_deliveries.parquet`)

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }
}

/// One generated sheet row.
struct SampleRow {
    date: NaiveDate,
    wm_name: &'static str,
    profile_id: String,
    vendor_id: String,
    assigned: i64,
    delivered: i64,
    payout: f64,
    shopsy_delivered: i64,
    shopsy_payout: f64,
    documents: i64,
    u2s: i64,
}

const WM_NAMES: [&str; 4] = ["Ravi Kumar", "Meena S", "Arjun P", "Lakshmi R"];
const DAYS: i64 = 30;

fn generate_rows(rng: &mut SimpleRng) -> Result<Vec<SampleRow>> {
    let start = NaiveDate::from_ymd_opt(2024, 5, 1).context("invalid start date")?;
    let mut rows = Vec::new();

    for day in 0..DAYS {
        let date = start + chrono::Duration::days(day);
        for (w, &wm_name) in WM_NAMES.iter().enumerate() {
            for p in 0..2 {
                let assigned = rng.range(30, 80);
                let delivered = rng.range(assigned * 7 / 10, assigned);
                let shopsy_delivered = rng.range(0, delivered / 3);
                let documents = rng.range(0, (delivered - shopsy_delivered) / 5);
                let rest = delivered - shopsy_delivered - documents;
                let u2s = rng.range(0, rest / 2);

                let shopsy_payout = shopsy_delivered as f64 * 14.0;
                let other_payout = rest as f64 * (11.0 + rng.next_f64() * 4.0);
                let payout = shopsy_payout + documents as f64 * 9.0 + other_payout;

                rows.push(SampleRow {
                    date,
                    wm_name,
                    profile_id: format!("PRF-{:03}", w * 2 + p + 1),
                    vendor_id: format!("VND-{}", 100 + (w % 2)),
                    assigned,
                    delivered,
                    payout: (payout * 100.0).round() / 100.0,
                    shopsy_delivered,
                    shopsy_payout,
                    documents,
                    u2s,
                });
            }
        }
    }
    Ok(rows)
}

fn write_parquet(rows: &[SampleRow], path: &Path) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("invalid epoch")?;
    let schema = Arc::new(Schema::new(vec![
        Field::new("Date", DataType::Date32, false),
        Field::new("WM Name", DataType::Utf8, false),
        Field::new("Profile ID", DataType::Utf8, false),
        Field::new("Vendor ID", DataType::Utf8, false),
        Field::new("Assigned", DataType::Int64, false),
        Field::new("Delivered", DataType::Int64, false),
        Field::new("Payout", DataType::Float64, false),
        Field::new("Shopsy Delivered", DataType::Int64, false),
        Field::new("Shopsy Payout", DataType::Float64, false),
        Field::new("number of document delivered", DataType::Int64, false),
        Field::new("total U2S", DataType::Int64, false),
    ]));

    let ints = |f: fn(&SampleRow) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: fn(&SampleRow) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Date32Array::from(
            rows.iter()
                .map(|r| (r.date - epoch).num_days() as i32)
                .collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(rows.iter().map(|r| r.wm_name).collect::<Vec<_>>())),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.profile_id.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.vendor_id.as_str()).collect::<Vec<_>>(),
        )),
        ints(|r| r.assigned),
        ints(|r| r.delivered),
        floats(|r| r.payout),
        ints(|r| r.shopsy_delivered),
        floats(|r| r.shopsy_payout),
        ints(|r| r.documents),
        ints(|r| r.u2s),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_csv(rows: &[SampleRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating output file")?;
    writer.write_record([
        "Date",
        "WM Name",
        "Profile ID",
        "Vendor ID",
        "Assigned",
        "Delivered",
        "Payout",
        "Shopsy Delivered",
        "Shopsy Payout",
        "number of document delivered",
        "total U2S",
    ])?;
    for r in rows {
        writer.write_record([
            r.date.format("%Y-%m-%d").to_string(),
            r.wm_name.to_string(),
            r.profile_id.clone(),
            r.vendor_id.clone(),
            r.assigned.to_string(),
            r.delivered.to_string(),
            format!("{:.2}", r.payout),
            r.shopsy_delivered.to_string(),
            format!("{:.2}", r.shopsy_payout),
            r.documents.to_string(),
            r.u2s.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_deliveries.parquet".to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng)?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") | Some("pq") => write_parquet(&rows, path)?,
        Some("csv") => write_csv(&rows, path)?,
        _ => bail!("output must end in .parquet or .csv"),
    }

    println!("Wrote {} rows ({DAYS} days × {} WMs) to {output}", rows.len(), WM_NAMES.len());
    Ok(())
}
