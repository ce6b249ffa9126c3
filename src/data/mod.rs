/// Data layer: core types, loading, filtering and KPI derivation.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date range + categorical include-sets → filtered Table
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌───────────┐
///   │   kpi     │   │ aggregate  │  per-date sums for charts
///   └──────────┘   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod kpi;
pub mod loader;
pub mod model;
pub mod schema;
