/// Data layer: loading, normalization, aggregation and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → DataTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  correlation table + NormalizedTable (with/without total_load)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  mean load per group, correlation matrix  → Dashboard
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  compactness selection → CompactnessView
///   └──────────┘
/// ```

pub mod aggregate;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
