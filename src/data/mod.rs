/// Data layer: core types, loading, cleaning, filtering and selection.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  loader   │ ───▶ │ sanitize │  clean RawTweet once
///   └──────────┘      └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<Record>, sorted month index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  month + score ranges → visible records
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ selection │  plot point refs → records still passing the filter
///   └───────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod sanitize;
pub mod selection;
