/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RankingDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ RankingDataset  │  Vec<UniversityRecord>, legend region order
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region predicate → active subset, total, top-10
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
