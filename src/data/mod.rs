/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  project required columns → EmployeeDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ EmployeeDataset │  Vec<EmployeeRecord>, selector indices
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │  filter   │ ──▶ │ aggregate │  means, distributions, histograms
///   └──────────┘      └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod test_support;
