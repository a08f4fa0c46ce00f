//! Engine modules: the pure computations behind every report.
//!
//! The engine sits between the loaded stage tables and the renderers. It
//! performs no I/O and never mutates its inputs.

pub mod overlap;
pub mod table;

pub use overlap::{
    analyze, build_merged_intersection_table, build_unique_tables, compute_intersection,
    compute_statistics, percentage, IdentitySet, MergedTable, OverlapReport, Selection,
    StatisticsRow, UniqueTables,
};
pub use table::{Category, Table};
