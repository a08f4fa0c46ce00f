//! Funnelscope Library
//!
//! Overlap statistics across the four stages of an engagement funnel, with
//! the terminal dashboard that presents them.

pub mod app;
pub mod cli;
pub mod components;
pub mod config_file;
pub mod engine;
pub mod error;
pub mod loader;
pub mod report;
pub mod theme;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use config_file::{DashboardConfig, StageSource};
pub use engine::{analyze, Category, OverlapReport, StatisticsRow, Table};
pub use error::FunnelError;
pub use report::{render, ReportView, ViewModel};
pub use types::{FunnelStage, KeyFields};
