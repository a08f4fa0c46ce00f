//! CSV ingestion of the funnel stage tables
//!
//! Loads each stage once at startup. Rows without an identity value cannot
//! take part in any overlap, so they are dropped here with a warning. A blank
//! display value is kept; such a row counts toward its stage's totals like any
//! other. Missing files and missing key
//! columns are fatal.

use crate::config_file::DashboardConfig;
use crate::engine::{Category, Table};
use crate::error::{FunnelError, Result};
use crate::types::{FunnelStage, KeyFields};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Parse CSV text with a header row into a table.
///
/// Header names are trimmed; cells are kept verbatim. Rows with a different
/// number of fields than the header are accepted and normalized.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader.headers()?.iter().map(str::to_owned).collect();
    let width = columns.len();

    let mut rows = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.len() != width {
            debug!(
                "Row {} has {} fields, expected {}",
                line + 1,
                record.len(),
                width
            );
        }
        rows.push(record.iter().map(str::to_owned).collect());
    }

    Ok(Table::new(columns, rows))
}

/// Read a CSV file into a table
pub fn load_table(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)?;
    read_table(file)
}

/// Load one stage and check it carries both key columns.
pub fn load_category(stage: FunnelStage, path: &Path, keys: &KeyFields) -> Result<Category> {
    let table = load_table(path)
        .map_err(|e| FunnelError::load(stage.to_string(), path.display().to_string(), e.to_string()))?;
    let category = Category::for_stage(stage, table);
    drop_blank_identities(category, keys)
}

fn drop_blank_identities(category: Category, keys: &KeyFields) -> Result<Category> {
    let id = category.identity_index(keys)?;
    let display = category.display_index(keys)?;

    let table = category.table.filter_rows(|row| !row[id].trim().is_empty());
    let dropped = category.table.len() - table.len();
    if dropped > 0 {
        warn!(
            "{}: skipped {} row(s) with a blank '{}'; stage totals exclude them",
            category.label, dropped, keys.identity
        );
    }

    let unnamed = table
        .column_values(display)
        .filter(|name| name.trim().is_empty())
        .count();
    if unnamed > 0 {
        debug!(
            "{}: {} row(s) have a blank '{}'; they only join rows left equally blank",
            category.label, unnamed, keys.display
        );
    }

    Ok(Category::new(category.label, table))
}

/// Load every stage named by the configuration, in sidebar order.
pub fn load_categories(config: &DashboardConfig) -> Result<Vec<Category>> {
    let keys = config.key_fields();
    let mut categories = Vec::new();

    for stage in FunnelStage::all() {
        let path = config.path_for(stage);
        let category = load_category(stage, &path, &keys)?;
        info!(
            "Loaded {} ({} rows, {} columns) from {}",
            category.label,
            category.table.len(),
            category.table.columns().len(),
            path.display()
        );
        categories.push(category);
    }

    Ok(categories)
}
