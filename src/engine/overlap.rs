//! Engagement Overlap Engine
//!
//! Computes, for an ordered selection of categories:
//!
//! | Output              | Rule |
//! |---------------------|------|
//! | Intersection        | identities present in every selected category |
//! | Statistics rows     | distinct total, rows inside, remainder, percentages |
//! | Merged table        | first category's rows in the intersection, inner-joined on (identity, display) |
//! | Unique tables       | per category, rows whose identity is outside the intersection |
//!
//! # Design
//!
//! - **Pure logic**: no I/O; input tables are never mutated
//! - **Order**: selection order drives display order only; the intersection
//!   is the same for any permutation
//! - **Degenerate input**: a category with no identities reports 0% rather
//!   than failing
//!
//! # Counting asymmetry
//!
//! `total` counts distinct identities while `inside` counts rows. When a
//! table repeats an identity that belongs to the intersection, `inside` can
//! exceed `total` and `outside` goes negative. This is reproduced as-is and
//! logged as a warning.

use super::table::{Category, Table};
use crate::error::Result;
use crate::types::KeyFields;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Distinct identity values
pub type IdentitySet = HashSet<String>;

// ============================================================================
// Selection
// ============================================================================

/// An ordered, non-empty list of categories chosen for one query.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    categories: Vec<&'a Category>,
    keys: &'a KeyFields,
}

impl<'a> Selection<'a> {
    /// Returns `None` when nothing is selected.
    pub fn new(categories: Vec<&'a Category>, keys: &'a KeyFields) -> Option<Self> {
        if categories.is_empty() {
            return None;
        }
        Some(Self { categories, keys })
    }

    pub fn categories(&self) -> &[&'a Category] {
        &self.categories
    }

    pub fn keys(&self) -> &KeyFields {
        self.keys
    }

    /// Labels in selection order
    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }

    fn split_first(&self) -> (&'a Category, &[&'a Category]) {
        match self.categories.split_first() {
            Some((first, rest)) => (*first, rest),
            None => unreachable!("selection is never empty"),
        }
    }
}

// ============================================================================
// Output Types
// ============================================================================

/// Overlap statistics for one selected category
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRow {
    pub category: String,
    /// Distinct identities in the category
    pub total: usize,
    /// Rows whose identity is in the intersection
    pub inside: usize,
    /// `total - inside`; negative only under duplicate identities
    pub outside: i64,
    pub pct_inside: f64,
    pub pct_outside: f64,
}

/// The intersection rows joined across every selected category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedTable {
    pub table: Table,
    /// Label of the category each column came from
    pub sources: Vec<String>,
}

impl MergedTable {
    /// Columns grouped by the category that contributed them, in the order
    /// each category first appears
    pub fn column_origins(&self) -> Vec<(&str, Vec<&str>)> {
        let mut origins: Vec<(&str, Vec<&str>)> = Vec::new();
        for (column, source) in self.table.columns().iter().zip(&self.sources) {
            match origins.iter_mut().find(|(label, _)| *label == source.as_str()) {
                Some((_, columns)) => columns.push(column.as_str()),
                None => origins.push((source.as_str(), vec![column.as_str()])),
            }
        }
        origins
    }
}

/// Rows outside the intersection, per category, in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueTables {
    entries: Vec<(String, Table)>,
}

impl UniqueTables {
    pub fn get(&self, label: &str) -> Option<&Table> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, table)| table)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.entries.iter().map(|(l, t)| (l.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the engine derives from one selection
#[derive(Debug, Clone)]
pub struct OverlapReport {
    pub labels: Vec<String>,
    pub intersection: IdentitySet,
    pub statistics: Vec<StatisticsRow>,
    pub merged: MergedTable,
    pub unique: UniqueTables,
}

// ============================================================================
// Operations
// ============================================================================

/// Identities present in every selected category.
///
/// Starts from the first category's identities and narrows with each
/// subsequent one.
pub fn compute_intersection(selection: &Selection<'_>) -> Result<IdentitySet> {
    let keys = selection.keys();
    let (first, rest) = selection.split_first();

    let idx = first.identity_index(keys)?;
    let mut intersection: IdentitySet = first
        .table
        .column_values(idx)
        .map(str::to_owned)
        .collect();

    for category in rest {
        let idx = category.identity_index(keys)?;
        let ids: HashSet<&str> = category.table.column_values(idx).collect();
        intersection.retain(|id| ids.contains(id.as_str()));
    }

    debug!(
        "Intersection of {:?}: {} identities",
        selection.labels(),
        intersection.len()
    );
    Ok(intersection)
}

/// One statistics row per selected category, in selection order.
pub fn compute_statistics(
    selection: &Selection<'_>,
    intersection: &IdentitySet,
) -> Result<Vec<StatisticsRow>> {
    selection
        .categories()
        .iter()
        .map(|category| statistics_row(category, selection.keys(), intersection))
        .collect()
}

fn statistics_row(
    category: &Category,
    keys: &KeyFields,
    intersection: &IdentitySet,
) -> Result<StatisticsRow> {
    let idx = category.identity_index(keys)?;

    let distinct: HashSet<&str> = category.table.column_values(idx).collect();
    let total = distinct.len();
    let inside = category
        .table
        .column_values(idx)
        .filter(|id| intersection.contains(*id))
        .count();
    let outside = total as i64 - inside as i64;

    let duplicates = category.table.len() - total;
    if duplicates > 0 {
        warn!(
            "{} repeats {} identity value(s); inside ({}) counts rows while total ({}) counts distinct identities",
            category.label, duplicates, inside, total
        );
    }

    Ok(StatisticsRow {
        category: category.label.clone(),
        total,
        inside,
        outside,
        pct_inside: percentage(inside as i64, total),
        pct_outside: percentage(outside, total),
    })
}

/// `part / whole * 100` rounded to two decimals; 0 when `whole` is 0.
pub fn percentage(part: i64, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The first category's intersection rows, inner-joined with every other
/// selected category on (identity, display).
///
/// Joins are many-to-many and keep the left row order. Each join appends the
/// right table's non-key columns; duplicate column names are collapsed at the
/// end, keeping the first occurrence.
pub fn build_merged_intersection_table(
    selection: &Selection<'_>,
    intersection: &IdentitySet,
) -> Result<MergedTable> {
    let keys = selection.keys();
    let (first, rest) = selection.split_first();

    let id = first.identity_index(keys)?;
    let display = first.display_index(keys)?;

    // (column name, source label); the first table's key positions never move
    let mut columns: Vec<(String, String)> = first
        .table
        .columns()
        .iter()
        .map(|name| (name.clone(), first.label.clone()))
        .collect();
    let mut rows: Vec<Vec<String>> = first
        .table
        .rows()
        .iter()
        .filter(|row| intersection.contains(&row[id]))
        .cloned()
        .collect();

    for category in rest {
        let right_id = category.identity_index(keys)?;
        let right_display = category.display_index(keys)?;

        let mut index: HashMap<(&str, &str), Vec<usize>> = HashMap::new();
        for (i, row) in category.table.rows().iter().enumerate() {
            index
                .entry((row[right_id].as_str(), row[right_display].as_str()))
                .or_default()
                .push(i);
        }

        let carried: Vec<usize> = (0..category.table.columns().len())
            .filter(|&i| i != right_id && i != right_display)
            .collect();

        let mut joined = Vec::new();
        for left in &rows {
            let Some(matches) = index.get(&(left[id].as_str(), left[display].as_str())) else {
                continue;
            };
            for &m in matches {
                let right = &category.table.rows()[m];
                let mut row = left.clone();
                row.extend(carried.iter().map(|&i| right[i].clone()));
                joined.push(row);
            }
        }

        columns.extend(
            carried
                .iter()
                .map(|&i| (category.table.columns()[i].clone(), category.label.clone())),
        );
        debug!(
            "Joined {}: {} -> {} rows",
            category.label,
            rows.len(),
            joined.len()
        );
        rows = joined;
    }

    Ok(collapse_duplicate_columns(columns, rows))
}

fn collapse_duplicate_columns(
    columns: Vec<(String, String)>,
    rows: Vec<Vec<String>>,
) -> MergedTable {
    let mut seen = HashSet::new();
    let mut keep = Vec::with_capacity(columns.len());
    for (i, (name, _)) in columns.iter().enumerate() {
        if seen.insert(name.as_str()) {
            keep.push(i);
        }
    }

    let rows = rows
        .into_iter()
        .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
        .collect();
    let (names, sources): (Vec<String>, Vec<String>) = keep.iter().map(|&i| columns[i].clone()).unzip();

    MergedTable {
        table: Table::new(names, rows),
        sources,
    }
}

/// Per category, the rows whose identity is not in the intersection.
pub fn build_unique_tables(
    selection: &Selection<'_>,
    intersection: &IdentitySet,
) -> Result<UniqueTables> {
    let keys = selection.keys();
    let mut entries = Vec::with_capacity(selection.categories().len());

    for category in selection.categories() {
        let idx = category.identity_index(keys)?;
        let table = category
            .table
            .filter_rows(|row| !intersection.contains(&row[idx]));
        entries.push((category.label.clone(), table));
    }

    Ok(UniqueTables { entries })
}

/// Run every engine operation for the given categories.
///
/// Returns `Ok(None)` when nothing is selected.
pub fn analyze(categories: &[&Category], keys: &KeyFields) -> Result<Option<OverlapReport>> {
    let Some(selection) = Selection::new(categories.to_vec(), keys) else {
        return Ok(None);
    };

    let intersection = compute_intersection(&selection)?;
    let statistics = compute_statistics(&selection, &intersection)?;
    let merged = build_merged_intersection_table(&selection, &intersection)?;
    let unique = build_unique_tables(&selection, &intersection)?;

    Ok(Some(OverlapReport {
        labels: selection.labels().into_iter().map(str::to_owned).collect(),
        intersection,
        statistics,
        merged,
        unique,
    }))
}
