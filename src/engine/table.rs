//! In-memory row tables backing each funnel stage
//!
//! Cells are kept as the raw strings read from CSV. Every row is aligned to
//! the column list; short rows are padded with empty cells and surplus cells
//! are dropped when a table is built.

use crate::error::{FunnelError, Result};
use crate::types::{FunnelStage, KeyFields};

/// A table of records with named columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, normalizing every row to the column count
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Convenience constructor from string slices
    pub fn from_rows(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column with this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate the cells of one column
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[index].as_str())
    }

    /// Copy the rows matching `keep` into a new table with the same columns
    pub fn filter_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&[String]) -> bool,
    {
        Self {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
        }
    }
}

/// A named group of rows: one funnel stage's records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub table: Table,
}

impl Category {
    pub fn new(label: impl Into<String>, table: Table) -> Self {
        Self {
            label: label.into(),
            table,
        }
    }

    /// Category labelled after a funnel stage
    pub fn for_stage(stage: FunnelStage, table: Table) -> Self {
        Self::new(stage.to_string(), table)
    }

    /// Index of the identity column
    pub fn identity_index(&self, keys: &KeyFields) -> Result<usize> {
        self.require_column(&keys.identity)
    }

    /// Index of the display column
    pub fn display_index(&self, keys: &KeyFields) -> Result<usize> {
        self.require_column(&keys.display)
    }

    fn require_column(&self, column: &str) -> Result<usize> {
        self.table
            .column_index(column)
            .ok_or_else(|| FunnelError::missing_column(&self.label, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_normalized_to_column_count() {
        let table = Table::new(
            vec!["Email".into(), "Name".into(), "City".into()],
            vec![
                vec!["a@x.io".into(), "Ann".into()],
                vec!["b@x.io".into(), "Bob".into(), "Oslo".into(), "extra".into()],
            ],
        );
        assert_eq!(table.rows()[0], vec!["a@x.io", "Ann", ""]);
        assert_eq!(table.rows()[1], vec!["b@x.io", "Bob", "Oslo"]);
    }

    #[test]
    fn test_filter_rows_leaves_source_untouched() {
        let table = Table::from_rows(&["Email", "Name"], &[&["a", "Ann"], &["b", "Bob"]]);
        let filtered = table.filter_rows(|row| row[0] == "b");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.columns(), table.columns());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let category = Category::new("Gave Feedback", Table::from_rows(&["Name"], &[&["Ann"]]));
        let err = category.identity_index(&KeyFields::default()).unwrap_err();
        assert!(matches!(err, FunnelError::MissingColumn { .. }));
        assert_eq!(category.display_index(&KeyFields::default()).unwrap(), 0);
    }

    #[test]
    fn test_for_stage_uses_stage_label() {
        let category = Category::for_stage(FunnelStage::AttendedPreview, Table::default());
        assert_eq!(category.label, "Attended Preview");
    }
}
