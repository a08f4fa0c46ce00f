//! View model for the dashboard
//!
//! `render` turns a selection into everything a renderer needs: the
//! statistics table, the bar chart series, the intersection table and one
//! panel per selected stage. The TUI calls it on every checkbox change; the
//! `report` subcommand calls it once and prints `ViewModel::to_text`.

use crate::engine::{analyze, Category, StatisticsRow, Table};
use crate::error::Result;
use crate::types::{FunnelStage, KeyFields};
use std::fmt::Write as _;

/// Prompt shown while no stage is selected
pub const NO_SELECTION_MESSAGE: &str =
    "Select at least one filter option from the sidebar to display data.";

/// Title of the bar chart
pub const CHART_TITLE: &str = "Percentage of Emails in Intersection";

/// Column headings of the statistics table
pub const STATISTICS_HEADERS: [&str; 6] = [
    "Category",
    "Total Emails",
    "Emails in Intersection",
    "Emails not in Intersection",
    "Percentage in Intersection",
    "Percentage not in Intersection",
];

/// One bar of the intersection chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub pct_inside: f64,
}

/// A headed table, with the message to show when it has no rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePanel {
    pub heading: String,
    pub table: Table,
    pub empty_message: Option<String>,
    /// Which stage each column came from, shown above the table
    pub origins: Option<String>,
}

impl TablePanel {
    /// Message to show instead of the table, if any
    pub fn placeholder(&self) -> Option<&str> {
        if self.table.is_empty() {
            self.empty_message.as_deref()
        } else {
            None
        }
    }
}

/// Rendered output for a non-empty selection
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub labels: Vec<String>,
    pub intersection_size: usize,
    pub statistics: Vec<StatisticsRow>,
    pub chart: Vec<ChartBar>,
    pub intersection: TablePanel,
    pub unique: Vec<TablePanel>,
}

/// What the renderer draws for the current selection
#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel {
    /// Nothing selected; show the prompt
    NoSelection,
    Report(ReportView),
}

/// Categories for the checked stages, in sidebar order
pub fn selected_categories<'a>(
    categories: &'a [Category],
    stages: &[FunnelStage],
) -> Vec<&'a Category> {
    FunnelStage::all()
        .into_iter()
        .filter(|stage| stages.contains(stage))
        .filter_map(|stage| {
            let label = stage.to_string();
            categories.iter().find(|c| c.label == label)
        })
        .collect()
}

/// Compute the view model for a selection
pub fn render(selection: &[&Category], keys: &KeyFields) -> Result<ViewModel> {
    let Some(report) = analyze(selection, keys)? else {
        return Ok(ViewModel::NoSelection);
    };

    let chart = report
        .statistics
        .iter()
        .map(|row| ChartBar {
            label: row.category.clone(),
            pct_inside: row.pct_inside,
        })
        .collect();

    let origins = report
        .merged
        .column_origins()
        .into_iter()
        .map(|(label, columns)| format!("{}: {}", label, columns.join(", ")))
        .collect::<Vec<_>>()
        .join("; ");
    let intersection = TablePanel {
        heading: "Intersection of Selected Categories".to_string(),
        table: report.merged.table,
        empty_message: Some("No entries are common to all selected categories.".to_string()),
        origins: Some(format!("Columns from {}", origins)),
    };

    let unique = report
        .unique
        .iter()
        .map(|(label, table)| TablePanel {
            heading: format!("Entries Unique to {}", label),
            table: table.clone(),
            empty_message: Some(format!(
                "All entries in {} are part of the intersection.",
                label
            )),
            origins: None,
        })
        .collect();

    Ok(ViewModel::Report(ReportView {
        labels: report.labels,
        intersection_size: report.intersection.len(),
        statistics: report.statistics,
        chart,
        intersection,
        unique,
    }))
}

/// Statistics rows as display cells, in `STATISTICS_HEADERS` order
pub fn statistics_cells(row: &StatisticsRow) -> [String; 6] {
    [
        row.category.clone(),
        row.total.to_string(),
        row.inside.to_string(),
        row.outside.to_string(),
        format!("{:.2}", row.pct_inside),
        format!("{:.2}", row.pct_outside),
    ]
}

impl ViewModel {
    /// Plain-text rendering for non-interactive output
    pub fn to_text(&self) -> String {
        let ViewModel::Report(view) = self else {
            return format!("{}\n", NO_SELECTION_MESSAGE);
        };

        let mut out = String::new();
        let _ = writeln!(out, "== Statistics Overview ==");
        let headers: Vec<String> = STATISTICS_HEADERS.iter().map(|h| h.to_string()).collect();
        let rows: Vec<Vec<String>> = view
            .statistics
            .iter()
            .map(|row| statistics_cells(row).to_vec())
            .collect();
        out.push_str(&format_grid(&headers, &rows));

        let _ = writeln!(out, "\n== {} ==", CHART_TITLE);
        let width = view.chart.iter().map(|b| b.label.len()).max().unwrap_or(0);
        for bar in &view.chart {
            let filled = (bar.pct_inside.clamp(0.0, 100.0) / 2.0).round() as usize;
            let _ = writeln!(
                out,
                "{:<width$} | {} {:.2}%",
                bar.label,
                "█".repeat(filled),
                bar.pct_inside,
                width = width
            );
        }

        for panel in std::iter::once(&view.intersection).chain(view.unique.iter()) {
            let _ = writeln!(out, "\n== {} ==", panel.heading);
            match panel.placeholder() {
                Some(message) => {
                    let _ = writeln!(out, "{}", message);
                }
                None => {
                    if let Some(origins) = &panel.origins {
                        let _ = writeln!(out, "{}", origins);
                    }
                    out.push_str(&format_grid(panel.table.columns(), panel.table.rows()));
                }
            }
        }

        out
    }
}

/// Fixed-width text grid with a header separator
fn format_grid(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(columns));
    let _ = writeln!(
        out,
        "{}",
        widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join("  ")
    );
    for row in rows {
        let _ = writeln!(out, "{}", line(row.as_slice()));
    }
    out
}
