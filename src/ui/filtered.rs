//! Filtered Data tab: the intersection table followed by one panel per stage
//!
//! All panels are laid out as text lines in a single scrollable paragraph so
//! the report scrolls as one document regardless of how many stages are
//! selected.

use crate::engine::Table;
use crate::report::{ReportView, TablePanel};
use crate::theme::{Styles, UiConstants};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render every panel, scrolled by `scroll` lines
pub fn render_filtered_tab(f: &mut Frame, view: &ReportView, area: Rect, scroll: u16, focused: bool) {
    let lines = report_lines(view);
    let max_scroll = scroll_limit(lines.len());

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filtered Data Tables ")
                .title_style(Styles::title())
                .border_style(Styles::border(focused)),
        )
        .scroll((scroll.min(max_scroll), 0));
    f.render_widget(paragraph, area);
}

/// Largest useful scroll offset for a document of `line_count` lines
pub fn scroll_limit(line_count: usize) -> u16 {
    u16::try_from(line_count.saturating_sub(1)).unwrap_or(u16::MAX)
}

/// Lines for the intersection panel and each unique-to-stage panel
pub fn report_lines(view: &ReportView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, panel) in std::iter::once(&view.intersection)
        .chain(view.unique.iter())
        .enumerate()
    {
        if i > 0 {
            lines.push(Line::from(""));
        }
        let icon = if i == 0 { "👥" } else { "📄" };
        lines.extend(panel_lines(panel, icon));
    }
    lines
}

/// Heading, then either the table or the panel's empty-state message
pub fn panel_lines(panel: &TablePanel, icon: &str) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!("{} {} ({} rows)", icon, panel.heading, panel.table.len()),
        Styles::header(),
    ))];

    if let Some(message) = panel.placeholder() {
        lines.push(Line::from(Span::styled(format!("ℹ {}", message), Styles::info())));
        return lines;
    }

    if let Some(origins) = &panel.origins {
        lines.push(Line::from(Span::styled(origins.clone(), Styles::text_muted())));
    }

    let widths = column_widths(&panel.table, UiConstants::MAX_COLUMN_WIDTH as usize);
    lines.push(Line::from(Span::styled(
        format_row(panel.table.columns(), &widths),
        Styles::table_header(),
    )));
    lines.push(Line::from(Span::styled(
        widths.iter().map(|&w| "─".repeat(w)).collect::<Vec<_>>().join("  "),
        Styles::text_muted(),
    )));
    for row in panel.table.rows() {
        lines.push(Line::from(Span::styled(format_row(row, &widths), Styles::text())));
    }
    lines
}

/// Display width of each column, capped at `max`
pub fn column_widths(table: &Table, max: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = table.columns().iter().map(|c| c.chars().count()).collect();
    for row in table.rows() {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths.into_iter().map(|w| w.min(max)).collect()
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| fit(cell, w))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Pad or truncate `cell` to exactly `width` characters
fn fit(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    if len <= width {
        format!("{:<width$}", cell, width = width)
    } else {
        let mut out: String = cell.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("Ann", 5), "Ann  ");
        assert_eq!(fit("verylongvalue", 5), "very…");
    }

    #[test]
    fn test_scroll_limit_saturates() {
        assert_eq!(scroll_limit(0), 0);
        assert_eq!(scroll_limit(8), 7);
        assert_eq!(scroll_limit(70_000), u16::MAX);
    }

    #[test]
    fn test_column_widths_are_capped() {
        let table = Table::from_rows(&["Email", "Name"], &[&["someone@example.com", "Al"]]);
        assert_eq!(column_widths(&table, 10), vec![10, 4]);
    }

    #[test]
    fn test_empty_panel_shows_message() {
        let panel = TablePanel {
            heading: "Entries Unique to Gave Feedback".to_string(),
            table: Table::from_rows(&["Email", "Name"], &[]),
            empty_message: Some("All entries in Gave Feedback are part of the intersection.".to_string()),
            origins: None,
        };
        let lines = panel_lines(&panel, "📄");
        assert_eq!(lines.len(), 2);
        let text: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("All entries in Gave Feedback"));
    }

    #[test]
    fn test_table_panel_has_header_rule_and_rows() {
        let panel = TablePanel {
            heading: "Intersection of Selected Categories".to_string(),
            table: Table::from_rows(&["Email", "Name"], &[&["a@x.io", "Ann"], &["b@x.io", "Bob"]]),
            empty_message: None,
            origins: None,
        };
        assert_eq!(panel_lines(&panel, "👥").len(), 5);
    }

    #[test]
    fn test_column_origins_line_precedes_header() {
        let panel = TablePanel {
            heading: "Intersection of Selected Categories".to_string(),
            table: Table::from_rows(&["Email", "Name", "Plan"], &[&["a@x.io", "Ann", "pro"]]),
            empty_message: None,
            origins: Some("Columns from Download Brochure: Email, Name; Gave Feedback: Plan".to_string()),
        };
        let lines = panel_lines(&panel, "👥");
        assert_eq!(lines.len(), 5);
        let text: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("Gave Feedback: Plan"));
    }
}
