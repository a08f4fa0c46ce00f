//! Statistics tab: overview table and intersection bar chart

use crate::report::{statistics_cells, ChartBar, ReportView, CHART_TITLE, STATISTICS_HEADERS};
use crate::theme::Styles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Row, Table as TableWidget},
    Frame,
};

/// Chart values are hundredths of a percent so two decimals survive `u64`
const CHART_SCALE: f64 = 100.0;

/// Render the statistics table above the bar chart
pub fn render_statistics_tab(f: &mut Frame, view: &ReportView, area: Rect) {
    let table_height = view.statistics.len() as u16 + 4; // borders + header + margin
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(table_height), Constraint::Min(8)])
        .split(area);

    render_statistics_table(f, view, chunks[0]);
    render_chart(f, &view.chart, chunks[1]);
}

fn render_statistics_table(f: &mut Frame, view: &ReportView, area: Rect) {
    let header = Row::new(STATISTICS_HEADERS.iter().map(|h| Cell::from(*h)))
        .style(Styles::table_header())
        .bottom_margin(1);
    let rows: Vec<Row> = view
        .statistics
        .iter()
        .map(|row| Row::new(statistics_cells(row)).style(Styles::text()))
        .collect();

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Fill(2),
    ];
    let table = TableWidget::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(
                " Statistics Overview · {} in intersection ",
                view.intersection_size
            ))
            .title_style(Styles::title()),
    );
    f.render_widget(table, area);
}

/// Bar value for a percentage
pub fn chart_value(pct: f64) -> u64 {
    (pct.max(0.0) * CHART_SCALE).round() as u64
}

fn render_chart(f: &mut Frame, chart: &[ChartBar], area: Rect) {
    let bars: Vec<Bar> = chart
        .iter()
        .map(|bar| {
            Bar::default()
                .value(chart_value(bar.pct_inside))
                .label(Line::from(bar.label.clone()))
                .text_value(format!("{:.2}%", bar.pct_inside))
        })
        .collect();

    let count = chart.len().max(1) as u16;
    let bar_width = (area.width.saturating_sub(2) / count)
        .saturating_sub(2)
        .clamp(6, 24);

    let widget = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", CHART_TITLE))
                .title_style(Styles::title()),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(2)
        .bar_style(Styles::chart_bar())
        .value_style(Styles::selected())
        .label_style(Styles::text_secondary())
        .max(chart_value(100.0));
    f.render_widget(widget, area);
}
