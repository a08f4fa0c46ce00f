//! Checkbox sidebar ("Filter Options")

use crate::app::{AppState, Focus};
use crate::theme::Styles;
use crate::types::FunnelStage;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Checkbox label for one stage, e.g. `[x] Attended Preview (42)`
pub fn checkbox_label(stage: FunnelStage, checked: bool, rows: Option<usize>) -> String {
    let mark = if checked { "[x]" } else { "[ ]" };
    match rows {
        Some(rows) => format!("{} {} ({})", mark, stage, rows),
        None => format!("{} {}", mark, stage),
    }
}

/// Render the checkbox list and the help text for the highlighted stage
pub fn render_sidebar(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Checkboxes
            Constraint::Length(4), // Tooltip
        ])
        .split(area);

    let focused = state.focus == Focus::Filters;
    let items: Vec<ListItem> = FunnelStage::all()
        .into_iter()
        .enumerate()
        .map(|(index, stage)| {
            let checked = state.is_checked(index);
            let label = checkbox_label(stage, checked, state.stage_rows.get(index).copied());
            let style = if focused && index == state.cursor {
                Styles::selected()
            } else if checked {
                Styles::checked()
            } else {
                Styles::unchecked()
            };
            let prefix = if index == state.cursor { "▸ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(label, style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Filter Options ")
            .title_style(Styles::title())
            .border_style(Styles::border(focused)),
    );
    f.render_widget(list, chunks[0]);

    if let Some(stage) = FunnelStage::from_index(state.cursor) {
        let tooltip = Paragraph::new(stage.help())
            .style(Styles::text_muted())
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP).border_style(Styles::border_inactive()));
        f.render_widget(tooltip, chunks[1]);
    }
}
