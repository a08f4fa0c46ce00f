//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Title block, nav bar and help overlay
//! - `sidebar` - Checkbox filter list
//! - `statistics` - Statistics table and bar chart
//! - `filtered` - Intersection and per-stage tables

mod filtered;
mod header;
mod sidebar;
mod statistics;

pub use filtered::{column_widths, panel_lines, report_lines, scroll_limit};
pub use sidebar::checkbox_label;
pub use statistics::chart_value;

use crate::app::{AppState, Focus, ReportTab};
use crate::components::keybindings::KeybindingContext;
use crate::report::{ViewModel, NO_SELECTION_MESSAGE};
use crate::theme::{Styles, UiConstants};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

/// Largest scroll offset for the report pane on `tab`
///
/// Only the Filtered Data tab scrolls; the statistics tab always fits its
/// area.
pub fn report_scroll_limit(view: &ViewModel, tab: ReportTab) -> u16 {
    match (view, tab) {
        (ViewModel::Report(report), ReportTab::FilteredData) => {
            scroll_limit(report_lines(report).len())
        }
        _ => 0,
    }
}

/// Draws the dashboard from state and the current view model
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render one frame
    pub fn render(
        &self,
        f: &mut Frame,
        state: &AppState,
        view: &ViewModel,
        keybinding_ctx: &KeybindingContext,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(UiConstants::TITLE_HEIGHT),
                Constraint::Min(10),
                Constraint::Length(UiConstants::NAV_BAR_HEIGHT),
            ])
            .split(f.area());

        header::render_title(f, chunks[0], state);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(UiConstants::SIDEBAR_WIDTH),
                Constraint::Min(20),
            ])
            .split(chunks[1]);

        sidebar::render_sidebar(f, state, body[0]);
        self.render_report(f, state, view, body[1]);

        header::render_nav_bar(f, state, keybinding_ctx, chunks[2]);

        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }

    fn render_report(&self, f: &mut Frame, state: &AppState, view: &ViewModel, area: Rect) {
        let report = match view {
            ViewModel::NoSelection => {
                let prompt = Paragraph::new(Line::from(format!("ℹ {}", NO_SELECTION_MESSAGE)))
                    .style(Styles::info())
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Styles::border(state.focus == Focus::Report)),
                    );
                f.render_widget(prompt, area);
                return;
            }
            ViewModel::Report(report) => report,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        let titles: Vec<Line> = ReportTab::ALL.iter().map(|t| Line::from(t.title())).collect();
        let tabs = Tabs::new(titles)
            .select(state.tab.index())
            .block(Block::default().borders(Borders::ALL))
            .style(Styles::text_secondary())
            .highlight_style(Styles::selected())
            .divider("│");
        f.render_widget(tabs, chunks[0]);

        match state.tab {
            ReportTab::Statistics => statistics::render_statistics_tab(f, report, chunks[1]),
            ReportTab::FilteredData => filtered::render_filtered_tab(
                f,
                report,
                chunks[1],
                state.report_scroll,
                state.focus == Focus::Report,
            ),
        }
    }
}
