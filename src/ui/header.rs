//! Header and common widget rendering
//!
//! This module contains the dashboard title block, the navigation bar and
//! the help overlay entry point.

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::{KeybindingContext, NavBarItem};
use crate::theme::Styles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title block with the status message underneath
pub fn render_title(f: &mut Frame, area: Rect, state: &AppState) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let status_style = if state.status_is_error {
        Styles::error()
    } else {
        Styles::text_secondary()
    };
    let title = Paragraph::new(Line::from(Span::styled(
        state.status_message.clone(),
        status_style,
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" 📊 {} ", state.title))
            .title_style(Styles::title())
            .border_style(Styles::border_active()),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

/// Spans for the navigation bar
pub fn nav_bar_line(items: &[NavBarItem]) -> Line<'static> {
    let mut spans = Vec::with_capacity(items.len() * 3);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Styles::nav_hint()));
        }
        spans.push(Span::styled(item.key_display.clone(), Styles::header()));
        spans.push(Span::styled(format!(" {}", item.action_label), Styles::text_secondary()));
    }
    Line::from(spans)
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let items = keybinding_ctx.get_nav_items(&state.focus);
    let nav_bar = Paragraph::new(nav_bar_line(&items)).alignment(Alignment::Center);
    f.render_widget(nav_bar, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&state.focus, keybinding_ctx);
    help_overlay.render(f, f.area());
}
