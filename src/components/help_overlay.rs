//! Help overlay component
//!
//! Displays context-sensitive help in a centered window on top of the
//! dashboard.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::Focus;
use crate::theme::{Styles, UiConstants};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the focused pane
    pub fn new(focus: &Focus, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(focus);
        Self {
            content: Self::build_content(&sections, focus),
        }
    }

    /// Build the help content from sections
    fn build_content(sections: &[HelpSection], focus: &Focus) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            "  Funnel Dashboard Help  ",
            Styles::title(),
        )]));
        lines.push(Line::from(""));

        let pane_name = match focus {
            Focus::Filters => "Filter Options",
            Focus::Report => "Report",
        };
        lines.push(Line::from(vec![
            Span::styled("Focused pane: ", Styles::text_muted()),
            Span::styled(pane_name.to_string(), Styles::header()),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Styles::section(),
            )]));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{:<10}", key), Styles::title()),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            "Press ? or Esc to close",
            Styles::text_muted(),
        )]));

        lines
    }

    /// Number of content lines
    pub fn line_count(&self) -> usize {
        self.content.len()
    }

    /// Render the help overlay centered in `parent`
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let height = (self.content.len() as u16).saturating_add(2);
        let area = centered_rect(parent, UiConstants::DIALOG_WIDTH_PCT, height);

        f.render_widget(Clear, area);
        let help = Paragraph::new(self.content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .border_style(Styles::border_active()),
            )
            .style(Styles::panel_bg())
            .wrap(Wrap { trim: false });
        f.render_widget(help, area);
    }
}

/// A rect of `width_pct` percent width and `height` rows, centered in `parent`
pub fn centered_rect(parent: Rect, width_pct: u16, height: u16) -> Rect {
    let width = ((u32::from(parent.width) * u32::from(width_pct) / 100) as u16)
        .clamp(UiConstants::DIALOG_MIN_WIDTH, UiConstants::DIALOG_MAX_WIDTH)
        .min(parent.width);
    let height = height.min(parent.height);
    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let area = centered_rect(parent, 60, 20);
        assert_eq!(area.width, 60);
        assert_eq!(area.height, 20);
        assert_eq!(area.x, 20);
        assert_eq!(area.y, 10);
    }

    #[test]
    fn test_centered_rect_clamps_to_small_parent() {
        let parent = Rect::new(0, 0, 30, 8);
        let area = centered_rect(parent, 60, 20);
        assert!(area.width <= 30);
        assert!(area.height <= 8);
    }

    #[test]
    fn test_overlay_lists_every_binding() {
        let ctx = KeybindingContext::new();
        let overlay = HelpOverlay::new(&Focus::Filters, &ctx);
        let bindings = ctx.get_bindings(&Focus::Filters).len();
        assert!(overlay.line_count() > bindings);
    }
}
