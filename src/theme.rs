//! Dashboard colors, styles and layout constants
//!
//! Every widget takes its colors from here so the sidebar, report tabs and
//! help window stay consistent.
//!
//! ```rust
//! use funnelscope::theme::{Colors, Styles};
//! use ratatui::style::Style;
//!
//! let bar = Style::default().fg(Colors::CHART_BAR);
//! let heading = Styles::header();
//! ```

use ratatui::style::{Color, Modifier, Style};

/// Named colors of the dashboard palette
pub struct Colors;

impl Colors {
    /// Help window background
    pub const BG_PANEL: Color = Color::Rgb(18, 22, 32);

    pub const FG_PRIMARY: Color = Color::White;
    pub const FG_SECONDARY: Color = Color::Gray;
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Titles and the focused border
    pub const ACCENT: Color = Color::Cyan;

    /// Panel headings and the cursor
    pub const HIGHLIGHT: Color = Color::Yellow;

    /// Checked boxes and help section titles
    pub const CHECKED: Color = Color::Green;

    pub const ERROR: Color = Color::LightRed;

    /// Empty-state and prompt text
    pub const INFO: Color = Color::LightBlue;

    pub const BORDER_FOCUSED: Color = Color::Cyan;
    pub const BORDER_UNFOCUSED: Color = Color::DarkGray;

    pub const CURSOR_BG: Color = Color::Yellow;
    pub const CURSOR_FG: Color = Color::Black;

    pub const CHART_BAR: Color = Color::LightCyan;
    pub const TABLE_HEADER: Color = Color::LightYellow;
}

/// Styles shared by the dashboard widgets
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Block titles
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Panel headings and key names in the nav bar
    pub fn header() -> Style {
        Style::default()
            .fg(Colors::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Help section titles
    pub fn section() -> Style {
        Style::default()
            .fg(Colors::CHECKED)
            .add_modifier(Modifier::BOLD)
    }

    /// Border of a pane, brighter when it has focus
    pub fn border(focused: bool) -> Style {
        if focused {
            Self::border_active()
        } else {
            Self::border_inactive()
        }
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_FOCUSED)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_UNFOCUSED)
    }

    pub fn panel_bg() -> Style {
        Style::default().bg(Colors::BG_PANEL)
    }

    /// Row under the cursor, also the active tab
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::CURSOR_FG)
            .bg(Colors::CURSOR_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn checked() -> Style {
        Style::default()
            .fg(Colors::CHECKED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn unchecked() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn info() -> Style {
        Style::default().fg(Colors::INFO)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Colors::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_header() -> Style {
        Style::default()
            .fg(Colors::TABLE_HEADER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn chart_bar() -> Style {
        Style::default().fg(Colors::CHART_BAR)
    }

    /// Separators between nav bar hints
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }
}

/// Layout sizes, in terminal cells
pub struct UiConstants;

impl UiConstants {
    /// Help window width as a share of the screen
    pub const DIALOG_WIDTH_PCT: u16 = 60;
    pub const DIALOG_MAX_WIDTH: u16 = 80;
    pub const DIALOG_MIN_WIDTH: u16 = 40;

    /// Width of the "Filter Options" sidebar
    pub const SIDEBAR_WIDTH: u16 = 34;

    pub const NAV_BAR_HEIGHT: u16 = 1;
    pub const TITLE_HEIGHT: u16 = 3;

    /// Lines moved by PgUp/PgDn in the report pane
    pub const PAGE_SCROLL_SIZE: u16 = 10;

    /// Widest a table column is drawn before truncation
    pub const MAX_COLUMN_WIDTH: u16 = 32;
}
