//! Application state definitions
//!
//! Contains the checkbox selection, focus, active report tab and scroll
//! position. State changes are plain methods so they can be tested without a
//! terminal.

use crate::types::FunnelStage;
use strum::EnumCount;

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    /// The checkbox sidebar
    Filters,
    /// The report pane (scrolling)
    Report,
}

/// Tabs of the report pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportTab {
    Statistics,
    FilteredData,
}

impl ReportTab {
    pub const ALL: [ReportTab; 2] = [ReportTab::Statistics, ReportTab::FilteredData];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Statistics => "Statistics",
            Self::FilteredData => "Filtered Data",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Statistics => 0,
            Self::FilteredData => 1,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Statistics => Self::FilteredData,
            Self::FilteredData => Self::Statistics,
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Dashboard title
    pub title: String,
    /// Checkbox per stage, in sidebar order
    pub checked: Vec<bool>,
    /// Loaded row count per stage, shown next to each checkbox
    pub stage_rows: Vec<usize>,
    /// Highlighted checkbox
    pub cursor: usize,
    /// Pane receiving navigation keys
    pub focus: Focus,
    /// Active report tab
    pub tab: ReportTab,
    /// Vertical scroll offset of the report pane
    pub report_scroll: u16,
    /// Largest scroll offset the active report can use
    pub scroll_limit: u16,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether the status message reports a failure
    pub status_is_error: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            title: "DSFP Dashboard".to_string(),
            checked: vec![false; FunnelStage::COUNT],
            stage_rows: Vec::new(),
            cursor: 0,
            focus: Focus::Filters,
            tab: ReportTab::Statistics,
            report_scroll: 0,
            scroll_limit: 0,
            help_visible: false,
            status_message: "Use the checkboxes to filter data and view statistics.".to_string(),
            status_is_error: false,
        }
    }
}

impl AppState {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Checked stages in sidebar order
    pub fn selected_stages(&self) -> Vec<FunnelStage> {
        self.checked
            .iter()
            .enumerate()
            .filter(|(_, checked)| **checked)
            .filter_map(|(i, _)| FunnelStage::from_index(i))
            .collect()
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    /// Flip one checkbox. Returns whether the selection changed.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(checked) = self.checked.get_mut(index) else {
            return false;
        };
        *checked = !*checked;
        self.report_scroll = 0;
        true
    }

    /// Flip the checkbox under the cursor
    pub fn toggle_current(&mut self) -> bool {
        self.toggle(self.cursor)
    }

    /// Check every stage. Returns whether the selection changed.
    pub fn select_all(&mut self) -> bool {
        self.set_all(true)
    }

    /// Uncheck every stage. Returns whether the selection changed.
    pub fn clear_selection(&mut self) -> bool {
        self.set_all(false)
    }

    fn set_all(&mut self, value: bool) -> bool {
        if self.checked.iter().all(|c| *c == value) {
            return false;
        }
        self.checked.iter_mut().for_each(|c| *c = value);
        self.report_scroll = 0;
        true
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.checked.len() {
            self.cursor += 1;
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
        self.report_scroll = 0;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Filters => Focus::Report,
            Focus::Report => Focus::Filters,
        };
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.report_scroll = self.report_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.report_scroll = self
            .report_scroll
            .saturating_add(lines)
            .min(self.scroll_limit);
    }

    /// Set the scroll bound for the current report, pulling the offset back
    /// inside it
    pub fn set_scroll_limit(&mut self, limit: u16) {
        self.scroll_limit = limit;
        self.report_scroll = self.report_scroll.min(limit);
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}
