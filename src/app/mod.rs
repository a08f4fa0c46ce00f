//! Application module
//!
//! Contains the main application logic, state management, and event handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, Focus, ReportTab)
//! - Main module - App struct and event loop

mod state;

// Re-export state types for external use
pub use state::{AppState, Focus, ReportTab};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::engine::Category;
use crate::error::{FunnelError, Result};
use crate::report::{self, ViewModel};
use crate::theme::UiConstants;
use crate::types::KeyFields;
use crate::ui::{self, UiRenderer};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Main application struct
pub struct App {
    state: AppState,
    /// Loaded stage tables, in sidebar order
    categories: Vec<Category>,
    keys: KeyFields,
    /// View model for the current selection
    view: ViewModel,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints
    keybinding_context: KeybindingContext,
}

impl App {
    /// Create a new application instance over loaded stage tables
    pub fn new(categories: Vec<Category>, keys: KeyFields, title: impl Into<String>) -> Result<Self> {
        info!("Creating new App instance with {} categories", categories.len());

        let mut state = AppState::with_title(title);
        state.stage_rows = categories.iter().map(|c| c.table.len()).collect();

        let mut app = Self {
            state,
            categories,
            keys,
            view: ViewModel::NoSelection,
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
        };
        app.refresh_view()?;
        Ok(app)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// Get reference to keybinding context
    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Recompute the view model from the checked stages
    pub fn refresh_view(&mut self) -> Result<()> {
        let stages = self.state.selected_stages();
        let selection = report::selected_categories(&self.categories, &stages);
        self.view = report::render(&selection, &self.keys)?;
        self.state.status_is_error = false;
        self.sync_scroll_limit();

        self.state.status_message = match &self.view {
            ViewModel::NoSelection => {
                "Use the checkboxes to filter data and view statistics.".to_string()
            }
            ViewModel::Report(view) => format!(
                "{} selected · {} entries in the intersection",
                view.labels.join(" ∩ "),
                view.intersection_size
            ),
        };
        debug!("View refreshed for {:?}", stages);
        Ok(())
    }

    fn sync_scroll_limit(&mut self) {
        let limit = ui::report_scroll_limit(&self.view, self.state.tab);
        self.state.set_scroll_limit(limit);
    }

    /// Run the main loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            terminal
                .draw(|f| {
                    self.ui_renderer
                        .render(f, &self.state, &self.view, &self.keybinding_context)
                })
                .map_err(|e| FunnelError::terminal(format!("Failed to draw: {}", e)))?;

            if crossterm::event::poll(Duration::from_millis(50))? {
                match crossterm::event::read()? {
                    Event::Key(key_event) => {
                        if self.handle_key_event(key_event)? {
                            break; // Exit requested
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!("Terminal resized to {}x{}", width, height);
                    }
                    _ => {}
                }
            }
        }

        info!("Main loop finished");
        Ok(())
    }

    /// Handle a key event. Returns `true` when the app should exit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(false);
        }

        // Help overlay - ? or Esc dismisses it, q still quits
        if self.state.help_visible {
            match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => self.state.toggle_help(),
                KeyCode::Char('q') => return Ok(true),
                _ => {}
            }
            return Ok(false);
        }

        let Some(action) = self
            .keybinding_context
            .resolve(&self.state.focus, &key_event)
        else {
            return Ok(false);
        };
        debug!("Key {:?} -> {:?}", key_event.code, action);

        let selection_changed = match action {
            KeyAction::Quit => {
                info!("Quit requested");
                return Ok(true);
            }
            KeyAction::NavigateUp => {
                self.state.cursor_up();
                false
            }
            KeyAction::NavigateDown => {
                self.state.cursor_down();
                false
            }
            KeyAction::Toggle => self.state.toggle_current(),
            KeyAction::ToggleStage(index) => {
                self.state.cursor = index;
                self.state.toggle(index)
            }
            KeyAction::SelectAll => self.state.select_all(),
            KeyAction::ClearAll => self.state.clear_selection(),
            KeyAction::NextTab => {
                self.state.next_tab();
                self.sync_scroll_limit();
                false
            }
            KeyAction::SwitchFocus => {
                self.state.toggle_focus();
                false
            }
            KeyAction::ScrollUp => {
                self.state.scroll_up(1);
                false
            }
            KeyAction::ScrollDown => {
                self.state.scroll_down(1);
                false
            }
            KeyAction::PageUp => {
                self.state.scroll_up(UiConstants::PAGE_SCROLL_SIZE);
                false
            }
            KeyAction::PageDown => {
                self.state.scroll_down(UiConstants::PAGE_SCROLL_SIZE);
                false
            }
            KeyAction::Help => {
                self.state.toggle_help();
                false
            }
        };

        if selection_changed {
            if let Err(e) = self.refresh_view() {
                warn!("Failed to refresh report: {}", e);
                self.state.status_message = format!("Error: {}", e);
                self.state.status_is_error = true;
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Table;
    use crate::types::FunnelStage;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let categories = vec![
            Category::for_stage(
                FunnelStage::DownloadBrochure,
                Table::from_rows(&["Email", "Name"], &[&["a@x.io", "Ann"], &["b@x.io", "Bob"]]),
            ),
            Category::for_stage(
                FunnelStage::SignedUpForPreview,
                Table::from_rows(&["Email", "Name"], &[&["a@x.io", "Ann"]]),
            ),
        ];
        App::new(categories, KeyFields::default(), "Test").unwrap()
    }

    #[test]
    fn test_toggle_refreshes_view() {
        let mut app = app();
        assert_eq!(app.view(), &ViewModel::NoSelection);
        assert_eq!(app.state().stage_rows, vec![2, 1]);

        app.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        match app.view() {
            ViewModel::Report(view) => assert_eq!(view.intersection_size, 2),
            other => panic!("expected report, got {:?}", other),
        }

        app.handle_key_event(key(KeyCode::Char('2'))).unwrap();
        match app.view() {
            ViewModel::Report(view) => assert_eq!(view.intersection_size, 1),
            other => panic!("expected report, got {:?}", other),
        }
        assert!(app.state().status_message.contains("1 entries"));
    }

    #[test]
    fn test_missing_stage_table_is_skipped() {
        let mut app = app();
        // Attended Preview has no loaded table
        app.handle_key_event(key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.view(), &ViewModel::NoSelection);
    }

    #[test]
    fn test_help_blocks_other_keys() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Char('?'))).unwrap();
        assert!(app.state().help_visible);

        app.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        assert!(app.state().selected_stages().is_empty());

        app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(!app.state().help_visible);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap());
        assert!(app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap());
    }
}
