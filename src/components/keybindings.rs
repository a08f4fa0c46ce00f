//! Keyboard shortcuts for the dashboard
//!
//! Provides a registry of keybindings that change based on which pane has
//! focus. The same registry drives key dispatch, the navigation bar and the
//! help overlay.

use crate::app::Focus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// What a key press asks the dashboard to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    Toggle,
    /// Toggle the stage at this sidebar position
    ToggleStage(usize),
    SelectAll,
    ClearAll,
    NextTab,
    SwitchFocus,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Help,
    Quit,
}

/// One key (plus modifiers) mapped to an action, with its hint text
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Binding without modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Binding that requires `modifiers`, e.g. Ctrl+C
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        // Shift is implied by the character itself
        let modifiers = event.modifiers.difference(KeyModifiers::SHIFT);
        self.key == event.code && self.modifiers == modifiers
    }
}

/// Bindings per focused pane plus the ones active everywhere
pub struct KeybindingContext {
    /// Focus-specific keybindings
    focus_bindings: HashMap<Focus, Vec<Keybinding>>,
    /// Global keybindings (available in every pane)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Registry with the dashboard's bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            focus_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Tab, KeyAction::NextTab, "Tab", "Switch tab"),
            Keybinding::new(KeyCode::Char('f'), KeyAction::SwitchFocus, "F", "Switch pane"),
            Keybinding::new(KeyCode::Char('1'), KeyAction::ToggleStage(0), "1", "Toggle Download Brochure"),
            Keybinding::new(KeyCode::Char('2'), KeyAction::ToggleStage(1), "2", "Toggle Signed Up For Preview"),
            Keybinding::new(KeyCode::Char('3'), KeyAction::ToggleStage(2), "3", "Toggle Attended Preview"),
            Keybinding::new(KeyCode::Char('4'), KeyAction::ToggleStage(3), "4", "Toggle Gave Feedback"),
            Keybinding::new(KeyCode::Char('a'), KeyAction::SelectAll, "A", "Select all"),
            Keybinding::new(KeyCode::Char('c'), KeyAction::ClearAll, "C", "Clear all"),
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        // Checkbox sidebar
        self.focus_bindings.insert(
            Focus::Filters,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous option"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next option"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Toggle, "Space", "Toggle option"),
                Keybinding::new(KeyCode::Enter, KeyAction::Toggle, "Enter", "Toggle option"),
                Keybinding::new(KeyCode::Right, KeyAction::SwitchFocus, "Right", "Focus report"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up report"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down report"),
            ],
        );

        // Report pane
        self.focus_bindings.insert(
            Focus::Report,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::ScrollUp, "Up", "Scroll up"),
                Keybinding::new(KeyCode::Down, KeyAction::ScrollDown, "Down", "Scroll down"),
                Keybinding::new(KeyCode::Char('k'), KeyAction::ScrollUp, "K", "Scroll up"),
                Keybinding::new(KeyCode::Char('j'), KeyAction::ScrollDown, "J", "Scroll down"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
                Keybinding::new(KeyCode::Left, KeyAction::SwitchFocus, "Left", "Focus filters"),
                Keybinding::new(KeyCode::Esc, KeyAction::SwitchFocus, "Esc", "Focus filters"),
            ],
        );
    }

    /// Get keybindings for a pane (includes global bindings)
    pub fn get_bindings(&self, focus: &Focus) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(focus_bindings) = self.focus_bindings.get(focus) {
            bindings.extend(focus_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Resolve a key event to an action for the focused pane
    pub fn resolve(&self, focus: &Focus, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(focus)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Hints for the bottom bar, most useful first
    pub fn get_nav_items(&self, focus: &Focus) -> Vec<NavBarItem> {
        let combined = match focus {
            Focus::Filters => ("Up/Dn", "Navigate"),
            Focus::Report => ("Up/Dn", "Scroll"),
        };
        let priority_actions = match focus {
            Focus::Filters => vec![
                KeyAction::Toggle,
                KeyAction::NextTab,
                KeyAction::SwitchFocus,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            Focus::Report => vec![
                KeyAction::PageDown,
                KeyAction::NextTab,
                KeyAction::SwitchFocus,
                KeyAction::Help,
                KeyAction::Quit,
            ],
        };

        let bindings = self.get_bindings(focus);
        let mut items = vec![NavBarItem {
            key_display: combined.0.to_string(),
            action_label: combined.1.to_string(),
        }];
        for action in priority_actions {
            if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                items.push(NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                });
            }
        }

        items
    }

    /// Get full help content for a pane (for help overlay)
    pub fn get_help_content(&self, focus: &Focus) -> Vec<HelpSection> {
        let groups: [(&str, fn(&KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::ScrollUp
                        | KeyAction::ScrollDown
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                        | KeyAction::NextTab
                        | KeyAction::SwitchFocus
                )
            }),
            ("Filters", |a| {
                matches!(
                    a,
                    KeyAction::Toggle
                        | KeyAction::ToggleStage(_)
                        | KeyAction::SelectAll
                        | KeyAction::ClearAll
                )
            }),
            ("General", |a| matches!(a, KeyAction::Help | KeyAction::Quit)),
        ];

        let bindings = self.get_bindings(focus);
        groups
            .iter()
            .filter_map(|(title, belongs)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| belongs(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// One hint in the bottom bar
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// A titled group of bindings in the help window
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
