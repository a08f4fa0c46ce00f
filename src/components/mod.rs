//! Reusable UI components shared across dashboard panes.

pub mod help_overlay;
pub mod keybindings;
