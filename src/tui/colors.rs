//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Highlight for the focused form field.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Background for the delete confirmation dialog.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Completed rows and dimmed description text.
pub const DIM_GRAY: Color = Color::Rgb(110, 110, 110);
