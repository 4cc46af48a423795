//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Background of the header and status bar.
pub const SLATE: Color = Color::Rgb(40, 44, 52);
/// Border of the selected card.
pub const ACCENT: Color = Color::Rgb(114, 137, 218);
/// Completed-task marker and the add control.
pub const TEAL: Color = Color::Rgb(56, 178, 172);
/// Delete control.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
