// Color palette for the archive UI - a dark scheme with the purple
// accent the archive web front end uses.

use ratatui::style::Color;

/// Primary accent - archive purple
pub const ACCENT: Color = Color::Rgb(155, 89, 182);

/// Primary text
pub const TEXT: Color = Color::Rgb(215, 215, 215);

/// Muted text for metadata and hints
pub const MUTED: Color = Color::Rgb(120, 120, 120);

/// Success green
pub const SUCCESS: Color = Color::Rgb(106, 153, 85);

/// Warning amber
pub const WARNING: Color = Color::Rgb(215, 170, 90);

/// Error red
pub const ERROR: Color = Color::Rgb(230, 100, 100);

/// Selected list row background
pub const SELECTED_BG: Color = Color::Rgb(40, 30, 48);

/// Inactive border
pub const BORDER: Color = Color::Rgb(70, 70, 70);
