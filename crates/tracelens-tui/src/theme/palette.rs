//! Color palette.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black; // Terminal background
pub const CARD_BG: Color = Color::Black; // Panel/card backgrounds

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray; // Inactive borders
pub const BORDER_ACTIVE: Color = Color::Cyan; // Focused borders

// --- Accent ---
pub const ACCENT: Color = Color::Cyan; // Primary accent (section titles)
pub const CONTRAST_FG: Color = Color::Black; // Text on accent backgrounds

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_RED: Color = Color::Red; // Failures
pub const STATUS_YELLOW: Color = Color::Yellow; // Key hints

// --- Trace elements ---
pub const ELEMENT_TAG_BG: Color = Color::Rgb(250, 140, 22); // "Element" badge
pub const ELEMENT_HIGHLIGHT: Color = Color::Rgb(253, 89, 7); // Cross-highlighted card gutter
pub const TIMELINE_DOT: Color = Color::Rgb(6, 177, 171); // Planning timeline bullets
