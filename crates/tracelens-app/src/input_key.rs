//! Abstract input key event, independent of terminal library.
//!
//! Converted from crossterm events at the TUI boundary so this crate (and
//! headless consumers) never depend on crossterm.

/// Abstract input key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+c, etc.)
    CharCtrl(char),

    // Navigation
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,

    Esc,
}
