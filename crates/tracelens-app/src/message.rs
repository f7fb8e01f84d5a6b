//! Message types for the application (TEA pattern)

use crate::input_key::InputKey;

/// All possible messages in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Scroll the detail panel by a signed number of lines (mouse wheel)
    ScrollDetail(i16),

    /// Tick event; also sent on resize to force a redraw
    Tick,

    /// Quit (keybinding or signal handler)
    Quit,
}
