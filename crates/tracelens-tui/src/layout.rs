//! Screen layout definitions for the TUI
//!
//! Header bar on top, key hints at the bottom, and the task list beside the
//! detail panel in between.

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title bar (app name, trace name, task position)
    pub header: Rect,

    /// Task list pane (left)
    pub tasks: Rect,

    /// Detail panel (right)
    pub detail: Rect,

    /// Keybinding hints
    pub hints: Rect,
}

/// Create the main screen layout
///
/// # Arguments
/// * `area` - Total screen area
/// * `task_list_width` - Preferred width of the task list; shrinks on narrow
///   terminals so the detail panel keeps at least half the width
pub fn create(area: Rect, task_list_width: u16) -> ScreenAreas {
    let [header, body, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let list_width = task_list_width.min(body.width / 2);
    let [tasks, detail] =
        Layout::horizontal([Constraint::Length(list_width), Constraint::Min(0)]).areas(body);

    ScreenAreas {
        header,
        tasks,
        detail,
        hints,
    }
}
