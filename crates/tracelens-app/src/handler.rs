//! Update function (Update in TEA pattern)

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::AppState;

/// Lines moved per PageUp/PageDown in the detail panel.
pub const PAGE_SCROLL_LINES: u16 = 10;

/// Apply a message to the state.
pub fn update(state: &mut AppState, message: Message) {
    match message {
        Message::Key(key) => handle_key(state, key),
        Message::ScrollDetail(delta) => state.scroll_detail(i32::from(delta)),
        Message::Tick => {}
        Message::Quit => state.request_quit(),
    }
}

fn handle_key(state: &mut AppState, key: InputKey) {
    let before = state.store.selected_index();

    match key {
        InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c') => state.request_quit(),

        // Task selection
        InputKey::Char('j') | InputKey::Down => state.store.select_next(),
        InputKey::Char('k') | InputKey::Up => state.store.select_previous(),
        InputKey::Char('g') | InputKey::Home => state.store.select_first(),
        InputKey::Char('G') | InputKey::End => state.store.select_last(),

        // Detail scrolling
        InputKey::PageDown => state.scroll_detail(i32::from(PAGE_SCROLL_LINES)),
        InputKey::PageUp => state.scroll_detail(-i32::from(PAGE_SCROLL_LINES)),

        // Matched-element cross-highlighting
        InputKey::Char('e') => cycle_highlight(state),
        InputKey::Char('E') => state.highlighted_element = None,

        _ => {}
    }

    if state.store.selected_index() != before {
        state.reset_task_view();
    }
}

fn cycle_highlight(state: &mut AppState) {
    let count = state.matched_element_count();
    state.highlighted_element = match (count, state.highlighted_element) {
        (0, _) => None,
        (_, None) => Some(0),
        (n, Some(i)) => Some((i + 1) % n),
    };
}
