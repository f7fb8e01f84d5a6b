//! Terminal event polling: crossterm events to app messages

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::Duration;
use tracelens_app::{InputKey, Message};
use tracelens_core::prelude::*;

/// Poll timeout (20 FPS)
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Lines moved per mouse wheel notch
const WHEEL_SCROLL_LINES: i16 = 3;

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        _ => None,
    }
}

fn mouse_event_to_message(mouse: MouseEvent) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(Message::ScrollDetail(WHEEL_SCROLL_LINES)),
        MouseEventKind::ScrollUp => Some(Message::ScrollDetail(-WHEEL_SCROLL_LINES)),
        _ => None,
    }
}

/// Map one terminal event to a message, if it means anything to the app.
pub fn translate(event: Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            key_event_to_input(key).map(Message::Key)
        }
        Event::Mouse(mouse) => mouse_event_to_message(mouse),
        Event::Resize(..) => Some(Message::Tick),
        _ => None,
    }
}

/// Poll for terminal events with timeout; a quiet interval yields `Tick`.
pub fn poll() -> Result<Option<Message>> {
    if !event::poll(POLL_INTERVAL)? {
        return Ok(Some(Message::Tick));
    }
    Ok(translate(event::read()?))
}
