//! Header and key-hint bars

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use tracelens_app::ExecutionStore;

use crate::theme::styles;

const APP_TITLE: &str = "trace-lens";

/// Top bar: app title, trace/execution name and task position.
pub struct MainHeader<'a> {
    store: &'a ExecutionStore,
}

impl<'a> MainHeader<'a> {
    pub fn new(store: &'a ExecutionStore) -> Self {
        Self { store }
    }

    fn trace_name(&self) -> Option<String> {
        let execution = self.store.dump().map(|dump| dump.name.as_str());
        match (self.store.trace().group_name.as_deref(), execution) {
            (Some(group), Some(name)) if !name.is_empty() => Some(format!("{} › {}", group, name)),
            (Some(group), _) => Some(group.to_string()),
            (None, Some(name)) if !name.is_empty() => Some(name.to_string()),
            _ => None,
        }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let separator = Span::styled(" │ ", styles::text_muted());
        let mut spans = vec![Span::styled(format!(" {}", APP_TITLE), styles::accent_bold())];
        if let Some(name) = self.trace_name() {
            spans.push(separator.clone());
            spans.push(Span::styled(name, styles::text_primary()));
        }
        if let Some(selected) = self.store.selected_index() {
            spans.push(separator);
            spans.push(Span::styled(
                format!("task {}/{}", selected + 1, self.store.task_count()),
                styles::text_secondary(),
            ));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Bottom bar listing keybindings.
pub struct KeyHints;

impl Widget for KeyHints {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let hints = [
            ("j/k", "select"),
            ("g/G", "first/last"),
            ("PgUp/PgDn", "scroll"),
            ("e", "highlight element"),
            ("q", "quit"),
        ];
        let mut spans = vec![Span::raw(" ")];
        for (key, action) in hints {
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
