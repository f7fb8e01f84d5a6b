//! Task list pane: one row per task, selected row highlighted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use tracelens_app::ExecutionStore;
use tracelens_core::time_cost_str;
use unicode_width::UnicodeWidthStr;

use crate::theme::styles;

/// Widget listing every task in the trace.
pub struct TaskList<'a> {
    store: &'a ExecutionStore,
}

impl<'a> TaskList<'a> {
    pub fn new(store: &'a ExecutionStore) -> Self {
        Self { store }
    }

    /// First row to draw so the selection stays visible.
    fn offset(&self, visible_rows: usize) -> usize {
        match self.store.selected_index() {
            Some(selected) if visible_rows > 0 && selected >= visible_rows => {
                selected + 1 - visible_rows
            }
            _ => 0,
        }
    }

    fn row(&self, index: usize, width: usize) -> Line<'static> {
        let Some(task) = self.store.task_at(index) else {
            return Line::default();
        };
        let number = format!("{:>3} ", index + 1);
        let cost = format!(" {}", time_cost_str(task.cost()));
        let label_room = width.saturating_sub(number.width() + cost.width());
        let label = truncate_to_width(&task.type_label(), label_room);
        let padding = " ".repeat(label_room.saturating_sub(label.width()));

        if self.store.selected_index() == Some(index) {
            let style = styles::focused_selected();
            return Line::from(vec![
                Span::styled(number, style),
                Span::styled(label, style),
                Span::styled(padding, style),
                Span::styled(cost, style),
            ]);
        }

        let label_style = if task.error.is_some() {
            styles::failure()
        } else {
            styles::text_primary()
        };
        Line::from(vec![
            Span::styled(number, styles::text_muted()),
            Span::styled(label, label_style),
            Span::raw(padding),
            Span::styled(cost, styles::text_secondary()),
        ])
    }
}

impl Widget for TaskList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" Tasks ({}) ", self.store.task_count());
        let block = styles::glass_block(false).title(Span::styled(title, styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.store.task_count() == 0 {
            Paragraph::new(Span::styled("No tasks in trace", styles::text_muted()))
                .render(inner, buf);
            return;
        }

        let visible = inner.height as usize;
        let offset = self.offset(visible);
        let lines: Vec<Line> = (offset..self.store.task_count().min(offset + visible))
            .map(|index| self.row(index, inner.width as usize))
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracelens_core::TraceFile;

    fn store(n: usize) -> ExecutionStore {
        let tasks: Vec<String> = (0..n)
            .map(|i| format!(r#"{{"type": "Action", "subType": "Tap{i}", "timing": {{"cost": 1500}}}}"#))
            .collect();
        let json = format!(r#"{{"name": "run", "tasks": [{}]}}"#, tasks.join(","));
        ExecutionStore::new(TraceFile::from_json(&json).unwrap())
    }

    fn render(store: &ExecutionStore, w: u16, h: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
        TaskList::new(store).render(Rect::new(0, 0, w, h), &mut buf);
        buf
    }

    fn buf_contains(buf: &Buffer, w: u16, h: u16, text: &str) -> bool {
        (0..h).any(|y| {
            let row: String = (0..w)
                .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                .collect();
            row.contains(text)
        })
    }

    #[test]
    fn test_renders_rows_with_cost() {
        let s = store(2);
        let buf = render(&s, 40, 6);
        assert!(buf_contains(&buf, 40, 6, "Tasks (2)"));
        assert!(buf_contains(&buf, 40, 6, "1 Action / Tap0"));
        assert!(buf_contains(&buf, 40, 6, "1.50s"));
    }

    #[test]
    fn test_empty_store_message() {
        let s = ExecutionStore::default();
        let buf = render(&s, 40, 6);
        assert!(buf_contains(&buf, 40, 6, "No tasks in trace"));
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let mut s = store(20);
        s.select_last();
        let buf = render(&s, 40, 6);
        // 4 inner rows: tasks 17..=20 visible
        assert!(buf_contains(&buf, 40, 6, "Tap19"));
        assert!(!buf_contains(&buf, 40, 6, "Tap0 "));
    }

    #[test]
    fn test_tiny_area_no_panic() {
        render(&store(3), 4, 2);
        render(&store(3), 0, 0);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(truncate_to_width("ab", 3), "ab");
    }
}
