//! Main render/view function (View in TEA pattern)

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use tracelens_app::AppState;

use super::{layout, widgets};
use crate::theme::{palette, styles};

/// Render the complete UI (View function in TEA)
///
/// The detail view is recomposed from the store on every frame; the only
/// state written back is the measured detail size that bounds scrolling.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area, state.settings.ui.task_list_width);

    frame.render_widget(widgets::MainHeader::new(&state.store), areas.header);
    frame.render_widget(widgets::TaskList::new(&state.store), areas.tasks);

    let detail = state.detail();
    let panel = widgets::DetailPanel::new(&detail).label_width(state.settings.ui.label_width);
    let visible = styles::glass_block(true).inner(areas.detail).height;
    state.update_detail_size(panel.lines().len(), visible as usize);

    frame.render_widget(
        panel.scroll(state.detail_scroll).focused(true),
        areas.detail,
    );

    frame.render_widget(widgets::KeyHints, areas.hints);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tracelens_app::Settings;
    use tracelens_core::TraceFile;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let area = buf.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_view_renders_all_areas() {
        let trace = TraceFile::from_json(
            r##"{"name": "login", "modelDetail": {"model": "gpt"}, "tasks": [
                {"type": "Action", "actions": [{"type": "Tap", "input": "#btn"}], "value": "done"}
            ]}"##,
        )
        .unwrap();
        let mut state = AppState::new(trace, Settings::default());
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| view(frame, &mut state)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("trace-lens"));
        assert!(text.contains("Tasks (1)"));
        assert!(text.contains("Model Meta"));
        assert!(text.contains("#btn"));
        assert!(text.contains("q quit"));
    }

    #[test]
    fn test_view_empty_state_no_panic() {
        let mut state = AppState::default();
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal.draw(|frame| view(frame, &mut state)).unwrap();
    }

    #[test]
    fn test_view_clamps_detail_scroll_to_content() {
        let trace = TraceFile::from_json(
            r#"{"name": "login", "tasks": [{"type": "Action", "value": "done"}]}"#,
        )
        .unwrap();
        let mut state = AppState::new(trace, Settings::default());
        state.detail_scroll = 500;

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| view(frame, &mut state)).unwrap();

        // Short detail fits the panel, so nothing is scrolled away
        assert_eq!(state.detail_max_scroll, 0);
        assert_eq!(state.detail_scroll, 0);
        assert!(screen_text(&terminal).contains("Task Meta"));
    }

    #[test]
    fn test_view_keeps_last_line_visible_when_scrolled() {
        let tasks = r#"{"type": "Action", "actions": ["#
            .to_string()
            + &(0..40)
                .map(|i| format!(r##"{{"type": "Tap{i}", "input": "#b{i}"}}"##))
                .collect::<Vec<_>>()
                .join(",")
            + "]}";
        let json = format!(r#"{{"name": "long", "tasks": [{}]}}"#, tasks);
        let mut state = AppState::new(TraceFile::from_json(&json).unwrap(), Settings::default());
        state.detail_scroll = u16::MAX;

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| view(frame, &mut state)).unwrap();

        assert!(state.detail_max_scroll > 0);
        assert_eq!(state.detail_scroll, state.detail_max_scroll);
        assert!(screen_text(&terminal).contains("#b39"));
    }
}
