//! Application state (Model in TEA pattern)

use tracelens_core::prelude::*;
use tracelens_core::TraceFile;

use crate::config::Settings;
use crate::detail::DetailSide;
use crate::store::ExecutionStore;

/// Complete application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Trace being inspected
    pub store: ExecutionStore,

    /// Loaded settings
    pub settings: Settings,

    /// First visible line of the detail panel
    pub detail_scroll: u16,

    /// Largest useful `detail_scroll`, measured by the view each frame
    pub detail_max_scroll: u16,

    /// Matched element currently cross-highlighted
    pub highlighted_element: Option<usize>,

    should_quit: bool,
}

impl AppState {
    /// Build state for `trace`, applying `behavior.initial_task`.
    pub fn new(trace: TraceFile, settings: Settings) -> Self {
        let mut store = ExecutionStore::new(trace);
        let initial = settings.behavior.initial_task;
        if initial > 0 {
            if let Err(e) = store.select_task(initial) {
                warn!("Ignoring initial_task: {}", e);
            }
        }
        Self {
            store,
            settings,
            detail_max_scroll: u16::MAX,
            ..Self::default()
        }
    }

    /// Record the detail panel's content and viewport height, clamping the
    /// scroll offset so the last line stays at the bottom edge.
    pub fn update_detail_size(&mut self, total_lines: usize, visible_lines: usize) {
        let max = total_lines.saturating_sub(visible_lines);
        self.detail_max_scroll = u16::try_from(max).unwrap_or(u16::MAX);
        self.detail_scroll = self.detail_scroll.min(self.detail_max_scroll);
    }

    /// Scroll the detail panel by `delta` lines within the measured range.
    pub fn scroll_detail(&mut self, delta: i32) {
        let target = i32::from(self.detail_scroll) + delta;
        let clamped = target.clamp(0, i32::from(self.detail_max_scroll));
        self.detail_scroll = u16::try_from(clamped).unwrap_or(self.detail_max_scroll);
    }

    /// Compose the detail panel for the current selection.
    pub fn detail(&self) -> DetailSide {
        let mut detail = DetailSide::compose_highlighted(
            self.store.active_task(),
            self.store.insight_dump(),
            self.store.dump(),
            self.highlighted_element,
        );
        if !self.settings.ui.show_timeline {
            detail.timeline.clear();
        }
        detail
    }

    /// Number of matched elements for the active task.
    pub fn matched_element_count(&self) -> usize {
        self.store
            .insight_dump()
            .map(|dump| dump.matched_element.len())
            .unwrap_or(0)
    }

    /// Reset per-task view state after the selection changes.
    pub fn reset_task_view(&mut self) {
        self.detail_scroll = 0;
        self.highlighted_element = None;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
    }
}
