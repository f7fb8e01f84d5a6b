//! Read-only view-model store over a loaded trace.
//!
//! Holds the [`TraceFile`] and the current task selection, and exposes the
//! three selectors the detail panel consumes: the active task, its insight
//! dump and the execution dump that owns it.

use tracelens_core::prelude::*;
use tracelens_core::{ExecutionDump, InsightDump, Task, TraceFile};

/// Position of a task inside the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskEntry {
    /// Index into `TraceFile::executions`
    pub execution: usize,
    /// Index into that execution's `tasks`
    pub index: usize,
}

/// Trace plus selection. Selection changes never touch trace data.
#[derive(Debug, Clone, Default)]
pub struct ExecutionStore {
    trace: TraceFile,
    entries: Vec<TaskEntry>,
    selected: Option<usize>,
}

impl ExecutionStore {
    /// Build a store over `trace`, selecting the first task if there is one.
    pub fn new(trace: TraceFile) -> Self {
        let entries: Vec<TaskEntry> = trace
            .executions
            .iter()
            .enumerate()
            .flat_map(|(execution, dump)| {
                (0..dump.tasks.len()).map(move |index| TaskEntry { execution, index })
            })
            .collect();
        let selected = if entries.is_empty() { None } else { Some(0) };
        Self {
            trace,
            entries,
            selected,
        }
    }

    pub fn trace(&self) -> &TraceFile {
        &self.trace
    }

    /// Flattened task positions, in file order.
    pub fn entries(&self) -> &[TaskEntry] {
        &self.entries
    }

    pub fn task_count(&self) -> usize {
        self.entries.len()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Task at a flattened index.
    pub fn task_at(&self, index: usize) -> Option<&Task> {
        let entry = self.entries.get(index)?;
        self.trace
            .executions
            .get(entry.execution)?
            .tasks
            .get(entry.index)
    }

    // ── Selectors ────────────────────────────────────────────────────────────

    /// The currently selected task.
    pub fn active_task(&self) -> Option<&Task> {
        self.task_at(self.selected?)
    }

    /// Insight dump recorded by the active task.
    pub fn insight_dump(&self) -> Option<&InsightDump> {
        self.active_task().and_then(Task::insight_dump)
    }

    /// Execution that owns the active task.
    pub fn dump(&self) -> Option<&ExecutionDump> {
        let entry = self.entries.get(self.selected?)?;
        self.trace.executions.get(entry.execution)
    }

    // ── Selection ────────────────────────────────────────────────────────────

    /// Select the task at `index`.
    pub fn select_task(&mut self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(Error::TaskOutOfRange {
                index,
                count: self.entries.len(),
            });
        }
        debug!("Selecting task {}", index);
        self.selected = Some(index);
        Ok(())
    }

    /// Move to the next task; stays on the last one.
    pub fn select_next(&mut self) {
        if let Some(current) = self.selected {
            if current + 1 < self.entries.len() {
                self.selected = Some(current + 1);
            }
        }
    }

    /// Move to the previous task; stays on the first one.
    pub fn select_previous(&mut self) {
        if let Some(current) = self.selected {
            self.selected = Some(current.saturating_sub(1));
        }
    }

    pub fn select_first(&mut self) {
        if !self.entries.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.entries.is_empty() {
            self.selected = Some(self.entries.len() - 1);
        }
    }
}
