//! Headless mode - print the detail side of one task to stdout
//!
//! Composes the same view model the TUI paints and writes it either as the
//! serialised display tree (JSON) or as plain text, so traces can be inspected
//! from scripts and CI logs without a terminal.
//!
//! # Example Output
//!
//! ```text
//! == Task Meta ==
//! type: Action / Tap
//! start: 2024-01-01 10:00:00
//! ...
//! ```

use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;
use tracelens_app::{config, AppState, Settings};
use tracelens_core::prelude::*;
use tracelens_core::TraceFile;

/// Output encoding for headless mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Serialised display tree
    #[default]
    Json,
    /// Plain text, one line per row
    Text,
}

/// What to print and how
#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    /// Task index across all executions
    pub task: Option<usize>,
    pub format: OutputFormat,
    /// Matched element card to mark as highlighted
    pub highlight: Option<usize>,
}

/// Run in headless mode - load the trace and print one task's detail
pub fn run_headless(trace_path: &Path, options: &HeadlessOptions) -> Result<()> {
    info!("Headless run for {}", trace_path.display());

    let base_dir = trace_path.parent().unwrap_or_else(|| Path::new("."));
    let settings = config::load_settings(base_dir);
    let trace = TraceFile::load(trace_path)
        .with_context(|| format!("Failed to load trace {}", trace_path.display()))?;

    let output = render(trace, settings, options)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    stdout.flush()?;
    Ok(())
}

/// Compose and encode the detail side for the requested task.
pub fn render(trace: TraceFile, settings: Settings, options: &HeadlessOptions) -> Result<String> {
    if trace.task_count() == 0 {
        return Err(Error::NoTasks);
    }

    let mut state = AppState::new(trace, settings);
    if let Some(index) = options.task {
        state.store.select_task(index)?;
    }
    if let Some(highlight) = options.highlight {
        let count = state.matched_element_count();
        if highlight >= count {
            warn!(
                "Highlight index {} ignored, task has {} matched elements",
                highlight, count
            );
        } else {
            state.highlighted_element = Some(highlight);
        }
    }

    let detail = state.detail();
    match options.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&detail)?),
        OutputFormat::Text => Ok(detail.plain_lines().join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = r#"{
        "groupName": "suite",
        "executions": [{
            "name": "login",
            "modelDetail": {"model": "gpt"},
            "tasks": [
                {"type": "Action", "subType": "Tap", "value": "tapped"},
                {"type": "Insight", "subType": "Locate", "log": {"dump": {"matchedElement": [
                    {"content": "Login", "rect": {"left": 1}, "center": [1, 1]}
                ]}}}
            ]
        }]
    }"#;

    fn trace() -> TraceFile {
        TraceFile::from_json(TRACE).unwrap()
    }

    #[test]
    fn test_text_output_for_first_task() {
        let out = render(trace(), Settings::default(), &HeadlessOptions {
            format: OutputFormat::Text,
            ..Default::default()
        })
        .unwrap();
        assert!(out.contains("== Model Meta =="));
        assert!(out.contains("model: gpt"));
        assert!(out.contains("tapped"));
    }

    #[test]
    fn test_json_output_is_valid_json() {
        let out = render(trace(), Settings::default(), &HeadlessOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value.get("task_meta").is_some());
    }

    #[test]
    fn test_task_out_of_range() {
        let err = render(trace(), Settings::default(), &HeadlessOptions {
            task: Some(5),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::TaskOutOfRange { index: 5, count: 2 }));
    }

    #[test]
    fn test_highlight_marks_card() {
        let out = render(trace(), Settings::default(), &HeadlessOptions {
            task: Some(1),
            format: OutputFormat::Text,
            highlight: Some(0),
        })
        .unwrap();
        assert!(out.contains("* [Login]"));
    }

    #[test]
    fn test_highlight_out_of_range_is_ignored() {
        let out = render(trace(), Settings::default(), &HeadlessOptions {
            task: Some(1),
            format: OutputFormat::Text,
            highlight: Some(3),
        })
        .unwrap();
        assert!(out.contains("[Login]"));
        assert!(!out.contains("* [Login]"));
    }

    #[test]
    fn test_empty_trace_is_error() {
        let empty = TraceFile::from_json(r#"{"tasks": []}"#).unwrap();
        let err = render(empty, Settings::default(), &HeadlessOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NoTasks));
    }
}
