//! trace-lens Library
//!
//! A terminal inspector for automation execution traces.

pub mod headless;

// Re-export main entry points
pub use headless::{run_headless, HeadlessOptions, OutputFormat};
pub use tracelens_tui::run;
