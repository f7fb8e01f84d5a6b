//! tracelens-tui - Terminal UI for trace-lens
//!
//! This crate provides the ratatui-based interface: the detail panel and task
//! list widgets, the theme, terminal event polling and the main loop.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

// Re-export main entry point
pub use runner::run;
