//! tracelens-app - Application state and view models for trace-lens
//!
//! Owns the read-only trace store, the detail-side composer that turns the
//! selected task into display nodes, settings loading, and the TEA message /
//! update loop shared by the TUI and headless front ends.

pub mod config;
pub mod detail;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod signals;
pub mod state;
pub mod store;

pub use config::{load_settings, Settings};
pub use detail::DetailSide;
pub use handler::update;
pub use input_key::InputKey;
pub use message::Message;
pub use state::AppState;
pub use store::{ExecutionStore, TaskEntry};
