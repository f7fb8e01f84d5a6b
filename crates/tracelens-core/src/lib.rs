//! # tracelens-core - Core Domain Types
//!
//! Foundation crate for trace-lens. Provides the execution-trace domain types,
//! trace loading, display formatting helpers, error handling and logging.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Trace Types (`trace`)
//! - [`TraceFile`] - A loaded trace, normalised to a list of executions
//! - [`ExecutionDump`] - One execution with its tasks and model details
//! - [`Task`] - One recorded step (action, insight query, or planning step)
//! - [`InsightDump`] - Perception snapshot attached to a task
//! - [`LocatedElement`] - A page element identified by content and geometry
//! - [`PlanningOutput`], [`PlanningAction`], [`FurtherPlan`] - Planner output
//!
//! ### Formatting (`format`)
//! - [`time_str()`], [`time_cost_str()`], [`type_str()`]
//! - [`pretty_json()`], [`compact_json()`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum grouped by layer (trace, terminal, config)
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use tracelens_core::prelude::*;
//! ```

pub mod error;
pub mod format;
pub mod logging;
pub mod trace;

/// Prelude for common imports used throughout all trace-lens crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use format::{compact_json, plain_or_compact, pretty_json, time_cost_str, time_str, type_str};
pub use trace::{
    ExecutionDump, FurtherPlan, GroupedActionDump, InsightDump, LocatedElement, PlanningAction,
    PlanningOutput, Task, TaskAction, TaskInfo, TaskLog, TraceFile, Timing,
};
