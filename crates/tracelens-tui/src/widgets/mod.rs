//! Custom widget components

mod detail_side;
mod header;
mod task_list;

pub use detail_side::DetailPanel;
pub use header::{KeyHints, MainHeader};
pub use task_list::TaskList;
