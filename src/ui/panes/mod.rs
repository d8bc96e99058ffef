//! TUI pane rendering modules
//!
//! Each pane module exports a stateless `render_*` function. The visual pane
//! is picked from the family of the step being shown.
//!
//! # Pane Modules
//!
//! - [`array`]: bar chart for sorting and searching steps
//! - [`graph`]: adjacency list with vertex roles, traversed edges and distances
//! - [`tree`]: sideways binary tree with node roles and traversal output
//! - [`log`]: messages of every step up to the cursor
//! - [`status`]: status bar with keybindings and playback state

pub mod array;
pub mod graph;
pub mod log;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use array::render_array_pane;
pub use graph::render_graph_pane;
pub use log::render_log_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use tree::render_tree_pane;
