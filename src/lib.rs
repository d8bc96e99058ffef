//! # Introduction
//!
//! algotrace turns a run of a classic algorithm into a finite, ordered list of
//! [`step::Step`]s (a [`step::Trace`]) and plays that list back, forward and
//! backward, in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Input → Generator → Trace → PlaybackController → Viewer
//! ```
//!
//! 1. [`input`]: arrays, graphs and binary trees, parsed from user text or
//!    drawn from a seeded RNG.
//! 2. [`generator`]: one pure generator per algorithm family. The same input
//!    always produces the same trace; malformed requests produce a one-step
//!    trace explaining the problem.
//! 3. [`step`]: the step model. Each step carries a message, highlight roles
//!    keyed by index or node id, the action taken and a family-specific state.
//! 4. [`playback`]: cursor, play/pause state machine and the timer seam.
//! 5. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Sorting: bubble, insertion, selection, merge, quick.
//! Searching: linear, binary.
//! Graphs: depth-first, breadth-first, Dijkstra.
//! Trees: in-order, pre-order, post-order traversal.

pub mod config;
pub mod constants;
pub mod generator;
pub mod input;
pub mod playback;
pub mod step;
pub mod ui;

pub use generator::generate;
pub use step::{AlgorithmId, Step, Trace};
