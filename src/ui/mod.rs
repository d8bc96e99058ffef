//! Terminal viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop and the timer polling
//!   that drives automatic playback
//! - **[`panes`]**: stateless render functions for each visible pane (array,
//!   graph, tree, step log, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`ViewerConfig`] and the generated trace, then call [`App::run`] to start
//! the event loop.
//!
//! [`ViewerConfig`]: crate::config::ViewerConfig
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
