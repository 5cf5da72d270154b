//! Terminal explorer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus and
//!   diagnostic selection
//! - **[`panes`]**: stateless render functions for each visible pane (source,
//!   diagnostics, AST, tokens, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the source
//! buffer and the [`FrontendOutput`] produced for it, then call [`App::run`]
//! to start the event loop.
//!
//! [`FrontendOutput`]: crate::pipeline::FrontendOutput
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
