//! Terminal debugger built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: application state, keyboard event loop, run modes
//! - **[`panes`]**: render functions for the source, tape, output and status panes
//! - **[`theme`]**: color palette shared by all panes
//!
//! Construct an [`App`] with an [`Engine`] whose output sink is the app's
//! [`CapturedOutput`], then call [`App::run`].
//!
//! [`Engine`]: crate::interpreter::Engine
//! [`CapturedOutput`]: crate::io::CapturedOutput
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
