//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: program text with instruction coloring and the next stop highlighted
//! - [`tape`]: a window of tape cells around the cursor
//! - [`output`]: values the program has written, as text
//! - [`status`]: status bar with keybindings and engine state
//!
//! Each pane module exports a `render_*` function plus whatever scroll state it keeps
//! between frames.

pub mod output;
pub mod source;
pub mod status;
pub mod tape;

pub use output::render_output_pane;
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tape::{render_tape_pane, TapeScrollState};
