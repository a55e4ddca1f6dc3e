//! # Introduction
//!
//! brainstep interprets Brainfuck: eight single-character instructions working on a
//! tape of integer cells through one cursor. The same engine runs a program to
//! completion, runs it on a background thread with cooperative cancellation, or
//! steps through it one instruction at a time with breakpoints.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Loop index → Engine ─┬─ run()        → ExecutionResult
//!                               ├─ run_async()  → callback + AsyncRun::join
//!                               └─ step()       → ExecutionResult per instruction
//! ```
//!
//! 1. [`program`]: keeps the source text and validates brackets into a
//!    [`program::LoopIndex`]. Malformed brackets fail construction.
//! 2. [`interpreter`]: the [`Engine`] and its three execution modes.
//! 3. [`memory`]: the [`memory::Tape`] with its lazily checked cursor.
//! 4. [`io`]: input sources and output sinks, including closures.
//! 5. [`config`]: defaults and [`EngineConfig`].
//! 6. [`ui`]: ratatui-based debugger; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use brainstep::io::CapturedOutput;
//! use brainstep::{Engine, ExecutionResult};
//!
//! let output = CapturedOutput::new();
//! let mut engine = Engine::builder("++++++++[>++++++++<-]>+.")
//!     .output(output.clone())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(engine.run(), ExecutionResult::Successful);
//! assert_eq!(output.text(), "A");
//! ```
//!
//! ## Instruction set
//!
//! `+` `-` change the current cell, `>` `<` move the cursor, `.` writes the current
//! cell, `,` reads into it, `[` `]` loop while the current cell is nonzero. In debug
//! mode `#` is a breakpoint. Every other character is ignored.

pub mod config;
pub mod interpreter;
pub mod io;
pub mod memory;
pub mod program;
pub mod ui;

pub use config::EngineConfig;
pub use interpreter::{
    AsyncRun, CancelToken, Engine, EngineError, EngineState, ExecutionResult, ResultKind,
};
