//! Tape machine execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: [`Engine`], its lifecycle, blocking run and debug stepping
//! - [`async_run`]: cancellable background runs
//! - [`dispatch`]: what each instruction does to the tape
//! - [`result`]: the closed set of execution outcomes
//! - [`errors`]: structural and resource-access errors
//!
//! # Execution Model
//!
//! The engine keeps an instruction pointer into the source text. Each instruction
//! is dispatched against the tape, which answers with a flow: fall through to the
//! next position, or jump to a loop partner. Inert characters are skipped.
//!
//! All three modes share that loop; they differ only in when they stop:
//! `run` at the end, `run_async` also on cancellation, `step` after one
//! instruction or at a breakpoint marker.

pub mod async_run;
pub mod dispatch;
pub mod engine;
pub mod errors;
pub mod result;

pub use async_run::{AsyncRun, AsyncRunError, CancelToken};
pub use engine::{Engine, EngineBuilder, EngineState};
pub use errors::EngineError;
pub use result::{ExecutionResult, ResultClass, ResultKind};
