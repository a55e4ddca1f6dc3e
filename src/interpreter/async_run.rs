//! Cancellable background execution
//!
//! [`Engine::run_async`] moves the engine onto one worker thread and runs the same
//! instruction loop as [`Engine::run`]. The worker polls a [`CancelToken`] at every
//! instruction boundary and stops with `ExecutionCancelled` once it is set.
//!
//! The result is delivered exactly once to the completion callback, on the worker
//! thread, and is also returned by [`AsyncRun::join`] together with the engine.
//! Because the engine is moved into the run, a second concurrent run of the same
//! instance cannot be started.

use crate::interpreter::engine::Engine;
use crate::interpreter::result::ExecutionResult;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{debug, info};

/// Cooperative cancellation flag shared with a running engine
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; observed at the next instruction boundary
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Failures of the worker thread itself
#[derive(Debug, Error)]
pub enum AsyncRunError {
    #[error("failed to start worker thread: {0}")]
    Spawn(#[from] io::Error),

    #[error("worker thread panicked")]
    WorkerPanicked,
}

/// Handle to an engine running on a worker thread
#[derive(Debug)]
pub struct AsyncRun {
    token: CancelToken,
    worker: JoinHandle<(Engine, ExecutionResult)>,
}

impl AsyncRun {
    /// Ask the run to stop at the next instruction boundary
    pub fn cancel(&self) {
        info!("cancellation requested");
        self.token.cancel();
    }

    /// Another handle to the cancellation flag, e.g. for a signal handler
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Whether the worker has returned
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker and take the engine back
    pub fn join(self) -> Result<(Engine, ExecutionResult), AsyncRunError> {
        self.worker.join().map_err(|_| AsyncRunError::WorkerPanicked)
    }
}

impl Engine {
    /// Run to completion on a worker thread
    ///
    /// `on_complete` is called exactly once, on the worker thread, with the final
    /// result (`Successful`, `ExecutionCancelled`, or the failing instruction's error).
    pub fn run_async<F>(self, on_complete: F) -> Result<AsyncRun, AsyncRunError>
    where
        F: FnOnce(ExecutionResult) + Send + 'static,
    {
        let token = CancelToken::new();
        let worker_token = token.clone();
        let mut engine = self;

        let worker = thread::Builder::new()
            .name("brainstep-run".to_string())
            .spawn(move || {
                debug!("async run started");
                let result = engine.run_until_cancelled(Some(&worker_token));
                info!(%result, "async run completed");
                on_complete(result);
                (engine, result)
            })?;

        Ok(AsyncRun { token, worker })
    }

    /// [`Engine::run_async`] without a completion callback
    pub fn spawn(self) -> Result<AsyncRun, AsyncRunError> {
        self.run_async(|_| {})
    }
}
