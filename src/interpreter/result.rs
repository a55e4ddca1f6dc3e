//! Execution outcomes
//!
//! Every engine entry point returns an [`ExecutionResult`] as a plain value. Failures
//! carry their [`EngineError`]; callers that prefer `?` can use
//! [`ExecutionResult::into_result`].

use crate::interpreter::errors::EngineError;
use std::fmt;

/// Outcome of `run`, `run_async`, `step`, or `resume`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Program ran to the end, or one debug step executed
    Successful,
    /// Debug stepping stopped at a breakpoint marker
    BreakpointHit,
    /// Asynchronous run observed a cancellation request
    ExecutionCancelled,
    /// Debug stepping found nothing left to execute
    EndOfCodeReached,
    /// An instruction or the bracket validation failed
    Failed(EngineError),
}

/// Flat outcome code, one per member of the closed result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Successful,
    BreakpointHit,
    ExecutionCancelled,
    UnmatchedLoopEnd,
    UnclosedLoop,
    PointerNegative,
    PointerOutOfRange,
    EndOfCodeReached,
    NoInputSource,
    NoOutputSink,
}

/// Which stage produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultClass {
    /// Malformed brackets, found before execution
    Structural,
    /// Bad tape access or missing channel, found at the failing instruction
    ResourceAccess,
    /// Normal or requested termination
    Control,
}

impl ExecutionResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            ExecutionResult::Successful => ResultKind::Successful,
            ExecutionResult::BreakpointHit => ResultKind::BreakpointHit,
            ExecutionResult::ExecutionCancelled => ResultKind::ExecutionCancelled,
            ExecutionResult::EndOfCodeReached => ResultKind::EndOfCodeReached,
            ExecutionResult::Failed(error) => match error {
                EngineError::UnmatchedLoopEnd { .. } => ResultKind::UnmatchedLoopEnd,
                EngineError::UnclosedLoop { .. } => ResultKind::UnclosedLoop,
                EngineError::PointerNegative { .. } => ResultKind::PointerNegative,
                EngineError::PointerOutOfRange { .. } => ResultKind::PointerOutOfRange,
                EngineError::NoInputSource => ResultKind::NoInputSource,
                EngineError::NoOutputSink => ResultKind::NoOutputSink,
            },
        }
    }

    pub fn class(&self) -> ResultClass {
        match self {
            ExecutionResult::Failed(error) if error.is_structural() => ResultClass::Structural,
            ExecutionResult::Failed(_) => ResultClass::ResourceAccess,
            _ => ResultClass::Control,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExecutionResult::Failed(_))
    }

    pub fn error(&self) -> Option<EngineError> {
        match self {
            ExecutionResult::Failed(error) => Some(*error),
            _ => None,
        }
    }

    /// Split into control outcomes and failures
    pub fn into_result(self) -> Result<ExecutionResult, EngineError> {
        match self {
            ExecutionResult::Failed(error) => Err(error),
            other => Ok(other),
        }
    }
}

impl From<EngineError> for ExecutionResult {
    fn from(error: EngineError) -> Self {
        ExecutionResult::Failed(error)
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionResult::Successful => write!(f, "successful"),
            ExecutionResult::BreakpointHit => write!(f, "breakpoint hit"),
            ExecutionResult::ExecutionCancelled => write!(f, "execution cancelled"),
            ExecutionResult::EndOfCodeReached => write!(f, "end of code reached"),
            ExecutionResult::Failed(error) => write!(f, "{}", error),
        }
    }
}
