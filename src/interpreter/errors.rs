//! Engine error types
//!
//! [`EngineError`] covers every failure the engine can report. Failures fall in two
//! classes:
//!
//! - structural (`UnmatchedLoopEnd`, `UnclosedLoop`): found while building the loop
//!   index, before any instruction runs
//! - resource-access (`PointerNegative`, `PointerOutOfRange`, `NoInputSource`,
//!   `NoOutputSink`): found lazily, at the instruction that attempts the access
//!
//! All errors are terminal for the current run or step. Tape cells already written
//! by earlier instructions are not rolled back.

use thiserror::Error;

/// Failures raised by loop indexing, the tape, and the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// `]` with no pending `[` before it
    #[error("unmatched loop end at position {position}")]
    UnmatchedLoopEnd { position: usize },

    /// `[` still open at the end of the source
    #[error("unclosed loop starting at position {position}")]
    UnclosedLoop { position: usize },

    /// Tape access while the cursor is below zero
    #[error("pointer is negative ({cursor})")]
    PointerNegative { cursor: isize },

    /// Tape access while the cursor is past the last cell
    #[error("pointer {cursor} is outside the tape of {len} cells")]
    PointerOutOfRange { cursor: isize, len: usize },

    /// `,` executed with no input source attached
    #[error("no input source attached")]
    NoInputSource,

    /// `.` executed with no output sink attached
    #[error("no output sink attached")]
    NoOutputSink,
}

impl EngineError {
    /// Whether the error comes from bracket validation rather than execution
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            EngineError::UnmatchedLoopEnd { .. } | EngineError::UnclosedLoop { .. }
        )
    }

    /// Source position for structural errors
    pub fn position(&self) -> Option<usize> {
        match self {
            EngineError::UnmatchedLoopEnd { position } => Some(*position),
            EngineError::UnclosedLoop { position } => Some(*position),
            EngineError::PointerNegative { .. }
            | EngineError::PointerOutOfRange { .. }
            | EngineError::NoInputSource
            | EngineError::NoOutputSink => None,
        }
    }
}
