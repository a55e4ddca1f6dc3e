//! Input and output channels
//!
//! The engine pulls one value per `,` from an [`InputSource`] and pushes one value
//! per `.` into an [`OutputSink`]. Both are supplied by the caller and both are
//! optional; a missing channel only fails when the matching instruction runs.
//!
//! Closures work directly:
//! ```
//! use brainstep::io::{InputSource, OutputSink};
//!
//! let mut input = || -> i32 { 65 };
//! assert_eq!(input.read(), 65);
//!
//! let mut seen = Vec::new();
//! let mut output = |v: i32| seen.push(v);
//! output.write(7);
//! ```
//!
//! Ready-made adapters:
//! - [`input::TextInput`]: one Unicode scalar value per read
//! - [`input::BinaryInput`]: one byte per read
//! - [`output::CapturedOutput`]: shared buffer, read back after or during a run
//! - [`output::WriterOutput`]: writes each value as a character

pub mod input;
pub mod output;

pub use input::{BinaryInput, TextInput};
pub use output::{CapturedOutput, WriterOutput};

use crate::memory::Cell;

/// Value returned by an input source once it has nothing left
pub const END_OF_INPUT: Cell = 0;

/// Pull-based provider for `,`
pub trait InputSource: Send {
    /// Next value, or [`END_OF_INPUT`] when exhausted
    fn read(&mut self) -> Cell;
}

/// Push-based consumer for `.`
pub trait OutputSink: Send {
    fn write(&mut self, value: Cell);
}

impl<F> InputSource for F
where
    F: FnMut() -> Cell + Send,
{
    fn read(&mut self) -> Cell {
        self()
    }
}

impl<F> OutputSink for F
where
    F: FnMut(Cell) + Send,
{
    fn write(&mut self, value: Cell) {
        self(value)
    }
}

/// Render a cell value as a character, if it is a valid scalar value
pub fn cell_to_char(value: Cell) -> Option<char> {
    u32::try_from(value).ok().and_then(char::from_u32)
}
