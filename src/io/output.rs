//! Output adapters

use super::{cell_to_char, OutputSink};
use crate::memory::Cell;
use std::io::{self, LineWriter, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

/// Output buffer shared between the engine and its caller
///
/// Cloning yields another handle to the same buffer, so one clone can be handed to
/// the engine (even one running on another thread) while the other reads it back.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    values: Arc<Mutex<Vec<Cell>>>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every value written so far, in order
    pub fn values(&self) -> Vec<Cell> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Written values as text; values that are not scalar values become `U+FFFD`
    pub fn text(&self) -> String {
        self.lock()
            .iter()
            .map(|&v| cell_to_char(v).unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    /// Text split into lines, without a trailing empty line
    pub fn lines(&self) -> Vec<String> {
        let text = self.text();
        let mut result: Vec<String> = text.split('\n').map(|s| s.to_string()).collect();
        // Remove trailing empty string if text ended with newline
        if result.last().is_some_and(|s| s.is_empty()) {
            result.pop();
        }
        result
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Cell>> {
        // A panic while holding the lock cannot leave a Vec<Cell> half-written
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl OutputSink for CapturedOutput {
    fn write(&mut self, value: Cell) {
        self.lock().push(value);
    }
}

/// Writes each value to an [`io::Write`] as a UTF-8 encoded character
///
/// Output is line buffered: the writer is flushed at every `'\n'` and when the sink
/// is dropped. The sink interface cannot fail, so write errors are logged and
/// remembered; the first one is available through [`WriterOutput::error`].
pub struct WriterOutput<W: Write + Send> {
    writer: LineWriter<W>,
    error: Option<io::Error>,
}

impl<W: Write + Send> WriterOutput<W> {
    pub fn new(writer: W) -> Self {
        WriterOutput {
            writer: LineWriter::new(writer),
            error: None,
        }
    }

    /// First write error, if any
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// The underlying writer, without whatever is still buffered
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Flush the pending partial line and return the writer
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }

    fn emit(&mut self, value: Cell) -> io::Result<()> {
        let c = cell_to_char(value).unwrap_or(char::REPLACEMENT_CHARACTER);
        let mut buf = [0u8; 4];
        self.writer.write_all(c.encode_utf8(&mut buf).as_bytes())
    }
}

impl<W: Write + Send> OutputSink for WriterOutput<W> {
    fn write(&mut self, value: Cell) {
        if let Err(e) = self.emit(value) {
            warn!(value, error = %e, "output write failed");
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }
}
