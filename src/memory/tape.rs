//! Memory tape with a lazily checked cursor

use super::Cell;
use crate::interpreter::errors::EngineError;
use std::ops::Range;

/// Fixed-length, zero-initialized cell array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Cell>,
    cursor: isize,
}

impl Tape {
    pub fn new(len: usize) -> Self {
        Tape {
            cells: vec![0; len],
            cursor: 0,
        }
    }

    /// Value of the cell under the cursor
    pub fn read(&self) -> Result<Cell, EngineError> {
        let index = self.checked_index()?;
        Ok(self.cells[index])
    }

    /// Overwrite the cell under the cursor
    pub fn write(&mut self, value: Cell) -> Result<(), EngineError> {
        let index = self.checked_index()?;
        self.cells[index] = value;
        Ok(())
    }

    /// Add `delta` to the cell under the cursor, wrapping on overflow
    pub fn add(&mut self, delta: Cell) -> Result<(), EngineError> {
        let index = self.checked_index()?;
        self.cells[index] = self.cells[index].wrapping_add(delta);
        Ok(())
    }

    /// Move the cursor; never fails, even when it leaves the tape
    pub fn move_by(&mut self, delta: isize) {
        self.cursor = self.cursor.wrapping_add(delta);
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at an absolute index, ignoring the cursor
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Cells in `range`, clamped to the tape
    pub fn cells(&self, range: Range<usize>) -> &[Cell] {
        let end = range.end.min(self.cells.len());
        let start = range.start.min(end);
        &self.cells[start..end]
    }

    /// Zero every cell and move the cursor home
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = 0);
        self.cursor = 0;
    }

    fn checked_index(&self) -> Result<usize, EngineError> {
        if self.cursor < 0 {
            return Err(EngineError::PointerNegative {
                cursor: self.cursor,
            });
        }
        let index = self.cursor as usize;
        if index >= self.cells.len() {
            return Err(EngineError::PointerOutOfRange {
                cursor: self.cursor,
                len: self.cells.len(),
            });
        }
        Ok(index)
    }
}
