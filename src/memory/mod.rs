//! Memory model for the interpreter
//!
//! This module provides the memory tape:
//! - [`tape`]: fixed-length array of [`Cell`]s with a single cursor
//!
//! # Bounds Checking
//!
//! The cursor may move anywhere, including below zero or past the last cell.
//! Nothing is checked until a cell is read or written:
//! ```text
//! <      cursor = -1   (ok)
//! +      add at -1     (PointerNegative)
//! ```
//!
//! # Arithmetic
//!
//! Cells are 32-bit signed integers and wrap on overflow.

pub mod tape;

pub use tape::Tape;

/// A single tape cell
pub type Cell = i32;
