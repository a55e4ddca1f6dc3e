//! Validated program text
//!
//! - [`instruction`]: the eight-character instruction alphabet
//! - [`loops`]: bracket validation and the [`LoopIndex`]
//!
//! A [`Program`] keeps every source character, instruction or not, so positions
//! stay stable for loop jumps and breakpoint addressing.

pub mod instruction;
pub mod loops;

pub use instruction::Instruction;
pub use loops::LoopIndex;

use crate::interpreter::errors::EngineError;

/// Source text paired with its loop index
#[derive(Debug, Clone)]
pub struct Program {
    source: Vec<char>,
    loops: LoopIndex,
}

impl Program {
    /// Validate brackets and build the loop index
    pub fn parse(source: &str) -> Result<Self, EngineError> {
        let source: Vec<char> = source.chars().collect();
        let loops = LoopIndex::build(&source)?;
        Ok(Program { source, loops })
    }

    /// Number of characters, including inert ones
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Character at `position`
    pub fn char_at(&self, position: usize) -> Option<char> {
        self.source.get(position).copied()
    }

    /// Instruction at `position`, `None` for inert characters and past the end
    pub fn instruction_at(&self, position: usize) -> Option<Instruction> {
        self.char_at(position).and_then(Instruction::from_char)
    }

    pub fn chars(&self) -> &[char] {
        &self.source
    }

    pub fn loops(&self) -> &LoopIndex {
        &self.loops
    }

    /// Number of instruction characters
    pub fn instruction_count(&self) -> usize {
        self.source
            .iter()
            .filter(|c| Instruction::from_char(**c).is_some())
            .count()
    }
}

/// Check bracket structure without building an engine
pub fn check(source: &str) -> Result<(), EngineError> {
    let source: Vec<char> = source.chars().collect();
    LoopIndex::build(&source).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_char_indices() {
        let program = Program::parse("é+[-]").unwrap();
        assert_eq!(program.len(), 5);
        assert_eq!(program.instruction_at(0), None);
        assert_eq!(program.instruction_at(1), Some(Instruction::Increment));
        assert_eq!(program.loops().end_of(2), Some(4));
        assert_eq!(program.instruction_count(), 4);
    }

    #[test]
    fn test_check() {
        assert!(check("+[->+<]").is_ok());
        assert_eq!(check("["), Err(EngineError::UnclosedLoop { position: 0 }));
        assert_eq!(check("]"), Err(EngineError::UnmatchedLoopEnd { position: 0 }));
    }
}
