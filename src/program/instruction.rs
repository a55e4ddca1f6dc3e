//! The eight instruction characters

use std::fmt;

/// A recognized instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopBegin,
    /// `]`
    LoopEnd,
}

impl Instruction {
    /// Decode a source character; anything outside the alphabet is inert
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Instruction::Increment),
            '-' => Some(Instruction::Decrement),
            '>' => Some(Instruction::MoveRight),
            '<' => Some(Instruction::MoveLeft),
            '.' => Some(Instruction::Output),
            ',' => Some(Instruction::Input),
            '[' => Some(Instruction::LoopBegin),
            ']' => Some(Instruction::LoopEnd),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::MoveRight => '>',
            Instruction::MoveLeft => '<',
            Instruction::Output => '.',
            Instruction::Input => ',',
            Instruction::LoopBegin => '[',
            Instruction::LoopEnd => ']',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
