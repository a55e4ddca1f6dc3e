//! Per-instruction semantics
//!
//! [`dispatch`] applies one instruction to the tape and reports where execution
//! continues. Jumps are returned as a [`Flow`] value; the caller owns the
//! instruction pointer.

use crate::interpreter::errors::EngineError;
use crate::io::{InputSource, OutputSink};
use crate::memory::Tape;
use crate::program::{Instruction, LoopIndex};

/// Where execution continues after an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Continue at the next position
    FallThrough,
    /// Continue exactly at this position
    Jump(usize),
}

impl Flow {
    /// Instruction pointer after executing the instruction at `position`
    pub fn next(self, position: usize) -> usize {
        match self {
            Flow::FallThrough => position + 1,
            Flow::Jump(target) => target,
        }
    }
}

/// The optional input and output attached to an engine
#[derive(Default)]
pub struct Channels {
    pub input: Option<Box<dyn InputSource>>,
    pub output: Option<Box<dyn OutputSink>>,
}

/// Execute `instruction`, located at `position`
pub fn dispatch(
    instruction: Instruction,
    position: usize,
    tape: &mut Tape,
    loops: &LoopIndex,
    channels: &mut Channels,
) -> Result<Flow, EngineError> {
    match instruction {
        Instruction::Increment => tape.add(1)?,
        Instruction::Decrement => tape.add(-1)?,
        Instruction::MoveRight => tape.move_by(1),
        Instruction::MoveLeft => tape.move_by(-1),
        Instruction::Output => {
            let output = channels.output.as_mut().ok_or(EngineError::NoOutputSink)?;
            output.write(tape.read()?);
        }
        Instruction::Input => {
            let input = channels.input.as_mut().ok_or(EngineError::NoInputSource)?;
            tape.write(input.read())?;
        }
        Instruction::LoopBegin => {
            if tape.read()? == 0 {
                let end = loops
                    .end_of(position)
                    .ok_or(EngineError::UnclosedLoop { position })?;
                return Ok(Flow::Jump(end + 1));
            }
        }
        Instruction::LoopEnd => {
            if tape.read()? != 0 {
                let begin = loops
                    .begin_of(position)
                    .ok_or(EngineError::UnmatchedLoopEnd { position })?;
                return Ok(Flow::Jump(begin));
            }
        }
    }

    Ok(Flow::FallThrough)
}
