// Execution engine for the tape machine

use crate::config::EngineConfig;
use crate::interpreter::dispatch::{dispatch, Channels};
use crate::interpreter::errors::EngineError;
use crate::interpreter::result::ExecutionResult;
use crate::interpreter::CancelToken;
use crate::io::{InputSource, OutputSink};
use crate::memory::{Cell, Tape};
use crate::program::{Instruction, Program};
use std::fmt;
use std::ops::Range;
use tracing::{debug, trace};

/// Lifecycle of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Validated, nothing executed yet
    Ready,
    /// Started; more instructions may follow
    Running,
    /// Debug stepping stopped at a breakpoint marker
    Suspended,
    /// Terminal; `run` keeps returning this result until `reset`
    Finished(ExecutionResult),
}

/// Interpreter for one program over one tape
///
/// The same state backs the three execution modes:
/// - [`Engine::run`]: blocking, to completion
/// - [`Engine::run_async`]: on a worker thread, cancellable
/// - [`Engine::step`]: one instruction at a time, honoring breakpoints
pub struct Engine {
    /// Source text and its loop index
    program: Program,

    /// Memory cells and the cursor
    tape: Tape,

    /// Caller-supplied input and output
    channels: Channels,

    config: EngineConfig,

    /// Position in the source of the next instruction to consider
    instruction_pointer: usize,

    state: EngineState,
}

impl Engine {
    /// Validate `source` and build an engine over a zeroed tape of `memory_size` cells
    ///
    /// Fails with `UnmatchedLoopEnd` or `UnclosedLoop` before anything executes.
    pub fn new(
        memory_size: usize,
        input: Option<Box<dyn InputSource>>,
        output: Option<Box<dyn OutputSink>>,
        source: &str,
    ) -> Result<Self, EngineError> {
        let config = EngineConfig::default().with_memory_size(memory_size);
        Self::with_config(config, input, output, source)
    }

    pub fn with_config(
        config: EngineConfig,
        input: Option<Box<dyn InputSource>>,
        output: Option<Box<dyn OutputSink>>,
        source: &str,
    ) -> Result<Self, EngineError> {
        let program = Program::parse(source)?;

        debug!(
            chars = program.len(),
            instructions = program.instruction_count(),
            loops = program.loops().len(),
            cells = config.memory_size,
            "engine constructed"
        );

        Ok(Engine {
            program,
            tape: Tape::new(config.memory_size),
            channels: Channels { input, output },
            config,
            instruction_pointer: 0,
            state: EngineState::Ready,
        })
    }

    pub fn builder(source: impl Into<String>) -> EngineBuilder {
        EngineBuilder::new(source)
    }

    /// Execute until the end of the program or the first failing instruction
    ///
    /// Breakpoint markers are inert here. A finished engine returns its stored
    /// result without executing anything.
    pub fn run(&mut self) -> ExecutionResult {
        self.run_until_cancelled(None)
    }

    /// The instruction loop shared by `run` and `run_async`
    pub(crate) fn run_until_cancelled(&mut self, cancel: Option<&CancelToken>) -> ExecutionResult {
        if let EngineState::Finished(result) = self.state {
            return result;
        }
        self.state = EngineState::Running;

        let result = loop {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                break ExecutionResult::ExecutionCancelled;
            }

            let position = self.instruction_pointer;
            let Some(c) = self.program.char_at(position) else {
                break ExecutionResult::Successful;
            };

            match Instruction::from_char(c) {
                Some(instruction) => match self.execute(instruction, position) {
                    Ok(next) => self.instruction_pointer = next,
                    Err(e) => break e.into(),
                },
                None => self.instruction_pointer += 1,
            }
        };

        self.finish(result)
    }

    /// Execute one instruction in debug mode
    ///
    /// Scans forward from the instruction pointer to the next instruction or
    /// breakpoint marker:
    /// - nothing left: `EndOfCodeReached`; pointer, tape and state unchanged
    /// - a marker: the pointer moves just past it and `BreakpointHit` is returned
    ///   without executing anything
    /// - an instruction: it is executed and `Successful` (or its error) returned
    ///
    /// `Successful` always means one instruction ran. An engine that already ran to
    /// completion answers `EndOfCodeReached`; one stopped by an error or a
    /// cancellation keeps returning that result.
    pub fn step(&mut self) -> ExecutionResult {
        match self.state {
            EngineState::Finished(ExecutionResult::Successful) => {
                return ExecutionResult::EndOfCodeReached;
            }
            EngineState::Finished(result) => return result,
            _ => {}
        }

        let Some(position) = self.next_stop() else {
            trace!(position = self.instruction_pointer, "end of code reached");
            return ExecutionResult::EndOfCodeReached;
        };

        let Some(instruction) = self.program.instruction_at(position) else {
            // Only a breakpoint marker stops the scan without being an instruction
            trace!(position, "breakpoint hit");
            self.instruction_pointer = position + 1;
            self.state = EngineState::Suspended;
            return ExecutionResult::BreakpointHit;
        };

        trace!(position, %instruction, cursor = self.tape.cursor(), "step");
        match self.execute(instruction, position) {
            Ok(next) => {
                self.instruction_pointer = next;
                self.state = EngineState::Running;
                ExecutionResult::Successful
            }
            Err(e) => self.finish(e.into()),
        }
    }

    /// Keep stepping until something other than `Successful` comes back
    pub fn resume(&mut self) -> ExecutionResult {
        loop {
            let result = self.step();
            if result != ExecutionResult::Successful {
                return result;
            }
        }
    }

    /// Zero the tape and rewind to the first position
    ///
    /// Input and output channels are kept as they are; an input source that has
    /// been read from does not rewind.
    pub fn reset(&mut self) {
        self.tape.clear();
        self.instruction_pointer = 0;
        self.state = EngineState::Ready;
        debug!("engine reset");
    }

    fn execute(&mut self, instruction: Instruction, position: usize) -> Result<usize, EngineError> {
        let flow = dispatch(
            instruction,
            position,
            &mut self.tape,
            self.program.loops(),
            &mut self.channels,
        )?;
        Ok(flow.next(position))
    }

    /// Position the next `step` stops at: an instruction or a breakpoint marker
    /// at or after the pointer
    pub fn next_stop(&self) -> Option<usize> {
        let marker = self.config.breakpoint_marker;
        self.program.chars()[self.instruction_pointer.min(self.program.len())..]
            .iter()
            .position(|&c| Instruction::from_char(c).is_some() || Some(c) == marker)
            .map(|offset| self.instruction_pointer + offset)
    }

    fn finish(&mut self, result: ExecutionResult) -> ExecutionResult {
        debug!(
            %result,
            instruction_pointer = self.instruction_pointer,
            cursor = self.tape.cursor(),
            "execution finished"
        );
        self.state = EngineState::Finished(result);
        result
    }

    pub fn instruction_pointer(&self) -> usize {
        self.instruction_pointer
    }

    /// Tape cursor; may be outside the tape
    pub fn cursor(&self) -> isize {
        self.tape.cursor()
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Tape cells in `range`, clamped to the tape
    pub fn cells(&self, range: Range<usize>) -> &[Cell] {
        self.tape.cells(range)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, EngineState::Finished(_))
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Instruction at `position` in the source; `None` for inert characters
    pub fn instruction_at(&self, position: usize) -> Option<Instruction> {
        self.program.instruction_at(position)
    }

    /// Instruction the next `step` would execute, skipping inert characters
    ///
    /// `None` when the next stop is a breakpoint marker or the end of the program.
    pub fn current_instruction(&self) -> Option<(usize, Instruction)> {
        let position = self.next_stop()?;
        self.program
            .instruction_at(position)
            .map(|instruction| (position, instruction))
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("program_len", &self.program.len())
            .field("memory_size", &self.tape.len())
            .field("instruction_pointer", &self.instruction_pointer)
            .field("cursor", &self.tape.cursor())
            .field("state", &self.state)
            .field("has_input", &self.channels.input.is_some())
            .field("has_output", &self.channels.output.is_some())
            .finish()
    }
}

/// Step-by-step construction of an [`Engine`]
pub struct EngineBuilder {
    source: String,
    config: EngineConfig,
    input: Option<Box<dyn InputSource>>,
    output: Option<Box<dyn OutputSink>>,
}

impl EngineBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        EngineBuilder {
            source: source.into(),
            config: EngineConfig::default(),
            input: None,
            output: None,
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn memory_size(mut self, memory_size: usize) -> Self {
        self.config.memory_size = memory_size;
        self
    }

    pub fn breakpoint_marker(mut self, marker: Option<char>) -> Self {
        self.config.breakpoint_marker = marker;
        self
    }

    pub fn input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    pub fn output(mut self, output: impl OutputSink + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    pub fn build(self) -> Result<Engine, EngineError> {
        Engine::with_config(self.config, self.input, self.output, &self.source)
    }
}
