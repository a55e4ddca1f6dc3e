//! Engine configuration and defaults

/// Number of tape cells when the caller does not choose one
pub const DEFAULT_MEMORY_SIZE: usize = 30_000;

/// Character that halts single-step execution
/// Inert in `run` and `run_async`
pub const DEFAULT_BREAKPOINT_MARKER: char = '#';

/// Settings fixed at engine construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Length of the memory tape in cells
    pub memory_size: usize,

    /// Breakpoint marker recognized by `step`, `None` disables breakpoints
    pub breakpoint_marker: Option<char>,
}

impl EngineConfig {
    pub fn new() -> Self {
        EngineConfig {
            memory_size: DEFAULT_MEMORY_SIZE,
            breakpoint_marker: Some(DEFAULT_BREAKPOINT_MARKER),
        }
    }

    pub fn with_memory_size(mut self, memory_size: usize) -> Self {
        self.memory_size = memory_size;
        self
    }

    pub fn with_breakpoint_marker(mut self, marker: Option<char>) -> Self {
        self.breakpoint_marker = marker;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
