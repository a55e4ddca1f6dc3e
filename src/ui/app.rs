//! Main TUI application state and logic

use crate::interpreter::{Engine, EngineState, ExecutionResult};
use crate::io::CapturedOutput;
use crate::ui::panes::{
    render_output_pane, render_source_pane, render_status_bar, render_tape_pane,
    SourceRenderData, SourceScrollState, StatusRenderData, TapeScrollState,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Steps executed per frame while continuing, so the UI stays responsive
const CONTINUE_BATCH: usize = 10_000;

/// Delay between steps in play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(250);

/// Cells moved by PgUp / PgDn in the tape pane
const TAPE_PAGE: usize = 16;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tape,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> output -> tape)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tape,
            FocusedPane::Output => FocusedPane::Source,
            FocusedPane::Tape => FocusedPane::Output,
        }
    }
}

/// How the app drives the engine between key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Only explicit step keys execute
    Paused,
    /// One step per [`PLAY_INTERVAL`]
    Playing,
    /// Batches of steps until a breakpoint, the end, or an error
    Continuing,
    /// Like `Continuing` but breakpoints are stepped over
    RunningToEnd,
}

/// The main application state
pub struct App {
    pub engine: Engine,

    /// Sink the engine writes into; shared with the engine
    pub output: CapturedOutput,

    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub tape_scroll: TapeScrollState,
    pub output_scroll: usize,

    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    pub mode: RunMode,

    /// Instructions executed since start or the last reset
    pub steps: u64,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// `output` must be the sink attached to `engine`
    pub fn new(engine: Engine, output: CapturedOutput) -> Self {
        App {
            engine,
            output,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            tape_scroll: TapeScrollState::default(),
            output_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            mode: RunMode::Paused,
            steps: 0,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.tick();

            // Poll with a timeout so play and continue modes keep moving
            if event::poll(Duration::from_millis(30))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Advance the engine according to the current run mode
    pub fn tick(&mut self) {
        match self.mode {
            RunMode::Paused => {}
            RunMode::Playing => {
                if self.last_play_time.elapsed() >= PLAY_INTERVAL {
                    if self.advance() != ExecutionResult::Successful {
                        self.mode = RunMode::Paused;
                    }
                    self.last_play_time = Instant::now();
                }
            }
            RunMode::Continuing | RunMode::RunningToEnd => {
                for _ in 0..CONTINUE_BATCH {
                    match self.advance() {
                        ExecutionResult::Successful => {}
                        ExecutionResult::BreakpointHit if self.mode == RunMode::RunningToEnd => {}
                        _ => {
                            self.mode = RunMode::Paused;
                            break;
                        }
                    }
                }
                if self.mode != RunMode::Paused {
                    self.status_message = format!("Running... ({} steps)", self.steps);
                }
            }
        }
    }

    /// Execute one step and describe the outcome in the status line
    fn advance(&mut self) -> ExecutionResult {
        let next = self.engine.current_instruction();
        let result = self.engine.step();

        self.status_message = match result {
            ExecutionResult::Successful => {
                self.steps += 1;
                match next {
                    Some((position, instruction)) => {
                        format!("Executed '{}' at {}", instruction, position)
                    }
                    None => "Stepped".to_string(),
                }
            }
            ExecutionResult::BreakpointHit => format!(
                "Breakpoint at {}",
                self.engine.instruction_pointer().saturating_sub(1)
            ),
            ExecutionResult::EndOfCodeReached => {
                format!("End of program after {} steps", self.steps)
            }
            ExecutionResult::Failed(e) => format!("Error: {}", e),
            other => other.to_string(),
        };

        self.output_scroll = usize::MAX;
        result
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let state = self.engine.state();
        let is_error = matches!(state, EngineState::Finished(r) if r.is_error());
        // A failed instruction leaves the pointer on itself
        let current = if is_error {
            Some(self.engine.instruction_pointer())
        } else {
            self.engine.next_stop()
        };

        let source_data = SourceRenderData {
            chars: self.engine.program().chars(),
            current,
            breakpoint_marker: self.engine.config().breakpoint_marker,
            is_error,
        };
        render_source_pane(
            frame,
            left_rows[0],
            &source_data,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_output_pane(
            frame,
            left_rows[1],
            &self.output,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        render_tape_pane(
            frame,
            columns[1],
            self.engine.tape(),
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                steps: self.steps,
                state,
                at_end: self.at_end(),
                mode: self.mode,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.mode = RunMode::Paused;
                let n = c.to_digit(10).unwrap_or(1);
                for _ in 0..n {
                    if self.advance() != ExecutionResult::Successful {
                        break;
                    }
                }
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Right | KeyCode::Char('s') => {
                self.mode = RunMode::Paused;
                self.advance();
            }
            KeyCode::Char('c') => {
                self.start(RunMode::Continuing);
            }
            KeyCode::Enter => {
                self.start(RunMode::RunningToEnd);
            }
            KeyCode::Esc | KeyCode::Char('p') => {
                if self.mode != RunMode::Paused {
                    self.mode = RunMode::Paused;
                    self.status_message = "Paused".to_string();
                }
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    if self.mode == RunMode::Playing {
                        self.mode = RunMode::Paused;
                        self.status_message = "Paused".to_string();
                    } else {
                        self.start(RunMode::Playing);
                        self.last_play_time = Instant::now()
                            .checked_sub(PLAY_INTERVAL)
                            .unwrap_or(Instant::now());
                    }
                }
            }
            KeyCode::Backspace => {
                self.reset();
            }
            KeyCode::Char('f') => {
                self.tape_scroll.follow_cursor = true;
            }
            KeyCode::PageUp => self.scroll_tape(-(TAPE_PAGE as isize)),
            KeyCode::PageDown => self.scroll_tape(TAPE_PAGE as isize),
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tape => self.scroll_tape(-1),
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tape => self.scroll_tape(1),
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
            },
            _ => {}
        }
    }

    /// Nothing left to execute until a reset
    fn at_end(&self) -> bool {
        self.engine.is_finished() || self.engine.next_stop().is_none()
    }

    fn start(&mut self, mode: RunMode) {
        if self.at_end() {
            self.status_message = "Program has finished; press Backspace to reset".to_string();
            return;
        }
        self.mode = mode;
        self.status_message = match mode {
            RunMode::Playing => "Playing...".to_string(),
            _ => "Running...".to_string(),
        };
    }

    /// Detach the tape window from the cursor and move it by `delta` cells
    fn scroll_tape(&mut self, delta: isize) {
        self.tape_scroll.follow_cursor = false;
        self.tape_scroll.offset = self.tape_scroll.offset.saturating_add_signed(delta);
    }

    /// Rewind the engine and clear the output; consumed input stays consumed
    fn reset(&mut self) {
        self.mode = RunMode::Paused;
        self.engine.reset();
        self.output.clear();
        self.steps = 0;
        self.output_scroll = 0;
        self.tape_scroll.follow_cursor = true;
        self.status_message = "Reset to start".to_string();
    }
}
