//! Source code pane rendering
//!
//! Shows the program with line numbers, colors instruction characters by kind, and
//! marks the position the next step will stop at. Inert characters are dimmed.

use crate::program::Instruction;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to; `None` centers it on first render
    pub target_line_row: Option<usize>,
}

/// What the source pane needs to know about the engine
pub struct SourceRenderData<'a> {
    pub chars: &'a [char],
    /// Position the next step will stop at, if any
    pub current: Option<usize>,
    pub breakpoint_marker: Option<char>,
    pub is_error: bool,
}

fn char_style(c: char, breakpoint_marker: Option<char>) -> Style {
    if Some(c) == breakpoint_marker {
        return Style::default()
            .fg(DEFAULT_THEME.breakpoint)
            .add_modifier(Modifier::BOLD);
    }
    match Instruction::from_char(c) {
        Some(Instruction::Increment | Instruction::Decrement) => {
            Style::default().fg(DEFAULT_THEME.cell_arith)
        }
        Some(Instruction::MoveLeft | Instruction::MoveRight) => {
            Style::default().fg(DEFAULT_THEME.cell_move)
        }
        Some(Instruction::Input | Instruction::Output) => Style::default().fg(DEFAULT_THEME.io),
        Some(Instruction::LoopBegin | Instruction::LoopEnd) => Style::default()
            .fg(DEFAULT_THEME.loop_bracket)
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(DEFAULT_THEME.comment),
    }
}

/// Split the program into lines of `(position, char)`, dropping the newlines
fn split_lines(chars: &[char]) -> Vec<Vec<(usize, char)>> {
    let mut lines = vec![Vec::new()];
    for (position, &c) in chars.iter().enumerate() {
        if c == '\n' {
            lines.push(Vec::new());
        } else if let Some(line) = lines.last_mut() {
            line.push((position, c));
        }
    }
    lines
}

/// 0-based line holding `position`
fn line_of(chars: &[char], position: usize) -> usize {
    chars[..position.min(chars.len())]
        .iter()
        .filter(|&&c| c == '\n')
        .count()
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: &SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = split_lines(data.chars);
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Initialize target_line_row to center if not set
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    let current_line = data.current.map(|p| line_of(data.chars, p));

    // Keep the current line at the target visual row
    if let Some(line) = current_line {
        scroll_state.offset = line.saturating_sub(target_row);
    }
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let is_current = current_line == Some(idx);
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:4} ", idx + 1), num_style)];
            for &(position, c) in line {
                let mut style = char_style(c, data.breakpoint_marker);
                if is_current {
                    style = style.bg(DEFAULT_THEME.current_line_bg);
                }
                if data.current == Some(position) {
                    style = if data.is_error {
                        Style::default()
                            .bg(DEFAULT_THEME.error)
                            .fg(ratatui::style::Color::White)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
                    };
                }
                spans.push(Span::styled(c.to_string(), style));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
