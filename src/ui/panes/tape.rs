//! Tape pane rendering
//!
//! Lists a window of cells with their index, value and printable character. The
//! window follows the cursor unless the user has scrolled it away.

use crate::io::cell_to_char;
use crate::memory::{Cell, Tape};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Window position for the tape pane
#[derive(Debug)]
pub struct TapeScrollState {
    /// First cell shown
    pub offset: usize,
    /// Re-center on the cursor every render
    pub follow_cursor: bool,
}

impl Default for TapeScrollState {
    fn default() -> Self {
        TapeScrollState {
            offset: 0,
            follow_cursor: true,
        }
    }
}

/// Printable form of a cell for the char column
fn display_char(value: Cell) -> String {
    match cell_to_char(value) {
        Some(c) if c.is_control() => format!("\\x{:02x}", c as u32),
        Some(c) => format!("'{}'", c),
        None => "·".to_string(),
    }
}

/// First cell of a window of `height` cells that keeps `cursor` roughly centered
fn window_start(cursor: isize, height: usize, len: usize) -> usize {
    let cursor = cursor.clamp(0, len.saturating_sub(1) as isize) as usize;
    let start = cursor.saturating_sub(height / 2);
    start.min(len.saturating_sub(height))
}

/// Render the tape pane
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    tape: &Tape,
    is_focused: bool,
    scroll_state: &mut TapeScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let cursor = tape.cursor();
    let title = format!(" Tape ({} cells, cursor {}) ", tape.len(), cursor);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if tape.is_empty() {
        let paragraph = Paragraph::new("(empty tape)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut lines = Vec::new();
    let mut visible_height = area.height.saturating_sub(2).max(1) as usize;

    // The cursor may legally sit outside the tape until the next access
    let outside = cursor < 0 || cursor >= tape.len() as isize;
    if outside {
        lines.push(Line::from(Span::styled(
            format!(" cursor {} is outside the tape", cursor),
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        )));
        visible_height = visible_height.saturating_sub(1).max(1);
    }

    if scroll_state.follow_cursor {
        scroll_state.offset = window_start(cursor, visible_height, tape.len());
    } else {
        scroll_state.offset = scroll_state
            .offset
            .min(tape.len().saturating_sub(visible_height));
    }

    let start = scroll_state.offset;
    let cells = tape.cells(start..start + visible_height);
    let index_width = tape.len().saturating_sub(1).to_string().len().max(3);

    for (i, &value) in cells.iter().enumerate() {
        let index = start + i;
        let is_cursor = cursor == index as isize;

        let marker = if is_cursor { "▶ " } else { "  " };
        let (index_style, value_style) = if is_cursor {
            (
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD),
                Style::default()
                    .bg(DEFAULT_THEME.current_line_bg)
                    .fg(DEFAULT_THEME.fg)
                    .add_modifier(Modifier::BOLD),
            )
        } else if value == 0 {
            (
                Style::default().fg(DEFAULT_THEME.comment),
                Style::default().fg(DEFAULT_THEME.comment),
            )
        } else {
            (
                Style::default().fg(DEFAULT_THEME.primary),
                Style::default().fg(DEFAULT_THEME.fg),
            )
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
            Span::styled(format!("{:>width$} ", index, width = index_width), index_style),
            Span::styled("│ ", Style::default().fg(DEFAULT_THEME.border_normal)),
            Span::styled(format!("{:>11} ", value), value_style),
            Span::styled(
                display_char(value),
                Style::default().fg(if value == 0 {
                    DEFAULT_THEME.comment
                } else {
                    DEFAULT_THEME.io
                }),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
