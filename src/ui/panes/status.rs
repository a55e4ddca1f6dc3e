//! Status bar rendering with keybindings and state indicators

use crate::interpreter::{EngineState, ExecutionResult};
use crate::ui::app::RunMode;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What the status bar shows
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub steps: u64,
    pub state: EngineState,
    /// No instruction or marker left before the end of the program
    pub at_end: bool,
    pub mode: RunMode,
}

/// Badge text and color for the run mode, falling back to the engine state
fn badge(mode: RunMode, state: EngineState, at_end: bool) -> (&'static str, Color) {
    match mode {
        RunMode::Playing => (" ▶ PLAYING ", DEFAULT_THEME.secondary),
        RunMode::Continuing => (" ▶▶ RUNNING ", DEFAULT_THEME.secondary),
        RunMode::RunningToEnd => (" ▶▶ TO END ", DEFAULT_THEME.secondary),
        RunMode::Paused => state_badge(state, at_end),
    }
}

/// Badge text and color for the engine state
fn state_badge(state: EngineState, at_end: bool) -> (&'static str, Color) {
    match state {
        EngineState::Finished(result) if result.is_error() => (" ERROR ", DEFAULT_THEME.error),
        EngineState::Finished(ExecutionResult::ExecutionCancelled) => {
            (" CANCELLED ", DEFAULT_THEME.secondary)
        }
        EngineState::Finished(_) => (" END ", DEFAULT_THEME.success),
        _ if at_end => (" END ", DEFAULT_THEME.success),
        EngineState::Ready => (" START ", DEFAULT_THEME.success),
        EngineState::Running => (" PAUSED ", DEFAULT_THEME.primary),
        EngineState::Suspended => (" BREAK ", DEFAULT_THEME.breakpoint),
    }
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let is_error = matches!(data.state, EngineState::Finished(r) if r.is_error());

    let left_spans = vec![
        Span::styled(
            format!(" Step {} ", data.steps),
            Style::default()
                .bg(if is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = vec![
        Span::styled(" → ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" c ", key_style),
        Span::styled(" continue ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⎵ ", key_style),
        Span::styled(" play ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⌫ ", key_style),
        Span::styled(" reset ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
        Span::styled("│", sep_style),
    ];

    let (badge_text, badge_color) = badge(data.mode, data.state, data.at_end);
    right_spans.push(Span::styled(
        badge_text,
        Style::default()
            .bg(badge_color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    ));

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
