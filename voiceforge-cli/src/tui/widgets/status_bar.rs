use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use voiceforge_core::{Route, WorkflowState};

use crate::tui::state::TuiState;
use crate::tui::widgets::SPINNER_CHARS;

pub fn render(frame: &mut Frame, area: Rect, state: &TuiState, workflow: &WorkflowState) {
    let status = if workflow.is_loading() {
        let spinner = SPINNER_CHARS[state.spinner_frame % SPINNER_CHARS.len()];
        format!("{spinner} Processing...")
    } else if let Some(ref message) = state.status_message {
        message.clone()
    } else {
        "Ready".to_string()
    };

    let sep = Span::styled(" | ", Style::default().fg(Color::DarkGray));

    let hints = match state.route {
        Route::Landing => "Enter get started  q quit",
        Route::Workflow if state.editing.is_some() => "Enter confirm  Esc cancel",
        Route::Workflow => "↑↓ move  ←→ change  Enter select  g generate  Esc back",
    };

    let parts: Vec<Span<'static>> = vec![
        Span::styled(" ", Style::default()),
        Span::styled(state.route.path(), Style::default().fg(Color::Yellow)),
        sep.clone(),
        Span::styled(
            workflow.service_origin.clone(),
            Style::default().fg(Color::Cyan),
        ),
        sep.clone(),
        Span::styled(hints, Style::default().fg(Color::White)),
        sep,
        Span::styled(status, Style::default().fg(Color::Green)),
    ];

    let bar = Paragraph::new(Line::from(parts))
        .style(Style::default().bg(Color::Rgb(30, 30, 30)));

    frame.render_widget(bar, area);
}
