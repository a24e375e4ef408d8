use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use tui_textarea::TextArea;
use voiceforge_core::{Route, WorkflowState};

use super::state::{Field, TuiState};
use super::widgets::{landing, popup, status_bar, workflow_panel};

pub fn draw_ui(frame: &mut Frame, state: &TuiState, workflow: &WorkflowState, textarea: &TextArea) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Current view
            Constraint::Length(1), // Gap
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    match state.route {
        Route::Landing => landing::render(frame, chunks[0], state),
        Route::Workflow => workflow_panel::render(frame, chunks[0], state, workflow),
    }
    status_bar::render(frame, chunks[2], state, workflow);

    if let Some(field) = state.editing {
        popup::render_editor(frame, chunks[0], editor_title(field), textarea);
    }

    if let Some(ref message) = state.alert {
        popup::render_alert(frame, chunks[0], message);
    }
}

fn editor_title(field: Field) -> &'static str {
    match field {
        Field::Sample => "Select MP4/MP3 File",
        Field::VoiceName => "Voice Clone Name",
        Field::Message => "Message to Convert",
        _ => "",
    }
}
