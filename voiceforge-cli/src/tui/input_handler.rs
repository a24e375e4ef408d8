use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::TextArea;
use voiceforge_core::options::cycle_variant;
use voiceforge_core::workflow::Action;
use voiceforge_core::{OptionChange, Route, WorkflowState};

use super::state::{Field, TuiState};

#[derive(Debug, PartialEq)]
pub enum TuiAction {
    /// Switch to another view.
    Navigate(Route),
    /// Hand an action to the workflow session.
    Dispatch(Action),
    /// Path typed into the file picker.
    PickSample(String),
    /// Play the sample preview, or the downloaded result.
    Play,
    /// Quit the application.
    Quit,
    /// No action needed.
    None,
}

pub fn handle_key_event(
    key: KeyEvent,
    textarea: &mut TextArea,
    state: &mut TuiState,
    workflow: &WorkflowState,
) -> TuiAction {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) | (KeyCode::Char('d'), m) if m.contains(KeyModifiers::CONTROL) => {
            return TuiAction::Quit;
        }
        _ => {}
    }

    // Alerts block everything until dismissed.
    if state.alert.is_some() {
        state.alert = None;
        return TuiAction::None;
    }

    if let Some(field) = state.editing {
        return handle_editor_key(key, field, textarea, state);
    }

    match state.route {
        Route::Landing => handle_landing_key(key),
        Route::Workflow => handle_workflow_key(key, textarea, state, workflow),
    }
}

fn handle_landing_key(key: KeyEvent) -> TuiAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('g') => TuiAction::Navigate(Route::Workflow),
        KeyCode::Esc | KeyCode::Char('q') => TuiAction::Quit,
        _ => TuiAction::None,
    }
}

fn handle_workflow_key(
    key: KeyEvent,
    textarea: &mut TextArea,
    state: &mut TuiState,
    workflow: &WorkflowState,
) -> TuiAction {
    match key.code {
        KeyCode::Esc => TuiAction::Navigate(Route::Landing),
        KeyCode::Char('q') => TuiAction::Quit,

        KeyCode::Down | KeyCode::Tab => {
            state.focus = state.focus.next();
            TuiAction::None
        }
        KeyCode::Up | KeyCode::BackTab => {
            state.focus = state.focus.previous();
            TuiAction::None
        }

        KeyCode::Left => cycle_focused(state, workflow, false),
        KeyCode::Right => cycle_focused(state, workflow, true),

        KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x')
            if state.focus == Field::Sample =>
        {
            TuiAction::Dispatch(Action::ClearSample)
        }

        KeyCode::Char('p') => TuiAction::Play,
        KeyCode::Char('d') => TuiAction::Dispatch(Action::Download),
        KeyCode::Char('g') => TuiAction::Dispatch(Action::Submit),

        KeyCode::Enter => activate_focused(textarea, state, workflow),

        _ => TuiAction::None,
    }
}

fn cycle_focused(state: &mut TuiState, workflow: &WorkflowState, forward: bool) -> TuiAction {
    let options = workflow.options;
    let change = match state.focus {
        Field::Phrases => {
            state.cycle_phrase(forward);
            return TuiAction::None;
        }
        Field::OutputFormat => {
            OptionChange::OutputFormat(cycle_variant(options.output_format, forward))
        }
        Field::Emotion => OptionChange::Emotion(cycle_variant(options.emotion, forward)),
        Field::Language => OptionChange::Language(cycle_variant(options.language, forward)),
        _ => return TuiAction::None,
    };
    TuiAction::Dispatch(Action::SetOption(change))
}

fn activate_focused(
    textarea: &mut TextArea,
    state: &mut TuiState,
    workflow: &WorkflowState,
) -> TuiAction {
    let field = state.focus;
    if field.is_text() {
        if workflow.is_loading() {
            return TuiAction::None;
        }
        let initial = match field {
            Field::VoiceName => workflow.voice_name.clone(),
            Field::Message => workflow.message.clone(),
            _ => String::new(),
        };
        open_editor(textarea, field, &initial);
        state.editing = Some(field);
        return TuiAction::None;
    }

    match field {
        Field::Phrases => TuiAction::Dispatch(Action::UseSamplePhrase(state.phrase_index)),
        Field::Generate if workflow.output.audio_url().is_some() => {
            TuiAction::Dispatch(Action::Download)
        }
        Field::Generate => TuiAction::Dispatch(Action::Submit),
        _ => TuiAction::None,
    }
}

fn handle_editor_key(
    key: KeyEvent,
    field: Field,
    textarea: &mut TextArea,
    state: &mut TuiState,
) -> TuiAction {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, KeyModifiers::NONE) => {
            let text = textarea.lines().join("\n");
            state.editing = None;
            reset_textarea(textarea);
            match field {
                Field::Sample => {
                    let path = text.trim();
                    if path.is_empty() {
                        TuiAction::None
                    } else {
                        TuiAction::PickSample(path.to_string())
                    }
                }
                Field::VoiceName => TuiAction::Dispatch(Action::SetVoiceName(text)),
                Field::Message => TuiAction::Dispatch(Action::SetMessage(text)),
                _ => TuiAction::None,
            }
        }

        // Shift+Enter or Alt+Enter: insert newline in the message
        (KeyCode::Enter, m)
            if field == Field::Message
                && (m.contains(KeyModifiers::SHIFT) || m.contains(KeyModifiers::ALT)) =>
        {
            textarea.insert_newline();
            TuiAction::None
        }

        (KeyCode::Esc, _) => {
            state.editing = None;
            reset_textarea(textarea);
            TuiAction::None
        }

        _ => {
            textarea.input(key);
            TuiAction::None
        }
    }
}

fn open_editor(textarea: &mut TextArea, field: Field, initial: &str) {
    *textarea = TextArea::new(initial.lines().map(str::to_string).collect());
    configure_textarea(textarea, placeholder_for(field));
    textarea.move_cursor(tui_textarea::CursorMove::Bottom);
    textarea.move_cursor(tui_textarea::CursorMove::End);
}

fn reset_textarea(textarea: &mut TextArea) {
    *textarea = TextArea::default();
}

fn placeholder_for(field: Field) -> &'static str {
    match field {
        Field::Sample => "Path to an MP3/MP4 audio file (Enter to select, Esc to cancel)",
        Field::VoiceName => "Voice clone name",
        Field::Message => "Message to convert (Shift+Enter for new line)",
        _ => "",
    }
}

pub fn configure_textarea(textarea: &mut TextArea, placeholder: &str) {
    textarea.set_placeholder_text(placeholder);
    textarea.set_cursor_line_style(ratatui::style::Style::default());
    textarea.set_style(ratatui::style::Style::default().fg(ratatui::style::Color::White));
}
