use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use voiceforge_core::workflow::{OutputState, SAMPLE_PHRASES};
use voiceforge_core::WorkflowState;

use crate::tui::state::{Field, TuiState};
use crate::tui::widgets::{ACCENT, SPINNER_CHARS};

pub fn render(frame: &mut Frame, area: Rect, state: &TuiState, workflow: &WorkflowState) {
    let mut lines: Vec<Line<'static>> = Vec::new();

    lines.push(Line::from(Span::styled(
        "VOICE CLONING LAB",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "Create Your Digital Voice Twin",
        Style::default().fg(ACCENT),
    )));
    lines.push(Line::from(Span::styled(
        "Upload a voice sample and transform any text into speech that sounds just like you",
        Style::default().fg(Color::Gray),
    )));

    render_upload_step(&mut lines, state, workflow);
    render_text_step(&mut lines, state, workflow);
    render_generate_step(&mut lines, state, workflow);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn step_header(lines: &mut Vec<Line<'static>>, step: u8, title: &str) {
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("STEP {step}  "),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]));
}

fn focus_marker(state: &TuiState, field: Field) -> Span<'static> {
    if state.focus == field {
        Span::styled("> ", Style::default().fg(ACCENT))
    } else {
        Span::raw("  ")
    }
}

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{text:<18}"), Style::default().fg(Color::DarkGray))
}

fn selector(state: &TuiState, field: Field, name: &str, value: String) -> Line<'static> {
    let focused = state.focus == field;
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(ACCENT)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        focus_marker(state, field),
        label(name),
        Span::styled(format!("< {value} >"), value_style),
    ])
}

fn render_upload_step(lines: &mut Vec<Line<'static>>, state: &TuiState, workflow: &WorkflowState) {
    step_header(lines, 1, "Upload Voice Sample");
    lines.push(Line::from(Span::styled(
        "  Best results come from clear audio samples of 30-60 seconds with minimal background noise.",
        Style::default().fg(Color::Gray),
    )));

    match &workflow.sample {
        Some(sample) => {
            lines.push(Line::from(vec![
                focus_marker(state, Field::Sample),
                label("Selected file:"),
                Span::styled(
                    sample.file.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" ({})", sample.file.size_label())),
                Span::styled("   [x] Clear", Style::default().fg(Color::DarkGray)),
            ]));
            if let Some(preview) = &sample.preview {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    label("Preview:"),
                    Span::styled(preview.url(), Style::default().fg(Color::Cyan)),
                    Span::styled("   [p] play", Style::default().fg(Color::DarkGray)),
                ]));
            }
        }
        None => {
            lines.push(Line::from(vec![
                focus_marker(state, Field::Sample),
                label("Sample:"),
                Span::styled(
                    "[ Select MP4/MP3 File ]",
                    Style::default().fg(Color::Black).bg(ACCENT),
                ),
            ]));
        }
    }

    lines.push(Line::from(vec![
        focus_marker(state, Field::VoiceName),
        label("Voice Clone Name:"),
        Span::raw(workflow.voice_name.clone()),
    ]));
}

fn render_text_step(lines: &mut Vec<Line<'static>>, state: &TuiState, workflow: &WorkflowState) {
    step_header(lines, 2, "Enter Text for TTS");

    let mut message_lines = workflow.message.lines();
    lines.push(Line::from(vec![
        focus_marker(state, Field::Message),
        label("Message:"),
        Span::raw(message_lines.next().unwrap_or_default().to_string()),
    ]));
    for rest in message_lines {
        lines.push(Line::from(format!("{:20}{rest}", "")));
    }

    let phrase = SAMPLE_PHRASES[state.phrase_index];
    lines.push(selector(
        state,
        Field::Phrases,
        "Sample phrases:",
        format!("{} ({}/{})", phrase, state.phrase_index + 1, SAMPLE_PHRASES.len()),
    ));

    let options = workflow.options;
    lines.push(selector(
        state,
        Field::OutputFormat,
        "Output Format:",
        options.output_format.label(),
    ));
    lines.push(selector(state, Field::Emotion, "Emotion:", options.emotion.label()));
    lines.push(selector(
        state,
        Field::Language,
        "Language:",
        options.language.label(),
    ));
}

fn render_generate_step(
    lines: &mut Vec<Line<'static>>,
    state: &TuiState,
    workflow: &WorkflowState,
) {
    step_header(lines, 3, "Generate Voice");

    let marker = focus_marker(state, Field::Generate);
    match &workflow.output {
        OutputState::InFlight => {
            let spinner = SPINNER_CHARS[state.spinner_frame % SPINNER_CHARS.len()];
            lines.push(Line::from(vec![
                marker,
                Span::styled(
                    format!("[ {spinner} Processing... ]"),
                    Style::default().fg(Color::White).bg(Color::DarkGray),
                ),
            ]));
        }
        OutputState::Succeeded { audio_url, .. } => {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    "Generated TTS Audio",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(audio_url.clone(), Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from(vec![
                marker,
                Span::styled(
                    "[ Download Audio ]",
                    Style::default().fg(Color::Black).bg(ACCENT),
                ),
                Span::styled(
                    "   [g] generate again",
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
        OutputState::Idle | OutputState::Failed { .. } => {
            let style = if workflow.can_submit() {
                Style::default().fg(Color::Black).bg(ACCENT)
            } else {
                Style::default().fg(Color::Gray).bg(Color::DarkGray)
            };
            lines.push(Line::from(vec![
                marker,
                Span::styled("[ Generate Voice Clone TTS ]", style),
            ]));
        }
    }

    if let Some(error) = workflow.output.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::LightRed).bg(Color::Rgb(60, 10, 10)),
        )));
    }
}
