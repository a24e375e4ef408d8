use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::state::TuiState;
use crate::tui::widgets::ACCENT;

/// Words cycled through above the headline.
const HEADLINE_WORDS: [&str; 7] = [
    "Speech", "Custom", "Smooth", "Podcast", "Accent", "Reliable", "Secure",
];

/// Ticks each word stays on screen.
const TICKS_PER_WORD: usize = 40;

pub fn headline_word(frame: usize) -> &'static str {
    HEADLINE_WORDS[(frame / TICKS_PER_WORD) % HEADLINE_WORDS.len()]
}

pub fn render(frame: &mut Frame, area: Rect, state: &TuiState) {
    let accent = Style::default().fg(ACCENT);
    let accent_bold = accent.add_modifier(Modifier::BOLD);
    let plain = Style::default().fg(Color::White);

    let lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(
            headline_word(state.headline_frame).to_uppercase(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("VoiceForge", plain.add_modifier(Modifier::BOLD)),
            Span::styled(".", accent_bold),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Transform your voice with", plain),
            Span::styled(" AI-powered cloning.", accent),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("-> Create realistic, custom voices with", plain),
            Span::styled(" cutting-edge AI", accent_bold),
            Span::styled(".", plain),
        ]),
        Line::from(vec![
            Span::styled("-> Perfect for", plain),
            Span::styled(" podcasts", accent_bold),
            Span::styled(",", plain),
            Span::styled(" videos", accent_bold),
            Span::styled(",", plain),
            Span::styled(" games", accent_bold),
            Span::styled(", and", plain),
            Span::styled(" more", accent_bold),
            Span::styled(".", plain),
        ]),
        Line::from(Span::styled(
            "-> 100% customizable and easy to use.",
            plain,
        )),
        Line::from(""),
        Line::from(Span::styled("[ GET STARTED ]  (Enter)", accent_bold)),
    ];

    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, chunks[1]);
}
