use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::border,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use crate::tui::widgets::ACCENT;

/// Blocking message box; dismissed by any key.
pub fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
    let popup = centered(area, 60, 5);
    let block = Block::default()
        .title(" Alert ")
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::LightRed));

    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::styled("Press any key", Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}

/// Editor for the sample path and text fields.
pub fn render_editor(frame: &mut Frame, area: Rect, title: &str, textarea: &TextArea) {
    let height = (textarea.lines().len().clamp(1, 8) + 2) as u16;
    let popup = centered(area, 80, height);
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(ACCENT));

    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);
    frame.render_widget(textarea, inner);
}

/// Rectangle of `percent_x` width and fixed height centered in `area`.
fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
