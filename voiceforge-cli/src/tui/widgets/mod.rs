use ratatui::style::Color;

pub mod landing;
pub mod popup;
pub mod status_bar;
pub mod workflow_panel;

pub const ACCENT: Color = Color::Rgb(254, 124, 255);

pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
