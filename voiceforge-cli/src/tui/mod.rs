pub mod app;
pub mod input_handler;
pub mod state;
pub mod ui;
pub mod widgets;

pub use app::TuiApp;
