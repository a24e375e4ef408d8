pub mod config;
pub mod manager;


pub use config::{ServiceSettings, Settings, WorkflowDefaults};
pub use manager::SettingsManager;
