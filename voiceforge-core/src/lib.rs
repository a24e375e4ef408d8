pub mod options;
#[cfg(feature = "playback")]
pub mod playback;
pub mod route;
pub mod sample;
pub mod service;
pub mod settings;
pub mod workflow;

pub use options::{Emotion, Language, OptionChange, OutputFormat, TtsOptions};
pub use route::Route;
pub use sample::{PreviewRef, PreviewRegistry, SampleFile};
pub use service::{CloneService, HttpCloneService};
pub use settings::{Settings, SettingsManager};
pub use workflow::{Action, WorkflowSession, WorkflowState};
