use crate::options::TtsOptions;
use crate::sample::{PreviewRef, SampleFile};
use crate::service::CloneRequest;
use crate::settings::WorkflowDefaults;

/// Canned messages offered in step two.
pub const SAMPLE_PHRASES: [&str; 3] = [
    "Welcome to my personal AI assistant. How can I help you today?",
    "This is a demonstration of advanced voice cloning technology.",
    "The quick brown fox jumps over the lazy dog.",
];

/// Shown for every failed generation; the underlying error only goes to the log.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to process voice clone request. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSample {
    pub file: SampleFile,
    /// `None` until the session has acquired a handle for this file.
    pub preview: Option<PreviewRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputState {
    #[default]
    Idle,
    InFlight,
    Succeeded {
        audio_url: String,
    },
    Failed {
        message: String,
    },
}

impl OutputState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    pub fn audio_url(&self) -> Option<&str> {
        match self {
            Self::Succeeded { audio_url } => Some(audio_url),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Everything the workflow view shows, as one immutable record. Only the
/// reducer produces new versions of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState {
    pub service_origin: String,
    pub sample: Option<SelectedSample>,
    pub voice_name: String,
    pub message: String,
    pub options: TtsOptions,
    pub output: OutputState,
}

impl WorkflowState {
    pub fn new(service_origin: impl Into<String>, defaults: &WorkflowDefaults) -> Self {
        Self {
            service_origin: service_origin.into(),
            sample: None,
            voice_name: defaults.voice_name.clone(),
            message: defaults.message.clone(),
            options: defaults.options(),
            output: OutputState::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.output.is_loading()
    }

    pub fn can_submit(&self) -> bool {
        self.sample.is_some() && !self.is_loading()
    }

    pub fn preview(&self) -> Option<&PreviewRef> {
        self.sample.as_ref().and_then(|s| s.preview.as_ref())
    }

    /// Snapshot of the form as it would be sent right now.
    pub fn clone_request(&self) -> Option<CloneRequest> {
        let sample = self.sample.as_ref()?;
        Some(CloneRequest {
            sample: sample.file.clone(),
            voice_name: self.voice_name.clone(),
            message: self.message.clone(),
            options: self.options,
        })
    }
}
