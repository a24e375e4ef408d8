use crate::options::{Emotion, Language, OutputFormat, TtsOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the voice-cloning service lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Scheme, host and port. Returned audio paths are resolved against it.
    #[serde(default = "default_origin")]
    pub origin: String,

    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    /// Upper bound for a single clone-and-generate request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServiceSettings {
    pub fn endpoint_url(&self) -> String {
        crate::service::resolve_audio_url(&self.origin, &self.endpoint_path)
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            endpoint_path: default_endpoint_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Initial values of the workflow form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowDefaults {
    #[serde(default = "default_voice_name")]
    pub voice_name: String,

    #[serde(default = "default_message")]
    pub message: String,

    #[serde(default)]
    pub output_format: OutputFormat,

    #[serde(default)]
    pub emotion: Emotion,

    #[serde(default)]
    pub language: Language,
}

impl WorkflowDefaults {
    pub fn options(&self) -> TtsOptions {
        TtsOptions {
            output_format: self.output_format,
            emotion: self.emotion,
            language: self.language,
        }
    }
}

impl Default for WorkflowDefaults {
    fn default() -> Self {
        Self {
            voice_name: default_voice_name(),
            message: default_message(),
            output_format: OutputFormat::default(),
            emotion: Emotion::default(),
            language: Language::default(),
        }
    }
}

/// Core application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Settings {
    #[serde(default)]
    pub service: ServiceSettings,

    #[serde(default)]
    pub defaults: WorkflowDefaults,

    /// Directory downloads are written to. Defaults to the working directory.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

impl Settings {
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_origin() -> String {
    "http://localhost:5000".to_string()
}

fn default_endpoint_path() -> String {
    "/api/clone-and-generate".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

pub fn default_voice_name() -> String {
    "My Voice Clone".to_string()
}

pub fn default_message() -> String {
    "Every journey begins with a single step. The path ahead may be uncertain, but standing still guarantees nothing.".to_string()
}
