use serde::{Deserialize, Serialize};

use crate::options::TtsOptions;
use crate::sample::SampleFile;

/// Multipart field carrying the sample bytes.
pub const SAMPLE_FIELD: &str = "sample_file";

/// Everything the service needs to clone a voice and speak a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    pub sample: SampleFile,
    pub voice_name: String,
    pub message: String,
    pub options: TtsOptions,
}

impl CloneRequest {
    /// Text fields in the order they are sent. Option fields with no value
    /// are left out entirely rather than sent empty.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("voice_name", self.voice_name.clone()),
            ("message", self.message.clone()),
        ];
        fields.extend(
            self.options
                .form_fields()
                .into_iter()
                .map(|(name, value)| (name, value.to_string())),
        );
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneResponse {
    /// Path of the generated audio, relative to the service origin.
    pub audio_url: String,
}

/// Append a returned audio path to the service origin as-is.
pub fn resolve_audio_url(origin: &str, audio_path: &str) -> String {
    format!("{origin}{audio_path}")
}
