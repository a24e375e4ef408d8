use crate::options::OptionChange;
use crate::sample::{PreviewRef, SampleFile};
use crate::service::{CloneRequest, CloneResponse};

/// Everything that can happen to the workflow: user input and the results
/// of work the session performed on the reducer's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectSample(SampleFile),
    PreviewAcquired(PreviewRef),
    ClearSample,
    SetVoiceName(String),
    SetMessage(String),
    UseSamplePhrase(usize),
    SetOption(OptionChange),
    Submit,
    GenerationSucceeded(CloneResponse),
    /// Carries the diagnostic detail, which is never shown to the user.
    GenerationFailed(String),
    Download,
}

/// Blocking messages for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidFileType,
    NoSampleSelected,
}

impl Notice {
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidFileType => "Please upload an MP4 or MP3 audio file",
            Self::NoSampleSelected => "Please upload an audio file first",
        }
    }
}

/// Side effects requested by the reducer, executed in order by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Alert(Notice),
    ReleasePreview(PreviewRef),
    AcquirePreview(SampleFile),
    /// Clear whatever is pending in the file picker.
    ResetPicker,
    SendRequest(CloneRequest),
    Download { audio_url: String, file_name: String },
}
