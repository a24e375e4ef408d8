use std::path::PathBuf;
use voiceforge_core::workflow::SAMPLE_PHRASES;
use voiceforge_core::Route;

/// Focusable rows of the workflow view, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Sample,
    VoiceName,
    Message,
    Phrases,
    OutputFormat,
    Emotion,
    Language,
    Generate,
}

impl Field {
    pub const ORDER: [Field; 8] = [
        Field::Sample,
        Field::VoiceName,
        Field::Message,
        Field::Phrases,
        Field::OutputFormat,
        Field::Emotion,
        Field::Language,
        Field::Generate,
    ];

    pub fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Fields edited through the text editor popup.
    pub fn is_text(self) -> bool {
        matches!(self, Field::Sample | Field::VoiceName | Field::Message)
    }
}

/// Terminal-only state. Everything about the form itself lives in the
/// workflow session.
pub struct TuiState {
    pub route: Route,

    pub focus: Field,

    /// Field currently open in the editor popup.
    pub editing: Option<Field>,

    /// Highlighted sample phrase in step two.
    pub phrase_index: usize,

    /// Blocking message; any key dismisses it.
    pub alert: Option<String>,

    /// Last non-blocking status, e.g. where a download was saved.
    pub status_message: Option<String>,

    /// Last completed download, playable when it is a WAV.
    pub last_download: Option<PathBuf>,

    /// Spinner animation frame counter.
    pub spinner_frame: usize,

    /// Drives the cycling headline word on the landing view.
    pub headline_frame: usize,

    /// Whether the app should exit.
    pub should_quit: bool,
}

impl TuiState {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            focus: Field::Sample,
            editing: None,
            phrase_index: 0,
            alert: None,
            status_message: None,
            last_download: None,
            spinner_frame: 0,
            headline_frame: 0,
            should_quit: false,
        }
    }

    pub fn navigate(&mut self, route: Route) {
        self.route = route;
        self.focus = Field::Sample;
        self.editing = None;
    }

    /// Drop the previous result once the sample it came from is gone.
    pub fn forget_download(&mut self) {
        self.last_download = None;
        self.status_message = None;
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn cycle_phrase(&mut self, forward: bool) {
        let len = SAMPLE_PHRASES.len();
        self.phrase_index = if forward {
            (self.phrase_index + 1) % len
        } else {
            (self.phrase_index + len - 1) % len
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_wraps() {
        assert_eq!(Field::Generate.next(), Field::Sample);
        assert_eq!(Field::Sample.previous(), Field::Generate);
        assert_eq!(Field::VoiceName.next(), Field::Message);
    }

    #[test]
    fn test_phrase_cycle_wraps() {
        let mut state = TuiState::new(Route::Workflow);
        state.cycle_phrase(false);
        assert_eq!(state.phrase_index, SAMPLE_PHRASES.len() - 1);
        state.cycle_phrase(true);
        assert_eq!(state.phrase_index, 0);
    }

    #[test]
    fn test_forget_download_clears_result() {
        let mut state = TuiState::new(Route::Workflow);
        state.last_download = Some(PathBuf::from("out/tts-output.wav"));
        state.status_message = Some("Saved out/tts-output.wav".to_string());

        state.forget_download();

        assert!(state.last_download.is_none());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_navigate_resets_focus() {
        let mut state = TuiState::new(Route::Landing);
        state.focus = Field::Language;
        state.editing = Some(Field::Message);

        state.navigate(Route::Workflow);

        assert_eq!(state.route, Route::Workflow);
        assert_eq!(state.focus, Field::Sample);
        assert!(state.editing.is_none());
    }
}
