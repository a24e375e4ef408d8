use tracing::{debug, warn};

use super::action::{Action, Effect, Notice};
use super::state::{
    OutputState, SelectedSample, WorkflowState, GENERATION_FAILED_MESSAGE, SAMPLE_PHRASES,
};
use crate::service::resolve_audio_url;

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: WorkflowState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: &WorkflowState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }

    fn to(state: WorkflowState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: WorkflowState, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }
}

/// Apply `action` to `state`. Pure: all I/O is described by the returned
/// effects.
pub fn reduce(state: &WorkflowState, action: Action) -> Transition {
    // The form is frozen while a request is outstanding.
    if state.is_loading() && is_edit(&action) {
        debug!(?action, "Ignoring edit while a request is in flight");
        return Transition::unchanged(state);
    }

    match action {
        Action::SelectSample(file) => {
            if !file.is_accepted() {
                warn!(file = %file.name, media_type = %file.media_type, "Rejected sample");
                return Transition::with(
                    state.clone(),
                    vec![Effect::Alert(Notice::InvalidFileType), Effect::ResetPicker],
                );
            }

            let mut effects = Vec::new();
            if let Some(old) = state.preview() {
                effects.push(Effect::ReleasePreview(old.clone()));
            }
            effects.push(Effect::AcquirePreview(file.clone()));

            Transition::with(
                WorkflowState {
                    sample: Some(SelectedSample {
                        file,
                        preview: None,
                    }),
                    output: OutputState::Idle,
                    ..state.clone()
                },
                effects,
            )
        }

        Action::PreviewAcquired(preview) => match &state.sample {
            Some(sample) if sample.preview.is_none() => Transition::to(WorkflowState {
                sample: Some(SelectedSample {
                    file: sample.file.clone(),
                    preview: Some(preview),
                }),
                ..state.clone()
            }),
            // Nothing is waiting for this handle.
            _ => Transition::with(state.clone(), vec![Effect::ReleasePreview(preview)]),
        },

        Action::ClearSample => {
            let mut effects = Vec::new();
            if let Some(preview) = state.preview() {
                effects.push(Effect::ReleasePreview(preview.clone()));
            }
            effects.push(Effect::ResetPicker);

            Transition::with(
                WorkflowState {
                    sample: None,
                    output: OutputState::Idle,
                    ..state.clone()
                },
                effects,
            )
        }

        Action::SetVoiceName(voice_name) => Transition::to(WorkflowState {
            voice_name,
            ..state.clone()
        }),

        Action::SetMessage(message) => Transition::to(WorkflowState {
            message,
            ..state.clone()
        }),

        Action::UseSamplePhrase(index) => match SAMPLE_PHRASES.get(index) {
            Some(phrase) => Transition::to(WorkflowState {
                message: phrase.to_string(),
                ..state.clone()
            }),
            None => Transition::unchanged(state),
        },

        Action::SetOption(change) => Transition::to(WorkflowState {
            options: state.options.with_change(change),
            ..state.clone()
        }),

        Action::Submit => {
            if state.is_loading() {
                debug!("Submit ignored: request already in flight");
                return Transition::unchanged(state);
            }
            let Some(request) = state.clone_request() else {
                return Transition::with(
                    state.clone(),
                    vec![Effect::Alert(Notice::NoSampleSelected)],
                );
            };

            Transition::with(
                WorkflowState {
                    output: OutputState::InFlight,
                    ..state.clone()
                },
                vec![Effect::SendRequest(request)],
            )
        }

        Action::GenerationSucceeded(response) => {
            if !state.is_loading() {
                warn!("Dropping generation result with no request in flight");
                return Transition::unchanged(state);
            }
            Transition::to(WorkflowState {
                output: OutputState::Succeeded {
                    audio_url: resolve_audio_url(&state.service_origin, &response.audio_url),
                },
                ..state.clone()
            })
        }

        Action::GenerationFailed(_) => {
            if !state.is_loading() {
                warn!("Dropping generation failure with no request in flight");
                return Transition::unchanged(state);
            }
            Transition::to(WorkflowState {
                output: OutputState::Failed {
                    message: GENERATION_FAILED_MESSAGE.to_string(),
                },
                ..state.clone()
            })
        }

        // Named after the format selected now, not the one submitted.
        Action::Download => match &state.output {
            OutputState::Succeeded { audio_url } => Transition::with(
                state.clone(),
                vec![Effect::Download {
                    audio_url: audio_url.clone(),
                    file_name: state.options.output_format.download_file_name(),
                }],
            ),
            _ => Transition::unchanged(state),
        },
    }
}

fn is_edit(action: &Action) -> bool {
    matches!(
        action,
        Action::SelectSample(_)
            | Action::ClearSample
            | Action::SetVoiceName(_)
            | Action::SetMessage(_)
            | Action::UseSamplePhrase(_)
            | Action::SetOption(_)
    )
}
