use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::options::{Emotion, Language, OptionChange, OutputFormat};
use crate::sample::SampleFile;
use crate::service::{CloneResponse, MockBehavior, MockCloneService};
use crate::settings::WorkflowDefaults;
use crate::workflow::*;

const ORIGIN: &str = "http://localhost:5000";

fn sample(name: &str, media_type: &str) -> SampleFile {
    SampleFile {
        path: PathBuf::from(format!("/tmp/{name}")),
        name: name.to_string(),
        size: 4096,
        media_type: media_type.to_string(),
    }
}

fn initial() -> WorkflowState {
    WorkflowState::new(ORIGIN, &WorkflowDefaults::default())
}

fn apply(state: &WorkflowState, actions: impl IntoIterator<Item = Action>) -> WorkflowState {
    actions
        .into_iter()
        .fold(state.clone(), |s, action| reduce(&s, action).state)
}

fn in_flight() -> WorkflowState {
    let state = apply(
        &initial(),
        [Action::SelectSample(sample("me.mp3", "audio/mpeg"))],
    );
    let transition = reduce(&state, Action::Submit);
    assert!(transition.state.is_loading());
    transition.state
}

// Reducer

#[test]
fn test_initial_state() {
    let state = initial();
    assert_eq!(state.voice_name, "My Voice Clone");
    assert!(state.message.starts_with("Every journey begins"));
    assert_eq!(state.options.output_format, OutputFormat::Mp3);
    assert_eq!(state.output, OutputState::Idle);
    assert!(!state.can_submit());
}

#[test]
fn test_invalid_type_rejected_with_empty_selection() {
    let state = initial();

    let transition = reduce(&state, Action::SelectSample(sample("notes.txt", "text/plain")));

    assert_eq!(transition.state, state);
    assert_eq!(
        transition.effects,
        vec![Effect::Alert(Notice::InvalidFileType), Effect::ResetPicker]
    );
}

#[test]
fn test_invalid_type_keeps_prior_selection() {
    let state = apply(
        &initial(),
        [Action::SelectSample(sample("me.wav", "audio/wav"))],
    );

    for media_type in ["video/webm", "image/png", "application/octet-stream", ""] {
        let transition = reduce(&state, Action::SelectSample(sample("bad", media_type)));
        assert_eq!(transition.state, state, "{media_type} should be rejected");
        assert!(transition
            .effects
            .contains(&Effect::Alert(Notice::InvalidFileType)));
    }
}

#[test]
fn test_mp4_video_is_accepted() {
    let transition = reduce(
        &initial(),
        Action::SelectSample(sample("clip.mp4", "video/mp4")),
    );

    assert_eq!(
        transition.state.sample.as_ref().map(|s| s.file.name.as_str()),
        Some("clip.mp4")
    );
    assert_eq!(
        transition.effects,
        vec![Effect::AcquirePreview(sample("clip.mp4", "video/mp4"))]
    );
}

#[test]
fn test_submit_without_sample_alerts_and_sends_nothing() {
    let state = initial();

    let transition = reduce(&state, Action::Submit);

    assert_eq!(transition.state, state);
    assert_eq!(
        transition.effects,
        vec![Effect::Alert(Notice::NoSampleSelected)]
    );
}

#[test]
fn test_submit_builds_request_from_form() {
    let state = apply(
        &initial(),
        [
            Action::SelectSample(sample("me.wav", "audio/wav")),
            Action::SetVoiceName("N".to_string()),
            Action::SetMessage("M".to_string()),
            Action::SetOption(OptionChange::OutputFormat(OutputFormat::Wav)),
            Action::SetOption(OptionChange::Language(Language::English)),
        ],
    );

    let transition = reduce(&state, Action::Submit);

    assert_eq!(transition.state.output, OutputState::InFlight);
    let [Effect::SendRequest(request)] = transition.effects.as_slice() else {
        panic!("expected a single request, got {:?}", transition.effects);
    };
    assert_eq!(request.sample.name, "me.wav");
    assert_eq!(
        request.text_fields(),
        vec![
            ("voice_name", "N".to_string()),
            ("message", "M".to_string()),
            ("output_format", "wav".to_string()),
            ("language", "english".to_string()),
        ]
    );
}

#[test]
fn test_submit_disabled_while_in_flight() {
    let state = in_flight();
    assert!(!state.can_submit());

    let transition = reduce(&state, Action::Submit);

    assert_eq!(transition.state, state);
    assert!(transition.effects.is_empty());
}

#[test]
fn test_edits_ignored_while_in_flight() {
    let state = in_flight();

    let after = apply(
        &state,
        [
            Action::SetMessage("changed".to_string()),
            Action::SetOption(OptionChange::Emotion(Emotion::MaleSad)),
            Action::ClearSample,
        ],
    );

    assert_eq!(after, state);
}

#[test]
fn test_success_resolves_against_origin() {
    let state = in_flight();

    let transition = reduce(
        &state,
        Action::GenerationSucceeded(CloneResponse {
            audio_url: "/files/abc.wav".to_string(),
        }),
    );

    let resolved = transition.state;
    assert!(!resolved.is_loading());
    assert!(resolved.can_submit());
    assert_eq!(
        resolved.output.audio_url(),
        Some("http://localhost:5000/files/abc.wav")
    );
    assert_eq!(resolved.output.error(), None);
}

#[test]
fn test_failure_shows_generic_message() {
    for detail in ["connection refused", "500 Internal Server Error", ""] {
        let transition = reduce(&in_flight(), Action::GenerationFailed(detail.to_string()));

        let failed = transition.state;
        assert!(!failed.is_loading());
        assert!(failed.can_submit());
        assert_eq!(failed.output.error(), Some(GENERATION_FAILED_MESSAGE));
        assert!(!GENERATION_FAILED_MESSAGE.is_empty());
    }
}

#[test]
fn test_stale_completion_ignored() {
    let state = initial();

    let transition = reduce(
        &state,
        Action::GenerationSucceeded(CloneResponse {
            audio_url: "/files/late.mp3".to_string(),
        }),
    );

    assert_eq!(transition.state, state);
}

#[test]
fn test_sample_phrase_replaces_message() {
    let state = apply(&initial(), [Action::UseSamplePhrase(2)]);
    assert_eq!(state.message, SAMPLE_PHRASES[2]);

    let unchanged = apply(&state, [Action::UseSamplePhrase(7)]);
    assert_eq!(unchanged, state);
}

#[test]
fn test_download_names_file_after_format() {
    let state = apply(
        &initial(),
        [
            Action::SelectSample(sample("me.wav", "audio/wav")),
            Action::SetOption(OptionChange::OutputFormat(OutputFormat::Ogg)),
            Action::Submit,
            Action::GenerationSucceeded(CloneResponse {
                audio_url: "/files/abc.ogg".to_string(),
            }),
        ],
    );

    let transition = reduce(&state, Action::Download);

    assert_eq!(
        transition.effects,
        vec![Effect::Download {
            audio_url: "http://localhost:5000/files/abc.ogg".to_string(),
            file_name: "tts-output.ogg".to_string(),
        }]
    );
}

#[test]
fn test_download_uses_format_selected_at_download_time() {
    let state = apply(
        &initial(),
        [
            Action::SelectSample(sample("me.wav", "audio/wav")),
            Action::SetOption(OptionChange::OutputFormat(OutputFormat::Ogg)),
            Action::Submit,
            Action::GenerationSucceeded(CloneResponse {
                audio_url: "/files/abc.ogg".to_string(),
            }),
            Action::SetOption(OptionChange::OutputFormat(OutputFormat::Mp3)),
        ],
    );

    let transition = reduce(&state, Action::Download);

    assert_eq!(
        transition.effects,
        vec![Effect::Download {
            audio_url: "http://localhost:5000/files/abc.ogg".to_string(),
            file_name: "tts-output.mp3".to_string(),
        }]
    );
}

#[test]
fn test_download_without_result_is_noop() {
    let transition = reduce(&initial(), Action::Download);
    assert!(transition.effects.is_empty());
}

#[test]
fn test_reselect_resets_output() {
    let state = apply(
        &initial(),
        [
            Action::SelectSample(sample("a.mp3", "audio/mpeg")),
            Action::Submit,
            Action::GenerationFailed("boom".to_string()),
            Action::SelectSample(sample("b.mp3", "audio/mpeg")),
        ],
    );

    assert_eq!(state.output, OutputState::Idle);
}

#[test]
fn test_reselect_releases_old_preview_before_acquiring() {
    let mut previews = crate::sample::PreviewRegistry::new();
    let first = sample("a.mp3", "audio/mpeg");
    let preview = previews.acquire(&first);
    let state = apply(
        &initial(),
        [
            Action::SelectSample(first),
            Action::PreviewAcquired(preview.clone()),
        ],
    );

    let second = sample("b.mp3", "audio/mpeg");
    let transition = reduce(&state, Action::SelectSample(second.clone()));

    assert_eq!(
        transition.effects,
        vec![
            Effect::ReleasePreview(preview.clone()),
            Effect::AcquirePreview(second)
        ]
    );
    assert!(transition.state.preview().is_none());
    assert!(previews.release(&preview));
}

// Session

fn session_with(
    behavior: MockBehavior,
) -> (
    WorkflowSession,
    tokio::sync::mpsc::UnboundedReceiver<Completion>,
    MockCloneService,
    TempDir,
) {
    let mock = MockCloneService::new(ORIGIN, behavior);
    let downloads = TempDir::new().unwrap();
    let (session, rx) = WorkflowSession::new(
        Arc::new(mock.clone()),
        &WorkflowDefaults::default(),
        downloads.path().to_path_buf(),
    );
    (session, rx, mock, downloads)
}

#[tokio::test]
async fn test_session_keeps_one_live_preview() {
    let (mut session, _rx, _mock, _dir) = session_with(MockBehavior::default());

    session.dispatch(Action::SelectSample(sample("a.mp3", "audio/mpeg")));
    let first = session.state().preview().cloned().unwrap();
    assert_eq!(session.previews().live_count(), 1);

    session.dispatch(Action::SelectSample(sample("b.mp3", "audio/mpeg")));
    let second = session.state().preview().cloned().unwrap();

    assert_ne!(first, second);
    assert!(!session.previews().is_live(&first));
    assert!(session.previews().is_live(&second));
    assert_eq!(session.previews().live_count(), 1);
    assert_eq!(session.preview_path(), Some(std::path::Path::new("/tmp/b.mp3")));
}

#[tokio::test]
async fn test_session_clear_releases_preview() {
    let (mut session, _rx, _mock, _dir) = session_with(MockBehavior::default());

    session.dispatch(Action::SelectSample(sample("a.mp3", "audio/mpeg")));
    let events = session.dispatch(Action::ClearSample);

    assert_eq!(
        events,
        vec![SessionEvent::SampleChanged, SessionEvent::PickerReset]
    );
    assert_eq!(session.previews().live_count(), 0);
    assert!(session.state().sample.is_none());
}

#[tokio::test]
async fn test_session_reports_sample_changes_only() {
    let (mut session, _rx, _mock, _dir) = session_with(MockBehavior::default());

    let events = session.dispatch(Action::SelectSample(sample("a.mp3", "audio/mpeg")));
    assert_eq!(events, vec![SessionEvent::SampleChanged]);

    let events = session.dispatch(Action::SetMessage("Hi".to_string()));
    assert!(events.is_empty());

    let events = session.dispatch(Action::SelectSample(sample("notes.txt", "text/plain")));
    assert!(!events.contains(&SessionEvent::SampleChanged));

    let events = session.dispatch(Action::SelectSample(sample("b.mp3", "audio/mpeg")));
    assert_eq!(events, vec![SessionEvent::SampleChanged]);
}

#[tokio::test]
async fn test_session_rejected_sample_alerts() {
    let (mut session, _rx, _mock, _dir) = session_with(MockBehavior::default());

    let events = session.dispatch(Action::SelectSample(sample("x.txt", "text/plain")));

    assert_eq!(
        events,
        vec![
            SessionEvent::Alert(Notice::InvalidFileType),
            SessionEvent::PickerReset
        ]
    );
    assert_eq!(session.previews().live_count(), 0);
}

#[tokio::test]
async fn test_session_submit_without_sample_makes_no_call() {
    let (mut session, mut rx, mock, _dir) = session_with(MockBehavior::default());

    let events = session.dispatch(Action::Submit);
    tokio::task::yield_now().await;

    assert_eq!(events, vec![SessionEvent::Alert(Notice::NoSampleSelected)]);
    assert_eq!(mock.request_count(), 0);
    assert!(rx.try_recv().is_err());
    assert_eq!(session.state().output, OutputState::Idle);
}

#[tokio::test]
async fn test_session_round_trip_success() {
    let (mut session, mut rx, mock, _dir) = session_with(MockBehavior::Success {
        audio_url: "/files/abc.wav".to_string(),
    });

    session.dispatch(Action::SelectSample(sample("a.mp3", "audio/mpeg")));
    let events = session.dispatch(Action::Submit);
    assert_eq!(events, vec![SessionEvent::RequestStarted]);
    assert!(session.state().is_loading());

    let completion = rx.recv().await.unwrap();
    session.complete(completion);

    assert_eq!(mock.request_count(), 1);
    assert!(!session.state().is_loading());
    assert_eq!(
        session.state().output.audio_url(),
        Some("http://localhost:5000/files/abc.wav")
    );
}

#[tokio::test]
async fn test_session_round_trip_failure() {
    let (mut session, mut rx, _mock, _dir) =
        session_with(MockBehavior::HttpError { status: 500 });

    session.dispatch(Action::SelectSample(sample("a.mp3", "audio/mpeg")));
    session.dispatch(Action::Submit);
    let completion = rx.recv().await.unwrap();
    session.complete(completion);

    assert!(session.state().can_submit());
    assert_eq!(
        session.state().output.error(),
        Some(GENERATION_FAILED_MESSAGE)
    );
}

#[tokio::test]
async fn test_session_download_writes_file() {
    let (mut session, mut rx, mock, dir) = session_with(MockBehavior::Success {
        audio_url: "/files/abc.mp3".to_string(),
    });

    session.dispatch(Action::SelectSample(sample("a.mp3", "audio/mpeg")));
    session.dispatch(Action::Submit);
    let completion = rx.recv().await.unwrap();
    session.complete(completion);

    session.dispatch(Action::Download);
    let completion = rx.recv().await.unwrap();
    let events = session.complete(completion);

    let expected = dir.path().join("tts-output.mp3");
    assert_eq!(events, vec![SessionEvent::Downloaded(expected.clone())]);
    assert_eq!(std::fs::read(expected).unwrap(), mock.audio());
}
