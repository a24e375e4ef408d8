use anyhow::Context;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

use super::action::{Action, Effect, Notice};
use super::reducer::reduce;
use super::state::WorkflowState;
use crate::sample::{PreviewRegistry, SampleFile};
use crate::service::{CloneRequest, CloneResponse, CloneService, ServiceError};
use crate::settings::WorkflowDefaults;

/// Result of background work started by the session. Feed it back through
/// [`WorkflowSession::complete`].
#[derive(Debug)]
pub enum Completion {
    Generation(Result<CloneResponse, ServiceError>),
    Download(Result<PathBuf, String>),
}

/// What the UI needs to react to after an action was processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Alert(Notice),
    PickerReset,
    /// A different sample was selected, or the selection was cleared.
    SampleChanged,
    RequestStarted,
    Downloaded(PathBuf),
    DownloadFailed(String),
}

/// Owns the workflow state and executes the reducer's effects: preview
/// handles, the outbound request and downloads.
pub struct WorkflowSession {
    state: WorkflowState,
    previews: PreviewRegistry,
    service: Arc<dyn CloneService>,
    download_dir: PathBuf,
    completion_tx: mpsc::UnboundedSender<Completion>,
}

impl WorkflowSession {
    pub fn new(
        service: Arc<dyn CloneService>,
        defaults: &WorkflowDefaults,
        download_dir: PathBuf,
    ) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let state = WorkflowState::new(service.origin(), defaults);

        (
            Self {
                state,
                previews: PreviewRegistry::new(),
                service,
                download_dir,
                completion_tx,
            },
            completion_rx,
        )
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Local file behind the current preview handle, if one is live.
    pub fn preview_path(&self) -> Option<&Path> {
        self.state
            .preview()
            .and_then(|preview| self.previews.resolve(preview))
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let mut pending = VecDeque::from([action]);

        while let Some(action) = pending.pop_front() {
            let transition = reduce(&self.state, action);
            let sample_changed = selected_file(&self.state) != selected_file(&transition.state);
            self.state = transition.state;
            if sample_changed {
                events.push(SessionEvent::SampleChanged);
            }

            for effect in transition.effects {
                match effect {
                    Effect::Alert(notice) => events.push(SessionEvent::Alert(notice)),
                    Effect::ReleasePreview(preview) => {
                        self.previews.release(&preview);
                    }
                    Effect::AcquirePreview(file) => {
                        let preview = self.previews.acquire(&file);
                        pending.push_back(Action::PreviewAcquired(preview));
                    }
                    Effect::ResetPicker => events.push(SessionEvent::PickerReset),
                    Effect::SendRequest(request) => {
                        self.spawn_request(request);
                        events.push(SessionEvent::RequestStarted);
                    }
                    Effect::Download {
                        audio_url,
                        file_name,
                    } => self.spawn_download(audio_url, file_name),
                }
            }
        }

        events
    }

    pub fn complete(&mut self, completion: Completion) -> Vec<SessionEvent> {
        match completion {
            Completion::Generation(Ok(response)) => {
                info!(audio_url = %response.audio_url, "Voice clone generated");
                self.dispatch(Action::GenerationSucceeded(response))
            }
            Completion::Generation(Err(e)) => {
                error!(error = %e, "Error submitting voice clone request");
                self.dispatch(Action::GenerationFailed(e.to_string()))
            }
            Completion::Download(Ok(path)) => {
                info!(?path, "Saved generated audio");
                vec![SessionEvent::Downloaded(path)]
            }
            Completion::Download(Err(e)) => {
                error!(error = %e, "Download failed");
                vec![SessionEvent::DownloadFailed(e)]
            }
        }
    }

    fn spawn_request(&self, request: CloneRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let result = service.clone_and_generate(&request).await;
            // Receiver gone means the session was torn down; nothing to update.
            let _ = tx.send(Completion::Generation(result));
        });
    }

    fn spawn_download(&self, audio_url: String, file_name: String) {
        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        let destination = self.download_dir.join(file_name);

        tokio::spawn(async move {
            let result = download(service.as_ref(), &audio_url, &destination)
                .await
                .map(|()| destination)
                .map_err(|e| format!("{e:#}"));
            let _ = tx.send(Completion::Download(result));
        });
    }
}

fn selected_file(state: &WorkflowState) -> Option<&SampleFile> {
    state.sample.as_ref().map(|sample| &sample.file)
}

async fn download(
    service: &dyn CloneService,
    audio_url: &str,
    destination: &Path,
) -> anyhow::Result<()> {
    let bytes = service
        .fetch_audio(audio_url)
        .await
        .with_context(|| format!("Failed to fetch {audio_url}"))?;

    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {parent:?}"))?;
    }
    tokio::fs::write(destination, bytes)
        .await
        .with_context(|| format!("Failed to write {destination:?}"))
}

impl Drop for WorkflowSession {
    fn drop(&mut self) {
        if let Some(preview) = self.state.preview().cloned() {
            self.previews.release(&preview);
        }
    }
}
