use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use voiceforge_core::settings::WorkflowDefaults;
use voiceforge_core::workflow::{Completion, OutputState, SessionEvent};
use voiceforge_core::{Action, CloneService, SampleFile, WorkflowSession};

/// Drives the whole workflow once from command-line input: select the
/// sample, generate, then download the result. Returns the saved file.
pub async fn run_headless(
    service: Arc<dyn CloneService>,
    defaults: &WorkflowDefaults,
    download_dir: PathBuf,
    sample: &Path,
) -> Result<PathBuf> {
    let (mut session, mut completion_rx) = WorkflowSession::new(service, defaults, download_dir);

    let file = SampleFile::from_path(sample)
        .with_context(|| format!("Could not open sample {}", sample.display()))?;
    println!("Selected file: {} ({})", file.name, file.size_label());

    check_alerts(session.dispatch(Action::SelectSample(file)))?;
    check_alerts(session.dispatch(Action::Submit))?;

    let spinner = create_spinner("Processing...");
    let result = await_generation(&mut session, &mut completion_rx).await;
    spinner.finish_and_clear();
    let audio_url = result?;
    println!("Generated TTS audio: {audio_url}");

    let spinner = create_spinner("Downloading...");
    let result = await_download(&mut session, &mut completion_rx).await;
    spinner.finish_and_clear();
    let path = result?;
    println!("Saved {}", path.display());

    Ok(path)
}

fn check_alerts(events: Vec<SessionEvent>) -> Result<()> {
    for event in events {
        if let SessionEvent::Alert(notice) = event {
            bail!(notice.message());
        }
    }
    Ok(())
}

async fn await_generation(
    session: &mut WorkflowSession,
    completion_rx: &mut mpsc::UnboundedReceiver<Completion>,
) -> Result<String> {
    while session.state().is_loading() {
        let completion = completion_rx
            .recv()
            .await
            .context("Workflow session closed before the request finished")?;
        session.complete(completion);
    }

    match &session.state().output {
        OutputState::Succeeded { audio_url, .. } => Ok(audio_url.clone()),
        OutputState::Failed { message } => bail!("{message}"),
        other => bail!("Request did not complete: {other:?}"),
    }
}

async fn await_download(
    session: &mut WorkflowSession,
    completion_rx: &mut mpsc::UnboundedReceiver<Completion>,
) -> Result<PathBuf> {
    session.dispatch(Action::Download);

    loop {
        let completion = completion_rx
            .recv()
            .await
            .context("Workflow session closed before the download finished")?;
        for event in session.complete(completion) {
            match event {
                SessionEvent::Downloaded(path) => {
                    info!(?path, "Headless run finished");
                    return Ok(path);
                }
                SessionEvent::DownloadFailed(e) => bail!("Download failed: {e}"),
                _ => {}
            }
        }
    }
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.magenta} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
