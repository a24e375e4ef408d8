use anyhow::{Context, Result};
use crossterm::{
    event::{Event as CrosstermEvent, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tui_textarea::TextArea;
use voiceforge_core::settings::WorkflowDefaults;
use voiceforge_core::workflow::{Completion, SessionEvent};
use voiceforge_core::{Action, CloneService, Route, SampleFile, WorkflowSession};

use super::input_handler::{handle_key_event, TuiAction};
use super::state::{Field, TuiState};
use super::ui::draw_ui;

pub struct TuiApp {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    service: Arc<dyn CloneService>,
    defaults: WorkflowDefaults,
    download_dir: PathBuf,
    session: WorkflowSession,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    state: TuiState,
    #[cfg(feature = "playback")]
    player: Option<voiceforge_core::playback::AudioPlayer>,
    #[cfg(feature = "playback")]
    playback: Option<voiceforge_core::playback::AudioPlayback>,
}

impl TuiApp {
    pub fn new(
        service: Arc<dyn CloneService>,
        defaults: WorkflowDefaults,
        download_dir: PathBuf,
        route: Route,
    ) -> Result<Self> {
        let (session, completion_rx) =
            WorkflowSession::new(Arc::clone(&service), &defaults, download_dir.clone());

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            service,
            defaults,
            download_dir,
            session,
            completion_rx,
            state: TuiState::new(route),
            #[cfg(feature = "playback")]
            player: None,
            #[cfg(feature = "playback")]
            playback: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Install panic hook to restore terminal on panic
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let mut textarea = TextArea::default();

        let tick_rate = Duration::from_millis(50);
        let mut crossterm_reader = EventStream::new();

        loop {
            let state = &self.state;
            let workflow = self.session.state();
            let ta = &textarea;
            self.terminal.draw(|frame| {
                draw_ui(frame, state, workflow, ta);
            })?;

            if self.state.should_quit {
                break;
            }

            tokio::select! {
                Some(completion) = self.completion_rx.recv() => {
                    let events = self.session.complete(completion);
                    self.apply_events(events);
                }

                Some(Ok(crossterm_event)) = crossterm_reader.next() => {
                    if let CrosstermEvent::Key(key) = crossterm_event {
                        if key.kind == KeyEventKind::Press {
                            let action = handle_key_event(
                                key,
                                &mut textarea,
                                &mut self.state,
                                self.session.state(),
                            );
                            self.handle_action(action);
                        }
                    }
                }

                // Tick for spinner and headline animation
                _ = tokio::time::sleep(tick_rate) => {
                    self.state.headline_frame = self.state.headline_frame.wrapping_add(1);
                    if self.session.state().is_loading() {
                        self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
                    }
                }
            }
        }

        self.restore_terminal()?;

        Ok(())
    }

    fn handle_action(&mut self, action: TuiAction) {
        match action {
            TuiAction::Navigate(route) => self.navigate(route),
            TuiAction::Dispatch(action) => {
                let events = self.session.dispatch(action);
                self.apply_events(events);
            }
            TuiAction::PickSample(path) => self.pick_sample(&path),
            TuiAction::Play => self.play(),
            TuiAction::Quit => self.state.should_quit = true,
            TuiAction::None => {}
        }
    }

    fn navigate(&mut self, route: Route) {
        info!(from = self.state.route.path(), to = route.path(), "Navigating");
        if self.state.route == Route::Workflow && route != Route::Workflow {
            // Leaving the workflow discards it, releasing any preview.
            let (session, completion_rx) = WorkflowSession::new(
                Arc::clone(&self.service),
                &self.defaults,
                self.download_dir.clone(),
            );
            self.session = session;
            self.completion_rx = completion_rx;
            self.state.forget_download();
            #[cfg(feature = "playback")]
            {
                self.playback = None;
            }
        }
        self.state.navigate(route);
    }

    fn pick_sample(&mut self, path: &str) {
        match SampleFile::from_path(path) {
            Ok(file) => {
                let events = self.session.dispatch(Action::SelectSample(file));
                self.apply_events(events);
            }
            Err(e) => {
                warn!(error = %e, "Could not open sample");
                self.state.show_alert(format!("Could not open {path}"));
            }
        }
    }

    fn apply_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::Alert(notice) => self.state.show_alert(notice.message()),
                SessionEvent::PickerReset => {
                    if self.state.editing == Some(Field::Sample) {
                        self.state.editing = None;
                    }
                }
                SessionEvent::SampleChanged | SessionEvent::RequestStarted => {
                    self.state.forget_download();
                }
                SessionEvent::Downloaded(path) => {
                    self.state.status_message = Some(format!("Saved {}", path.display()));
                    self.state.last_download = Some(path);
                }
                SessionEvent::DownloadFailed(e) => {
                    self.state.status_message = Some(format!("Download failed: {e}"));
                }
            }
        }
    }

    /// The downloaded result when there is one, otherwise the sample preview.
    fn playable_path(&self) -> Option<PathBuf> {
        self.state
            .last_download
            .clone()
            .or_else(|| self.session.preview_path().map(PathBuf::from))
    }

    #[cfg(feature = "playback")]
    fn play(&mut self) {
        use voiceforge_core::playback::{is_playable, AudioPlayer};

        let Some(path) = self.playable_path() else {
            self.state.status_message = Some("Nothing to play".to_string());
            return;
        };
        if !is_playable(&path) {
            self.state.status_message = Some("Only WAV audio can be played here".to_string());
            return;
        }

        if self.player.is_none() {
            match AudioPlayer::new() {
                Ok(player) => self.player = Some(player),
                Err(e) => {
                    warn!(error = ?e, "No audio output");
                    self.state.status_message = Some(format!("No audio output: {e}"));
                    return;
                }
            }
        }

        let Some(player) = self.player.as_ref() else {
            return;
        };
        match player.play_file(&path) {
            Ok(playback) => {
                self.state.status_message = Some(format!("Playing {}", path.display()));
                self.playback = Some(playback);
            }
            Err(e) => {
                warn!(error = ?e, ?path, "Playback failed");
                self.state.status_message = Some(format!("Playback failed: {e}"));
            }
        }
    }

    #[cfg(not(feature = "playback"))]
    fn play(&mut self) {
        self.state.status_message = match self.playable_path() {
            Some(path) => Some(format!(
                "Playback not built in; audio is at {}",
                path.display()
            )),
            None => Some("Nothing to play".to_string()),
        };
    }

    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
