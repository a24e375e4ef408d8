use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use voiceforge_core::{
    CloneService, Emotion, HttpCloneService, Language, OutputFormat, Route, SettingsManager,
};

mod banner;
mod headless;
mod tui;

use crate::banner::{print_startup_banner, BannerInfo};
use crate::tui::TuiApp;

#[derive(Parser, Debug)]
#[command(name = "voiceforge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "VoiceForge - clone a voice and turn text into speech")]
struct Args {
    /// Load settings from a specific profile
    #[arg(long, value_name = "NAME")]
    profile: Option<String>,

    /// Voice service origin, e.g. http://localhost:5000
    #[arg(long, value_name = "URL")]
    origin: Option<String>,

    /// View to open with: "/" or "/voice"
    #[arg(long, default_value = "/")]
    route: String,

    /// Run the workflow once without the TUI
    #[arg(long)]
    headless: bool,

    /// Voice sample to upload (MP3, MP4 or other audio)
    #[arg(long)]
    sample: Option<PathBuf>,

    /// Voice clone name
    #[arg(long)]
    name: Option<String>,

    /// Message to convert to speech
    #[arg(long)]
    message: Option<String>,

    /// Output format: mp3, wav or ogg
    #[arg(long, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Emotion: male_happy, male_sad, male_angry, male_fearful, female_happy,
    /// female_sad, female_angry or female_fearful
    #[arg(long, value_parser = parse_emotion)]
    emotion: Option<Emotion>,

    /// Language: english, hindi, spanish, french, german, italian, portuguese,
    /// japanese, chinese or korean
    #[arg(long, value_parser = parse_language)]
    language: Option<Language>,

    /// Directory generated audio is saved to
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::try_from(s)
}

fn parse_emotion(s: &str) -> Result<Emotion, String> {
    Emotion::try_from(s)
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::try_from(s)
}

fn main() -> Result<()> {
    setup_tracing()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let local = tokio::task::LocalSet::new();
        local.run_until(async_main()).await
    })
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    info!(
        "CLI startup: profile={:?}, origin={:?}, route={}, headless={}",
        args.profile, args.origin, args.route, args.headless
    );

    if args.headless && args.sample.is_none() {
        return Err(anyhow::anyhow!("--headless requires --sample to be specified"));
    }

    let settings_manager = SettingsManager::from_settings_dir(
        SettingsManager::default_settings_dir()?,
        args.profile.as_deref(),
    )?;

    // Flags only override for this run; nothing is saved.
    settings_manager.update_setting(|settings| {
        if let Some(origin) = args.origin.clone() {
            settings.service.origin = origin;
        }
        if let Some(output) = args.output.clone() {
            settings.download_dir = Some(output);
        }
        let defaults = &mut settings.defaults;
        if let Some(name) = args.name.clone() {
            defaults.voice_name = name;
        }
        if let Some(message) = args.message.clone() {
            defaults.message = message;
        }
        if let Some(format) = args.format {
            defaults.output_format = format;
        }
        if let Some(emotion) = args.emotion {
            defaults.emotion = emotion;
        }
        if let Some(language) = args.language {
            defaults.language = language;
        }
    });
    let settings = settings_manager.settings();

    let service: Arc<dyn CloneService> = Arc::new(HttpCloneService::new(&settings.service)?);
    let download_dir = settings.download_dir();

    if let Some(sample) = args.sample.filter(|_| args.headless) {
        print_startup_banner(&BannerInfo {
            version: env!("CARGO_PKG_VERSION").to_string(),
            profile: args.profile,
            endpoint: settings.service.endpoint_url(),
            download_dir: download_dir.display().to_string(),
        });
        headless::run_headless(service, &settings.defaults, download_dir, &sample).await?;
        return Ok(());
    }

    let mut tui_app = TuiApp::new(
        service,
        settings.defaults,
        download_dir,
        Route::parse(&args.route),
    )?;
    tui_app.run().await?;

    Ok(())
}

fn setup_tracing() -> Result<()> {
    use std::fs;
    use tracing_subscriber::fmt;

    // Create trace directory in user's home
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
    let trace_dir = home.join(".voiceforge").join("trace");
    fs::create_dir_all(&trace_dir)?;

    let log_file = trace_dir.join("voiceforge.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Setup tracing subscriber with file output
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_flags_take_wire_values() {
        let args = Args::try_parse_from([
            "voiceforge",
            "--format",
            "wav",
            "--emotion",
            "female_sad",
            "--language",
            "french",
        ])
        .unwrap();

        assert_eq!(args.format, Some(OutputFormat::Wav));
        assert_eq!(args.emotion, Some(Emotion::FemaleSad));
        assert_eq!(args.language, Some(Language::French));
    }

    #[test]
    fn test_option_flags_reject_short_forms() {
        assert!(Args::try_parse_from(["voiceforge", "--emotion", "happy"]).is_err());
        assert!(Args::try_parse_from(["voiceforge", "--language", "fr"]).is_err());
    }
}
