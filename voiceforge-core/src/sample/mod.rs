//! Voice sample selection and local preview handles

mod preview;

pub use preview::{PreviewRef, PreviewRegistry};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The one non-audio media type accepted as a sample.
pub const MP4_VIDEO_TYPE: &str = "video/mp4";

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("failed to read sample {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is not a regular file")]
    NotAFile { path: PathBuf },
}

/// A file the user picked as the voice reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    /// Declared media type, derived from the file extension.
    pub media_type: String,
}

impl SampleFile {
    /// Stat a file on disk and describe it. Does not validate the media type;
    /// acceptance is decided by the workflow when the sample is selected.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SampleError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|source| SampleError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_file() {
            return Err(SampleError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            name: display_name(path),
            size: metadata.len(),
            media_type: media_type_for_path(path).to_string(),
        })
    }

    pub fn is_accepted(&self) -> bool {
        is_accepted_media_type(&self.media_type)
    }

    /// Size formatted the way the workflow view shows it, e.g. `12.50 KB`.
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }

    pub async fn read_bytes(&self) -> Result<Vec<u8>, SampleError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| SampleError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

pub fn is_accepted_media_type(media_type: &str) -> bool {
    media_type.starts_with("audio/") || media_type == MP4_VIDEO_TYPE
}

pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("m4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("webm") | Some("weba") => "audio/webm",
        Some("mp4") => MP4_VIDEO_TYPE,
        _ => FALLBACK_MEDIA_TYPE,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
