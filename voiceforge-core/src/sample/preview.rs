use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use super::SampleFile;

/// Revocable handle that lets the UI play a sample that has not been
/// uploaded yet. Only valid while registered in a [`PreviewRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewRef {
    id: Uuid,
}

impl PreviewRef {
    pub fn url(&self) -> String {
        format!("preview:{}", self.id)
    }
}

/// Owns every live preview handle. Every `acquire` must be paired with a
/// `release`; anything still live when the registry is dropped is released
/// and reported.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    live: HashMap<Uuid, PathBuf>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, sample: &SampleFile) -> PreviewRef {
        let id = Uuid::new_v4();
        self.live.insert(id, sample.path.clone());
        debug!(preview = %id, file = %sample.name, "Acquired preview");
        PreviewRef { id }
    }

    /// Returns false if the handle was already released.
    pub fn release(&mut self, preview: &PreviewRef) -> bool {
        let released = self.live.remove(&preview.id).is_some();
        if released {
            debug!(preview = %preview.id, "Released preview");
        } else {
            warn!(preview = %preview.id, "Release of unknown preview");
        }
        released
    }

    pub fn resolve(&self, preview: &PreviewRef) -> Option<&Path> {
        self.live.get(&preview.id).map(PathBuf::as_path)
    }

    pub fn is_live(&self, preview: &PreviewRef) -> bool {
        self.live.contains_key(&preview.id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn release_all(&mut self) -> usize {
        let count = self.live.len();
        self.live.clear();
        count
    }
}

impl Drop for PreviewRegistry {
    fn drop(&mut self) {
        let leaked = self.release_all();
        if leaked > 0 {
            warn!(count = leaked, "Released previews still live at teardown");
        }
    }
}
