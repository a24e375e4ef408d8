use async_trait::async_trait;

use super::error::ServiceError;
use super::types::{CloneRequest, CloneResponse};

/// Trait for remote voice-cloning services
#[async_trait]
pub trait CloneService: Send + Sync {
    /// Origin that relative audio paths in responses are resolved against
    fn origin(&self) -> &str;

    /// Upload the sample and options, returning where the generated audio lives
    async fn clone_and_generate(&self, request: &CloneRequest)
        -> Result<CloneResponse, ServiceError>;

    /// Fetch generated audio for download or playback
    async fn fetch_audio(&self, url: &str) -> Result<Vec<u8>, ServiceError>;
}
