use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::error::ServiceError;
use super::provider::CloneService;
use super::types::{CloneRequest, CloneResponse};

/// Mock behavior for the mock service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBehavior {
    /// Respond with the given relative audio path
    Success { audio_url: String },
    /// Respond with a non-2xx status
    HttpError { status: u16 },
    /// Respond 200 with a body that is not the expected JSON
    MalformedResponse,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self::Success {
            audio_url: "/files/output.mp3".to_string(),
        }
    }
}

/// In-memory stand-in for the voice service. Records every request it sees.
#[derive(Clone)]
pub struct MockCloneService {
    origin: String,
    behavior: Arc<Mutex<MockBehavior>>,
    requests: Arc<Mutex<Vec<CloneRequest>>>,
    audio: Vec<u8>,
}

impl MockCloneService {
    pub fn new(origin: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            origin: origin.into(),
            behavior: Arc::new(Mutex::new(behavior)),
            requests: Arc::new(Mutex::new(Vec::new())),
            audio: b"RIFF-mock-audio".to_vec(),
        }
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap_or_else(|p| p.into_inner()) = behavior;
    }

    pub fn requests(&self) -> Vec<CloneRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn audio(&self) -> &[u8] {
        &self.audio
    }
}

#[async_trait]
impl CloneService for MockCloneService {
    fn origin(&self) -> &str {
        &self.origin
    }

    async fn clone_and_generate(
        &self,
        request: &CloneRequest,
    ) -> Result<CloneResponse, ServiceError> {
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(request.clone());

        let behavior = self.behavior.lock().unwrap_or_else(|p| p.into_inner()).clone();
        match behavior {
            MockBehavior::Success { audio_url } => Ok(CloneResponse { audio_url }),
            MockBehavior::HttpError { status } => Err(ServiceError::Status {
                status,
                body: "mock failure".to_string(),
            }),
            MockBehavior::MalformedResponse => Err(ServiceError::InvalidResponse(
                "missing field `audio_url`".to_string(),
            )),
        }
    }

    async fn fetch_audio(&self, url: &str) -> Result<Vec<u8>, ServiceError> {
        if url.starts_with(&self.origin) {
            Ok(self.audio.clone())
        } else {
            Err(ServiceError::Status {
                status: 404,
                body: format!("{url} not served by mock"),
            })
        }
    }
}
