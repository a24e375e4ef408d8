use thiserror::Error;

use crate::sample::SampleError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Failed to read sample: {0}")]
    Sample(#[from] SampleError),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Voice service error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response from voice service: {0}")]
    InvalidResponse(String),
}
