pub mod error;
pub mod http;
pub mod mock;
pub mod provider;
pub mod types;

pub use error::ServiceError;
pub use http::HttpCloneService;
pub use mock::{MockBehavior, MockCloneService};
pub use provider::CloneService;
pub use types::{resolve_audio_url, CloneRequest, CloneResponse};
